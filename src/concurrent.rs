//! 并发执行工具
//!
//! 轻量级的 `join_all` 实现，用于维护记录页对每个物品的并行拉取。
//! 使用 Rust 原生的 Future 轮询机制，不依赖 JavaScript Promise，
//! 因此 future 可以借用调用方的局部变量（不需要 `'static` 约束）。

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// 并发执行多个异步任务
///
/// 与 `futures::future::join_all` 类似，但更轻量。
///
/// # 返回
/// - 所有 Future 结果的 Vec（保持输入顺序，与完成顺序无关）
pub fn join_all<F>(futures: impl IntoIterator<Item = F>) -> JoinAll<F>
where
    F: Future,
{
    let futures: Vec<_> = futures.into_iter().map(|f| MaybeDone::Pending(f)).collect();

    JoinAll { futures }
}

/// 表示一个可能已完成的 Future
enum MaybeDone<F: Future> {
    /// Future 仍在等待
    Pending(F),
    /// Future 已完成，结果已存储
    Done(F::Output),
    /// 结果已被取走
    Taken,
}

impl<F: Future> MaybeDone<F> {
    /// 轮询尚未完成的 future，返回是否已完成
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> bool {
        // SAFETY: 我们不会移动 inner future
        let this = unsafe { self.get_unchecked_mut() };

        match this {
            MaybeDone::Pending(fut) => {
                // SAFETY: 我们保证不会移动 future
                let fut = unsafe { Pin::new_unchecked(fut) };
                match fut.poll(cx) {
                    Poll::Ready(output) => {
                        *this = MaybeDone::Done(output);
                        true
                    }
                    Poll::Pending => false,
                }
            }
            MaybeDone::Done(_) => true,
            MaybeDone::Taken => true,
        }
    }

    /// 取出结果
    fn take_output(&mut self) -> Option<F::Output> {
        match std::mem::replace(self, MaybeDone::Taken) {
            MaybeDone::Done(output) => Some(output),
            _ => None,
        }
    }
}

/// `join_all` 返回的 Future 类型
pub struct JoinAll<F: Future> {
    futures: Vec<MaybeDone<F>>,
}

impl<F: Future> Future for JoinAll<F> {
    type Output = Vec<F::Output>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // SAFETY: 我们不会移动 futures Vec，只会修改其内容
        let this = unsafe { self.get_unchecked_mut() };

        let mut all_done = true;

        for fut in &mut this.futures {
            // SAFETY: futures 不会被移动
            let fut = unsafe { Pin::new_unchecked(fut) };
            if !fut.poll(cx) {
                all_done = false;
            }
        }

        if all_done {
            let results: Vec<_> = this
                .futures
                .iter_mut()
                .map(|f| {
                    f.take_output()
                        .expect("Future completed but output missing")
                })
                .collect();
            Poll::Ready(results)
        } else {
            Poll::Pending
        }
    }
}

// 实现 Unpin，因为我们使用 Vec 并手动处理 Pin
impl<F: Future> Unpin for JoinAll<F> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_join_all_empty_completes_immediately() {
        let futures: Vec<std::future::Ready<i32>> = vec![];
        let results = join_all(futures).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_join_all_preserves_input_order() {
        // 第一个任务最后完成，结果仍按输入顺序返回
        let slow = async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            "slow"
        };
        let fast = async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            "fast"
        };

        let futures: Vec<Pin<Box<dyn Future<Output = &'static str>>>> =
            vec![Box::pin(slow), Box::pin(fast)];
        let results = join_all(futures).await;
        assert_eq!(results, vec!["slow", "fast"]);
    }

    #[tokio::test]
    async fn test_join_all_borrows_without_static_bound() {
        // 维护页的扇出就是这种形态：future 借用局部的 id 列表
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let futures = ids.iter().map(|id| async move {
            tokio::task::yield_now().await;
            Ok::<String, String>(format!("records-of-{}", id))
        });

        let results = join_all(futures).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[2], Ok("records-of-c".to_string()));
    }
}
