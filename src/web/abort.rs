//! AbortController 封装模块
//!
//! 将 fetch 请求的生命周期绑定到组件作用域：每个数据组件持有一个
//! `AbortGuard`，发出的请求都挂上它的信号，组件卸载（守卫被 Drop）时
//! 一并取消仍在途的请求，避免响应回来后再去写已销毁的信号。

use web_sys::{AbortController, AbortSignal};

/// 与组件作用域同生命周期的请求取消守卫
pub struct AbortGuard {
    controller: Option<AbortController>,
}

impl AbortGuard {
    /// 创建守卫；环境不支持 AbortController 时退化为不取消
    pub fn new() -> Self {
        Self {
            controller: AbortController::new().ok(),
        }
    }

    /// 返回可附加到请求上的取消信号
    pub fn signal(&self) -> Option<AbortSignal> {
        self.controller.as_ref().map(|c| c.signal())
    }

    /// 取消所有挂在该守卫信号上的在途请求
    pub fn abort(&self) {
        if let Some(controller) = &self.controller {
            controller.abort();
        }
    }
}

impl Drop for AbortGuard {
    fn drop(&mut self) {
        self.abort();
    }
}

impl Default for AbortGuard {
    fn default() -> Self {
        Self::new()
    }
}
