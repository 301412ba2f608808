//! 维护记录页
//!
//! 先拉物品列表，再对每个物品并发拉取维护记录（`concurrent::join_all`）。
//! 每个物品的结果相互独立：成功的记录进入扁平列表按物品过滤渲染，
//! 失败的物品单独显示错误行，不拖垮整页。物品列表本身拉取失败时
//! 显示单条整页错误。

use crate::api::ApiError;
use crate::auth::{expire_session, use_auth};
use crate::components::icons::{Plus, Trash2, Wrench};
use crate::concurrent::join_all;
use crate::web::AbortGuard;
use inventrack_shared::date::format_day_month_year;
use inventrack_shared::{InventoryItem, MaintenanceRecord, NewMaintenanceRecord};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;

/// 扇入结果：成功的记录、失败的物品 id、以及需要特殊处理的标志
struct FanInOutcome {
    records: Vec<MaintenanceRecord>,
    failed_items: HashSet<String>,
    unauthorized: bool,
    aborted: bool,
}

/// 将并发拉取的每物品结果汇总为渲染所需的状态
///
/// `item_ids` 与 `results` 按下标一一对应（`join_all` 保持输入顺序）。
fn collect_records(
    item_ids: &[String],
    results: Vec<Result<Vec<MaintenanceRecord>, ApiError>>,
) -> FanInOutcome {
    let mut outcome = FanInOutcome {
        records: Vec::new(),
        failed_items: HashSet::new(),
        unauthorized: false,
        aborted: false,
    };

    for (id, result) in item_ids.iter().zip(results) {
        match result {
            Ok(records) => outcome.records.extend(records),
            Err(ApiError::Aborted) => outcome.aborted = true,
            Err(ApiError::Unauthorized) => {
                outcome.unauthorized = true;
                outcome.failed_items.insert(id.clone());
            }
            Err(_) => {
                outcome.failed_items.insert(id.clone());
            }
        }
    }
    outcome
}

/// 渲染用的带序号物品列表
///
/// 提到 `view!` 外面：turbofish 的 `>` 会干扰宏里的标签解析。
fn numbered_items(items: Vec<InventoryItem>) -> Vec<(usize, InventoryItem)> {
    items.into_iter().enumerate().collect()
}

#[component]
pub fn Maintain() -> impl IntoView {
    let ctx = use_auth();

    let (items, set_items) = signal(Vec::<InventoryItem>::new());
    let (records, set_records) = signal(Vec::<MaintenanceRecord>::new());
    let (failed_items, set_failed_items) = signal(HashSet::<String>::new());
    let (loading, set_loading) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 新增记录表单
    let (form_item_id, set_form_item_id) = signal(String::new());
    let (form_service, set_form_service) = signal(String::new());
    let (form_date, set_form_date) = signal(String::new());
    let (form_cost, set_form_cost) = signal(String::new());

    let abort = StoredValue::new_local(AbortGuard::new());
    on_cleanup(move || abort.with_value(|guard| guard.abort()));

    let load_all = {
        move || {
            if loading.get_untracked() {
                return;
            }
            let Some(api) = ctx.state.get_untracked().api else {
                return;
            };
            set_loading.set(true);
            let abort_signal = abort.with_value(|guard| guard.signal());
            spawn_local(async move {
                let fetched = match api.list_items(abort_signal.as_ref()).await {
                    Ok(list) => list,
                    Err(ApiError::Aborted) => return,
                    Err(ApiError::Unauthorized) => {
                        expire_session(&ctx);
                        return;
                    }
                    Err(e) => {
                        web_sys::console::error_1(&format!("[Maintain] items: {}", e).into());
                        set_error_msg.set(Some(
                            "Could not fetch items or maintenance records. Please try again later."
                                .to_string(),
                        ));
                        set_loading.set(false);
                        return;
                    }
                };

                // 每个物品一个并发请求，结果相互独立
                let item_ids: Vec<String> = fetched.iter().map(|i| i.id.clone()).collect();
                let fetches = item_ids
                    .iter()
                    .map(|id| api.maintenance_for_item(id, abort_signal.as_ref()));
                let results = join_all(fetches).await;

                let outcome = collect_records(&item_ids, results);
                if outcome.aborted {
                    return;
                }
                if outcome.unauthorized {
                    expire_session(&ctx);
                    return;
                }

                set_items.set(fetched);
                set_records.set(outcome.records);
                set_failed_items.set(outcome.failed_items);
                set_error_msg.set(None);
                set_loading.set(false);
            });
        }
    };

    // 初始加载
    Effect::new({
        let load_all = load_all.clone();
        move |_| load_all()
    });

    let handle_add = {
        let load_all = load_all.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let Ok(cost) = form_cost.get_untracked().parse::<f64>() else {
                return;
            };
            let item_id = form_item_id.get_untracked();
            if item_id.is_empty() {
                return;
            }
            let Some(api) = ctx.state.get_untracked().api else {
                return;
            };
            // date_of_service 按表单原值写入，不做 ISO 规范化
            let record = NewMaintenanceRecord {
                service_type: form_service.get_untracked(),
                date_of_service: form_date.get_untracked(),
                cost,
                item_id,
            };
            let load_all = load_all.clone();
            let abort_signal = abort.with_value(|guard| guard.signal());
            spawn_local(async move {
                match api.add_maintenance(&record, abort_signal.as_ref()).await {
                    Ok(()) => {
                        set_form_item_id.set(String::new());
                        set_form_service.set(String::new());
                        set_form_date.set(String::new());
                        set_form_cost.set(String::new());
                        load_all();
                    }
                    Err(ApiError::Aborted) => {}
                    Err(ApiError::Unauthorized) => expire_session(&ctx),
                    Err(e) => {
                        web_sys::console::error_1(&format!("[Maintain] add: {}", e).into());
                        set_error_msg.set(Some("Failed to add maintenance record".to_string()));
                    }
                }
            });
        }
    };

    let handle_delete = {
        let load_all = load_all.clone();
        move |id: String| {
            let Some(api) = ctx.state.get_untracked().api else {
                return;
            };
            let load_all = load_all.clone();
            let abort_signal = abort.with_value(|guard| guard.signal());
            spawn_local(async move {
                match api.delete_maintenance(&id, abort_signal.as_ref()).await {
                    Ok(()) => load_all(),
                    Err(ApiError::Aborted) => {}
                    Err(ApiError::Unauthorized) => expire_session(&ctx),
                    Err(e) => {
                        web_sys::console::error_1(&format!("[Maintain] delete: {}", e).into());
                        set_error_msg
                            .set(Some("Failed to delete maintenance record".to_string()));
                    }
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=handle_add>
                    <h3 class="card-title">
                        <Wrench attr:class="h-5 w-5" /> "Log Maintenance"
                    </h3>
                    <div class="grid grid-cols-1 md:grid-cols-4 gap-4">
                        <select
                            class="select select-bordered w-full"
                            on:change=move |ev| set_form_item_id.set(event_target_value(&ev))
                            prop:value=form_item_id
                            required
                        >
                            <option value="" disabled selected>"Select item"</option>
                            <For
                                each=move || items.get()
                                key=|item| item.id.clone()
                                children=move |item| {
                                    view! {
                                        <option value=item.id.clone()>{item.item_name.clone()}</option>
                                    }
                                }
                            />
                        </select>
                        <input
                            type="text"
                            placeholder="Service type"
                            on:input=move |ev| set_form_service.set(event_target_value(&ev))
                            prop:value=form_service
                            class="input input-bordered w-full"
                            required
                        />
                        <input
                            type="date"
                            on:input=move |ev| set_form_date.set(event_target_value(&ev))
                            prop:value=form_date
                            class="input input-bordered w-full"
                            required
                        />
                        <input
                            type="number"
                            min="0"
                            step="0.01"
                            placeholder="Cost"
                            on:input=move |ev| set_form_cost.set(event_target_value(&ev))
                            prop:value=form_cost
                            class="input input-bordered w-full"
                            required
                        />
                    </div>
                    <div class="card-actions justify-end mt-2">
                        <button type="submit" class="btn btn-primary gap-2">
                            <Plus attr:class="h-4 w-4" /> "Add Record"
                        </button>
                    </div>
                </form>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <p class="alert alert-error">{move || error_msg.get().unwrap()}</p>
            </Show>

            <Show when=move || loading.get() && items.with(|i| i.is_empty())>
                <div class="text-center py-8">
                    <span class="loading loading-spinner loading-md"></span> " Loading records..."
                </div>
            </Show>

            <Show when=move || {
                !loading.get() && error_msg.get().is_none() && items.with(|i| i.is_empty())
            }>
                <p class="text-center py-8 text-base-content/50">
                    "No items found in your inventory."
                </p>
            </Show>

            <For
                each=move || numbered_items(items.get())
                key=|(_, item)| item.id.clone()
                children=move |(index, item)| {
                    let item_id = item.id.clone();
                    let failed = {
                        let item_id = item_id.clone();
                        move || failed_items.with(|f| f.contains(&item_id))
                    };
                    let item_records = {
                        let item_id = item_id.clone();
                        move || {
                            records.with(|all| {
                                all.iter()
                                    .filter(|r| r.item_id == item_id)
                                    .cloned()
                                    .collect::<Vec<_>>()
                            })
                        }
                    };
                    let handle_delete = handle_delete.clone();
                    view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body p-4">
                                <h3 class="card-title text-base">
                                    {format!("{}. {}", index + 1, item.item_name)}
                                </h3>
                                <Show
                                    when=failed.clone()
                                    fallback={
                                        let item_records = item_records.clone();
                                        let handle_delete = handle_delete.clone();
                                        move || {
                                            let item_records = item_records.clone();
                                            let handle_delete = handle_delete.clone();
                                            view! {
                                                <div class="overflow-x-auto">
                                                    <table class="table table-zebra w-full">
                                                        <thead>
                                                            <tr>
                                                                <th>"Service"</th>
                                                                <th>"Date"</th>
                                                                <th>"Cost"</th>
                                                                <th></th>
                                                            </tr>
                                                        </thead>
                                                        <tbody>
                                                            <Show when={
                                                                let item_records = item_records.clone();
                                                                move || item_records().is_empty()
                                                            }>
                                                                <tr>
                                                                    <td
                                                                        colspan="4"
                                                                        class="text-center text-base-content/50"
                                                                    >
                                                                        "No maintenance records."
                                                                    </td>
                                                                </tr>
                                                            </Show>
                                                            <For
                                                                each=item_records.clone()
                                                                key=|r| r.id.clone()
                                                                children=move |record| {
                                                                    let delete_id = record.id.clone();
                                                                    let handle_delete = handle_delete.clone();
                                                                    view! {
                                                                        <tr>
                                                                            <td>{record.service_type.clone()}</td>
                                                                            <td>
                                                                                {format_day_month_year(
                                                                                    &record.date_of_service,
                                                                                )}
                                                                            </td>
                                                                            <td>{format!("₹{}", record.cost)}</td>
                                                                            <td class="text-right">
                                                                                <button
                                                                                    class="btn btn-ghost btn-sm text-error"
                                                                                    on:click=move |_| handle_delete(
                                                                                        delete_id.clone(),
                                                                                    )
                                                                                >
                                                                                    <Trash2 attr:class="h-4 w-4" />
                                                                                </button>
                                                                            </td>
                                                                        </tr>
                                                                    }
                                                                }
                                                            />
                                                        </tbody>
                                                    </table>
                                                </div>
                                            }
                                        }
                                    }
                                >
                                    <p class="alert alert-warning text-sm py-2">
                                        "Could not load maintenance records for this item."
                                    </p>
                                </Show>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventrack_shared::Category;

    fn item(id: &str, name: &str) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            item_name: name.to_string(),
            category: Category::Electronics,
            purchase_date: "2024-01-01T00:00:00.000Z".to_string(),
            serial_number: "SN".to_string(),
        }
    }

    fn record(id: &str, item_id: &str) -> MaintenanceRecord {
        MaintenanceRecord {
            id: id.to_string(),
            service_type: "Cleaning".to_string(),
            date_of_service: "2024-03-07".to_string(),
            cost: 25.0,
            item_id: item_id.to_string(),
        }
    }

    #[test]
    fn test_collect_records_flattens_successes() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let results = vec![
            Ok(vec![record("r1", "a"), record("r2", "a")]),
            Ok(vec![record("r3", "b")]),
        ];
        let outcome = collect_records(&ids, results);
        assert_eq!(outcome.records.len(), 3);
        assert!(outcome.failed_items.is_empty());
        assert!(!outcome.unauthorized);
        assert!(!outcome.aborted);
    }

    #[test]
    fn test_one_failure_keeps_other_items_records() {
        // 扇出中单个物品失败不影响其余物品的记录
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let results = vec![
            Ok(vec![record("r1", "a")]),
            Err(ApiError::Network("down".to_string())),
            Ok(vec![record("r2", "c")]),
        ];
        let outcome = collect_records(&ids, results);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(
            outcome.failed_items,
            HashSet::from(["b".to_string()])
        );
        assert!(!outcome.unauthorized);
    }

    #[test]
    fn test_unauthorized_result_sets_flag() {
        let ids = vec!["a".to_string()];
        let results = vec![Err(ApiError::Unauthorized)];
        let outcome = collect_records(&ids, results);
        assert!(outcome.unauthorized);
        assert!(outcome.failed_items.contains("a"));
    }

    #[test]
    fn test_aborted_result_marks_whole_load_stale() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let results = vec![Ok(vec![record("r1", "a")]), Err(ApiError::Aborted)];
        let outcome = collect_records(&ids, results);
        assert!(outcome.aborted);
    }

    #[test]
    fn test_numbered_items_keeps_order_and_index() {
        let numbered = numbered_items(vec![item("a", "Desk"), item("b", "Laptop")]);
        assert_eq!(numbered.len(), 2);
        assert_eq!(numbered[0].0, 0);
        assert_eq!(numbered[0].1.id, "a");
        assert_eq!(numbered[1].0, 1);
        assert_eq!(numbered[1].1.item_name, "Laptop");
    }

    #[test]
    fn test_numbered_items_empty_list() {
        assert!(numbered_items(Vec::new()).is_empty());
    }

    #[test]
    fn test_empty_fan_out_yields_empty_outcome() {
        let outcome = collect_records(&[], Vec::new());
        assert!(outcome.records.is_empty());
        assert!(outcome.failed_items.is_empty());
    }
}
