//! 库存物品页：列表 + 新增表单 + 更新弹窗 + 删除
//!
//! 所有写操作成功后整表重拉（fire-and-refetch），不做乐观更新。
//! 更新与删除的失败被有意吞掉（只记控制台），与服务端的最终状态
//! 靠重拉收敛；唯一例外是 401，走统一的会话过期路径。

mod form_state;

use crate::api::ApiError;
use crate::auth::{expire_session, use_auth};
use crate::components::icons::{Pencil, Plus, Trash2};
use crate::web::AbortGuard;
use form_state::ItemFormState;
use inventrack_shared::date::display_date;
use inventrack_shared::{Category, InventoryItem};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn Inventory() -> impl IntoView {
    let ctx = use_auth();

    let (items, set_items) = signal(Vec::<InventoryItem>::new());
    let (loading, set_loading) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let add_form = ItemFormState::new();
    let edit_form = ItemFormState::new();
    // 正在编辑的物品 id，Some 时弹窗打开
    let (editing, set_editing) = signal(Option::<String>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let abort = StoredValue::new_local(AbortGuard::new());
    on_cleanup(move || abort.with_value(|guard| guard.abort()));

    let load_items = {
        move || {
            if loading.get_untracked() {
                return;
            }
            // 令牌缺失只提示，不做跳转（维护页才会跳转）
            let Some(api) = ctx.state.get_untracked().api else {
                set_error_msg.set(Some("Unauthorized access. Please log in again.".to_string()));
                return;
            };
            set_loading.set(true);
            let abort_signal = abort.with_value(|guard| guard.signal());
            spawn_local(async move {
                match api.list_items(abort_signal.as_ref()).await {
                    Ok(list) => {
                        set_items.set(list);
                        set_error_msg.set(None);
                    }
                    Err(ApiError::Aborted) => return,
                    Err(ApiError::Unauthorized) => {
                        expire_session(&ctx);
                        return;
                    }
                    Err(e) => {
                        web_sys::console::error_1(&format!("[Inventory] {}", e).into());
                        set_error_msg
                            .set(Some("An error occurred while fetching items.".to_string()));
                    }
                }
                set_loading.set(false);
            });
        }
    };

    // 初始加载
    Effect::new({
        let load_items = load_items.clone();
        move |_| load_items()
    });

    let handle_add = {
        let load_items = load_items.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(new_item) = add_form.to_new_item() else {
                return;
            };
            let Some(api) = ctx.state.get_untracked().api else {
                return;
            };
            let load_items = load_items.clone();
            let abort_signal = abort.with_value(|guard| guard.signal());
            spawn_local(async move {
                match api.add_item(&new_item, abort_signal.as_ref()).await {
                    Ok(()) => {
                        add_form.reset();
                        load_items();
                    }
                    Err(ApiError::Aborted) => {}
                    Err(ApiError::Unauthorized) => expire_session(&ctx),
                    // 新增失败不提示，列表保持原样
                    Err(e) => {
                        web_sys::console::error_1(&format!("[Inventory] add: {}", e).into())
                    }
                }
            });
        }
    };

    // 弹窗开合跟随 editing 信号
    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if editing.get().is_some() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let open_edit = move |item: InventoryItem| {
        edit_form.load(&item);
        set_editing.set(Some(item.id));
    };

    let handle_update = {
        let load_items = load_items.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(id) = editing.get_untracked() else {
                return;
            };
            let Some(item) = edit_form.to_item(id) else {
                return;
            };
            let Some(api) = ctx.state.get_untracked().api else {
                return;
            };
            let load_items = load_items.clone();
            let abort_signal = abort.with_value(|guard| guard.signal());
            spawn_local(async move {
                // 无论成败都关弹窗并重拉，失败不提示
                match api.update_item(&item, abort_signal.as_ref()).await {
                    Ok(()) => {}
                    Err(ApiError::Aborted) => return,
                    Err(ApiError::Unauthorized) => {
                        expire_session(&ctx);
                        return;
                    }
                    Err(e) => {
                        web_sys::console::error_1(&format!("[Inventory] update: {}", e).into())
                    }
                }
                set_editing.set(None);
                load_items();
            });
        }
    };

    let handle_delete = {
        let load_items = load_items.clone();
        move |id: String| {
            let Some(api) = ctx.state.get_untracked().api else {
                return;
            };
            let load_items = load_items.clone();
            let abort_signal = abort.with_value(|guard| guard.signal());
            spawn_local(async move {
                // 失败同样不提示，重拉后与服务端状态对齐
                match api.delete_item(&id, abort_signal.as_ref()).await {
                    Ok(()) => {}
                    Err(ApiError::Aborted) => return,
                    Err(ApiError::Unauthorized) => {
                        expire_session(&ctx);
                        return;
                    }
                    Err(e) => {
                        web_sys::console::error_1(&format!("[Inventory] delete: {}", e).into())
                    }
                }
                load_items();
            });
        }
    };

    view! {
        <div class="space-y-6">
            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=handle_add>
                    <h3 class="card-title">"Add New Item"</h3>
                    <div class="grid grid-cols-1 md:grid-cols-4 gap-4">
                        <input
                            type="text"
                            placeholder="Item name"
                            on:input=move |ev| add_form.item_name.set(event_target_value(&ev))
                            prop:value=add_form.item_name
                            class="input input-bordered w-full"
                            required
                        />
                        <select
                            class="select select-bordered w-full"
                            on:change=move |ev| add_form.category.set(event_target_value(&ev))
                            prop:value=add_form.category
                            required
                        >
                            <option value="" disabled selected>"Select category"</option>
                            {Category::ALL
                                .iter()
                                .map(|c| {
                                    let value = c.as_str();
                                    view! { <option value=value>{value}</option> }
                                })
                                .collect_view()}
                        </select>
                        <input
                            type="date"
                            on:input=move |ev| add_form.purchase_date.set(event_target_value(&ev))
                            prop:value=add_form.purchase_date
                            class="input input-bordered w-full"
                            required
                        />
                        <input
                            type="text"
                            placeholder="Serial number"
                            on:input=move |ev| add_form.serial_number.set(event_target_value(&ev))
                            prop:value=add_form.serial_number
                            class="input input-bordered w-full"
                            required
                        />
                    </div>
                    <div class="card-actions justify-end mt-2">
                        <button type="submit" class="btn btn-primary gap-2">
                            <Plus attr:class="h-4 w-4" /> "Add Item"
                        </button>
                    </div>
                </form>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <p class="alert alert-error">{move || error_msg.get().unwrap()}</p>
            </Show>

            <Show when=move || loading.get() && items.with(|i| i.is_empty())>
                <div class="text-center py-8">
                    <span class="loading loading-spinner loading-md"></span> " Loading items..."
                </div>
            </Show>

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                <For
                    each=move || items.get()
                    key=|item| item.id.clone()
                    children=move |item| {
                        let delete_id = item.id.clone();
                        let edit_item = item.clone();
                        let handle_delete = handle_delete.clone();
                        view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <h3 class="card-title">{item.item_name.clone()}</h3>
                                    <div class="badge badge-accent badge-outline">
                                        {item.category.as_str()}
                                    </div>
                                    <p>"Purchased: " {display_date(&item.purchase_date)}</p>
                                    <p class="font-mono text-sm opacity-70">
                                        "S/N " {item.serial_number.clone()}
                                    </p>
                                    <div class="card-actions justify-end">
                                        <button
                                            class="btn btn-ghost btn-sm gap-2"
                                            on:click=move |_| open_edit(edit_item.clone())
                                        >
                                            <Pencil attr:class="h-4 w-4" /> "Edit"
                                        </button>
                                        <button
                                            class="btn btn-ghost btn-sm text-error gap-2"
                                            on:click=move |_| handle_delete(delete_id.clone())
                                        >
                                            <Trash2 attr:class="h-4 w-4" /> "Delete"
                                        </button>
                                    </div>
                                </div>
                            </div>
                        }
                    }
                />
            </div>

            // 更新弹窗
            <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_editing.set(None)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"Update Item"</h3>
                    <form class="space-y-4 mt-4" on:submit=handle_update>
                        <div class="form-control">
                            <label class="label" for="edit_name">
                                <span class="label-text">"Item name"</span>
                            </label>
                            <input
                                id="edit_name"
                                type="text"
                                on:input=move |ev| edit_form.item_name.set(event_target_value(&ev))
                                prop:value=edit_form.item_name
                                class="input input-bordered w-full"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="edit_category">
                                <span class="label-text">"Category"</span>
                            </label>
                            <select
                                id="edit_category"
                                class="select select-bordered w-full"
                                on:change=move |ev| edit_form.category.set(event_target_value(&ev))
                                prop:value=edit_form.category
                                required
                            >
                                {Category::ALL
                                    .iter()
                                    .map(|c| {
                                        let value = c.as_str();
                                        view! { <option value=value>{value}</option> }
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form-control">
                            <label class="label" for="edit_date">
                                <span class="label-text">"Purchase date"</span>
                            </label>
                            <input
                                id="edit_date"
                                type="date"
                                on:input=move |ev| {
                                    edit_form.purchase_date.set(event_target_value(&ev))
                                }
                                prop:value=edit_form.purchase_date
                                class="input input-bordered w-full"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="edit_serial">
                                <span class="label-text">"Serial number"</span>
                            </label>
                            <input
                                id="edit_serial"
                                type="text"
                                on:input=move |ev| {
                                    edit_form.serial_number.set(event_target_value(&ev))
                                }
                                prop:value=edit_form.serial_number
                                class="input input-bordered w-full"
                                required
                            />
                        </div>
                        <div class="modal-action">
                            <button
                                type="button"
                                class="btn btn-ghost"
                                on:click=move |_| set_editing.set(None)
                            >
                                "Cancel"
                            </button>
                            <button type="submit" class="btn btn-primary">"Update"</button>
                        </div>
                    </form>
                </div>
                <form method="dialog" class="modal-backdrop">
                    <button>"close"</button>
                </form>
            </dialog>
        </div>
    }
}
