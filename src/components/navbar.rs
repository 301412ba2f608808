//! 顶部导航栏
//!
//! 用户名经认证上下文缓存：首次挂载拉取一次 profile，之后与数据页
//! 同屏渲染时不再重复请求。登出只清本地令牌，跳转由路由服务的
//! 认证效应完成。

use crate::api::ApiError;
use crate::auth::{ensure_profile, expire_session, logout, use_auth};
use crate::components::icons::{LogOut, Package, Wrench};
use crate::web::AbortGuard;
use crate::web::router::use_navigate;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_auth();
    let navigate = use_navigate();

    let (profile_error, set_profile_error) = signal(false);

    let abort = StoredValue::new_local(AbortGuard::new());
    on_cleanup(move || abort.with_value(|guard| guard.abort()));

    // 挂载时确保用户名已缓存（已有缓存则直接命中，不发请求）
    Effect::new(move |_| {
        if !ctx.state.get().is_authenticated {
            return;
        }
        let abort_signal = abort.with_value(|guard| guard.signal());
        spawn_local(async move {
            match ensure_profile(&ctx, abort_signal.as_ref()).await {
                Ok(()) => set_profile_error.set(false),
                Err(ApiError::Aborted) => {}
                Err(ApiError::Unauthorized) => expire_session(&ctx),
                Err(e) => {
                    web_sys::console::error_1(&format!("[Navbar] {}", e).into());
                    set_profile_error.set(true);
                }
            }
        });
    });

    let greeting = move || {
        if profile_error.get() {
            "Could not fetch username. Please try again later.".to_string()
        } else {
            let name = ctx
                .state
                .get()
                .profile_name
                .unwrap_or_else(|| "Guest".to_string());
            format!("Welcome to the inventory, {}", name)
        }
    };

    let nav_items = {
        let navigate = navigate.clone();
        move |_| navigate("/main")
    };
    let nav_maintenance = {
        let navigate = navigate.clone();
        move |_| navigate("/maintenance")
    };
    let on_logout = move |_| logout(&ctx);

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 gap-2">
                <Package attr:class="text-primary h-6 w-6" />
                <span class="text-lg font-semibold">{greeting}</span>
            </div>
            <div class="flex-none gap-2">
                <button on:click=nav_items class="btn btn-ghost gap-2">
                    <Package attr:class="h-4 w-4" /> "Items"
                </button>
                <button on:click=nav_maintenance class="btn btn-ghost gap-2">
                    <Wrench attr:class="h-4 w-4" /> "Maintenance"
                </button>
                <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                    <LogOut attr:class="h-4 w-4" /> "Logout"
                </button>
            </div>
        </div>
    }
}
