//! 库存物品页（受保护）
//!
//! 路由服务已在导航层拦截未认证访问，这里在挂载时再查一次会话，
//! 覆盖令牌被另一个标签页清掉之类的情况。

use crate::auth::use_auth;
use crate::components::inventory::Inventory;
use crate::components::navbar::Navbar;
use crate::web::router::use_navigate;
use leptos::prelude::*;

#[component]
pub fn MainPage() -> impl IntoView {
    let ctx = use_auth();
    let navigate = use_navigate();

    Effect::new({
        let navigate = navigate.clone();
        move |_| {
            let state = ctx.state.get();
            if !state.is_loading && !state.is_authenticated {
                web_sys::console::log_1(&"[MainPage] No token, redirecting to login.".into());
                navigate("/");
            }
        }
    });

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-7xl mx-auto space-y-6">
                <Navbar />
                <Inventory />
            </div>
        </div>
    }
}
