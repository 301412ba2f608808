//! 维护记录页（受保护）

use crate::auth::use_auth;
use crate::components::maintain::Maintain;
use crate::components::navbar::Navbar;
use crate::web::router::use_navigate;
use leptos::prelude::*;

#[component]
pub fn MaintenancePage() -> impl IntoView {
    let ctx = use_auth();
    let navigate = use_navigate();

    // 令牌缺失立即跳回登录页
    Effect::new({
        let navigate = navigate.clone();
        move |_| {
            let state = ctx.state.get();
            if !state.is_loading && !state.is_authenticated {
                web_sys::console::log_1(
                    &"[MaintenancePage] No token, redirecting to login.".into(),
                );
                navigate("/");
            }
        }
    });

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-7xl mx-auto space-y-6">
                <Navbar />
                <Maintain />
            </div>
        </div>
    }
}
