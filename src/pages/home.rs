//! 首页：登录/注册表单 + 欢迎图

use crate::components::login_signup::LoginSignup;
use crate::components::welcome::WelcomeMessage;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col lg:flex-row-reverse gap-12 w-full max-w-5xl">
                <WelcomeMessage />
                <LoginSignup />
            </div>
        </div>
    }
}
