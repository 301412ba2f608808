//! 首页欢迎面板（静态图片）

use leptos::prelude::*;

#[component]
pub fn WelcomeMessage() -> impl IntoView {
    view! {
        <div class="hidden lg:flex items-center justify-center">
            <img
                src="/assets/welcome.svg"
                alt="Track your inventory and maintenance in one place"
                class="max-w-lg rounded-box shadow-xl"
            />
        </div>
    }
}
