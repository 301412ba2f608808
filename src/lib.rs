//! InvenTrack 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理（会话令牌的唯一出入口）
//! - `api`: 远端数据访问层
//! - `components` / `pages`: UI 组件层与路由级页面

mod api;
mod auth;
mod components {
    pub mod icons;
    pub mod inventory;
    pub mod login_signup;
    pub mod maintain;
    pub mod navbar;
    pub mod welcome;
}
mod concurrent;
mod pages {
    pub mod home;
    pub mod main;
    pub mod maintenance;
}
mod serde_helper;

use crate::auth::{AuthContext, init_auth};
use crate::pages::home::HomePage;
use crate::pages::main::MainPage;
use crate::pages::maintenance::MaintenancePage;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod abort;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use abort::AbortGuard;
    pub use http::{HttpClient, HttpError, HttpResponse};
    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Main => view! { <MainPage /> }.into_any(),
        AppRoute::Maintenance => view! { <MaintenancePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 初始化认证状态（从 LocalStorage 恢复令牌）
    init_auth(&auth_ctx);

    // 3. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 4. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
