//! 认证模块
//!
//! 管理登录会话，与路由系统解耦：路由服务通过注入的认证信号做守卫，
//! 组件通过 Context 拿到会话而不是自己去读 LocalStorage。
//! 令牌的持久化（`authToken` 键）只发生在这个模块里。

use crate::api::{self, ApiError, InventoryApi};
use crate::web::LocalStorage;
use inventrack_shared::{AuthResponse, LoginRequest, RegisterRequest};
use leptos::prelude::*;
use web_sys::AbortSignal;

const STORAGE_TOKEN_KEY: &str = "authToken";

/// 令牌持久化的显式会话对象
///
/// 组件不直接读写 LocalStorage，令牌的存取统一经过这里。
/// 空字符串视为没有令牌。
pub struct Session;

impl Session {
    /// 读取已保存的令牌
    pub fn token() -> Option<String> {
        LocalStorage::get(STORAGE_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// 保存令牌
    pub fn store_token(token: &str) -> bool {
        LocalStorage::set(STORAGE_TOKEN_KEY, token)
    }

    /// 清除令牌
    pub fn clear_token() -> bool {
        LocalStorage::delete(STORAGE_TOKEN_KEY)
    }
}

/// 会话状态
#[derive(Clone, Default)]
pub struct AuthState {
    /// API 客户端实例（仅在持有令牌时存在）
    pub api: Option<InventoryApi>,
    /// 是否已认证
    pub is_authenticated: bool,
    /// 是否正在恢复会话
    pub is_loading: bool,
    /// 当前用户名（首次拉取后缓存，登出时清空）
    pub profile_name: Option<String>,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置会话状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化会话：从 LocalStorage 恢复上次的令牌
///
/// 恢复是乐观的——令牌可能早已被服务端作废，首个带令牌的请求
/// 返回 401 时再经 [`expire_session`] 统一登出。
pub fn init_auth(ctx: &AuthContext) {
    let token = Session::token();
    ctx.set_state.update(|state| {
        state.is_loading = false;
        if let Some(token) = token {
            state.api = Some(InventoryApi::new(token));
            state.is_authenticated = true;
        }
    });
}

/// 登录并持久化令牌
pub async fn login(
    ctx: &AuthContext,
    req: &LoginRequest,
    signal: Option<&AbortSignal>,
) -> Result<(), ApiError> {
    let response = api::login(req, signal).await?;
    adopt_token(ctx, response)
}

/// 注册；成功时服务端同样发放令牌，直接进入已登录状态
pub async fn register(
    ctx: &AuthContext,
    req: &RegisterRequest,
    signal: Option<&AbortSignal>,
) -> Result<(), ApiError> {
    let response = api::register(req, signal).await?;
    adopt_token(ctx, response)
}

/// 2xx 认证响应落地：存储令牌并切换到已认证状态
fn adopt_token(ctx: &AuthContext, response: AuthResponse) -> Result<(), ApiError> {
    let token = response
        .token
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::MissingToken)?;

    Session::store_token(&token);
    ctx.set_state.update(|state| {
        state.api = Some(InventoryApi::new(token));
        state.is_authenticated = true;
        state.profile_name = None;
    });
    Ok(())
}

/// 注销并清除令牌
///
/// 不需要手动导航：路由服务监听认证信号，离开受保护页面由它完成。
pub fn logout(ctx: &AuthContext) {
    Session::clear_token();
    ctx.set_state.update(|state| {
        state.api = None;
        state.is_authenticated = false;
        state.profile_name = None;
    });
}

/// 服务端拒绝令牌 (401) 时的统一登出路径
///
/// 所有组件收到 [`ApiError::Unauthorized`] 都走这里，而不是各自弹错误。
pub fn expire_session(ctx: &AuthContext) {
    web_sys::console::warn_1(&"[Auth] Token rejected by server, clearing session.".into());
    logout(ctx);
}

/// 确保用户名已缓存：已有缓存则直接返回，否则拉取一次 profile
pub async fn ensure_profile(
    ctx: &AuthContext,
    signal: Option<&AbortSignal>,
) -> Result<(), ApiError> {
    let state = ctx.state.get_untracked();
    if state.profile_name.is_some() {
        return Ok(());
    }
    let Some(api) = state.api else {
        return Err(ApiError::Unauthorized);
    };

    let profile = api.profile(signal).await?;
    ctx.set_state.update(|state| {
        state.profile_name = Some(profile.name);
    });
    Ok(())
}
