//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录/注册页 (默认路由，`/login` 是它的别名)
    #[default]
    Home,
    /// 库存物品页 (需要认证)
    Main,
    /// 维护记录页 (需要认证)
    Maintenance,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Home,
            "/main" => Self::Main,
            "/maintenance" => Self::Maintenance,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Main => "/main",
            Self::Maintenance => "/maintenance",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    ///
    /// 已认证用户访问首页不做强制跳转，登录成功后由表单自行导航。
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Main | Self::Maintenance)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_maps_login_alias_to_home() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Home);
    }

    #[test]
    fn test_from_path_maps_known_paths() {
        assert_eq!(AppRoute::from_path("/main"), AppRoute::Main);
        assert_eq!(AppRoute::from_path("/maintenance"), AppRoute::Maintenance);
    }

    #[test]
    fn test_from_path_rejects_unknown_paths() {
        assert_eq!(AppRoute::from_path("/items"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path(""), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/main/"), AppRoute::NotFound);
    }

    #[test]
    fn test_known_paths_round_trip() {
        for route in [AppRoute::Home, AppRoute::Main, AppRoute::Maintenance] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn test_only_data_pages_require_auth() {
        assert!(!AppRoute::Home.requires_auth());
        assert!(AppRoute::Main.requires_auth());
        assert!(AppRoute::Maintenance.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
    }

    #[test]
    fn test_auth_failure_redirects_to_home() {
        assert_eq!(AppRoute::auth_failure_redirect(), AppRoute::Home);
    }
}
