//! 数据访问层
//!
//! 所有后端端点都集中在这里：组件不自己拼 URL、不自己读响应，
//! 统一通过 [`InventoryApi`]（带令牌）或 [`login`]/[`register`]（无令牌）访问。
//! 带令牌的请求遇到 401 一律返回 [`ApiError::Unauthorized`]，
//! 由调用方走统一的会话过期路径。

use crate::serde_helper;
use crate::web::HttpClient;
use crate::web::HttpError;
use crate::web::HttpResponse;
use inventrack_shared::{
    AuthResponse, CustomerProfile, ErrorBody, HEADER_AUTH_TOKEN, InventoryItem, LoginRequest,
    MaintenanceRecord, NewItem, NewMaintenanceRecord, RegisterRequest,
};
use serde::Serialize;
use web_sys::AbortSignal;

/// 后端服务地址
pub const API_BASE: &str = "https://backend-inventory-4xuz.onrender.com";

/// 数据层错误
#[derive(Debug)]
pub enum ApiError {
    /// 带令牌的请求被服务端拒绝 (401)，会话已失效
    Unauthorized,
    /// 登录/注册成功但响应里没有令牌
    MissingToken,
    /// 服务端返回非 2xx，附其错误消息体（如有）
    Server { status: u16, message: Option<String> },
    /// 请求没有到达服务端
    Network(String),
    /// 负载编解码失败
    Decode(String),
    /// 请求随组件卸载被取消
    Aborted,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "unauthorized (401)"),
            ApiError::MissingToken => write!(f, "token missing from auth response"),
            ApiError::Server {
                status,
                message: Some(message),
            } => write!(f, "server returned {}: {}", status, message),
            ApiError::Server {
                status,
                message: None,
            } => write!(f, "server returned {}", status),
            ApiError::Network(e) => write!(f, "network error: {}", e),
            ApiError::Decode(e) => write!(f, "invalid payload: {}", e),
            ApiError::Aborted => write!(f, "request aborted"),
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Aborted => ApiError::Aborted,
            HttpError::ResponseParseFailed(msg) => ApiError::Decode(msg),
            HttpError::RequestBuildFailed(msg) | HttpError::NetworkError(msg) => {
                ApiError::Network(msg)
            }
        }
    }
}

/// 拼接 base 与 path，容忍 path 是否带前导斜杠
fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// 读取非 2xx 响应中的错误消息体
async fn error_from_response(res: HttpResponse) -> ApiError {
    let status = res.status();
    let message = match res.text().await {
        Ok(body) => serde_helper::from_json_string::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message),
        Err(_) => None,
    };
    ApiError::Server { status, message }
}

/// 带令牌的 API 客户端，登录成功后放入会话状态
#[derive(Clone, Debug, PartialEq)]
pub struct InventoryApi {
    base_url: String,
    token: String,
}

impl InventoryApi {
    pub fn new(token: String) -> Self {
        Self {
            base_url: API_BASE.to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// 带令牌接口的统一状态码检查：401 一律视为会话失效
    async fn check_authed(res: HttpResponse) -> Result<HttpResponse, ApiError> {
        if res.status() == 401 {
            return Err(ApiError::Unauthorized);
        }
        if !res.ok() {
            return Err(error_from_response(res).await);
        }
        Ok(res)
    }

    /// 获取物品列表
    pub async fn list_items(
        &self,
        signal: Option<&AbortSignal>,
    ) -> Result<Vec<InventoryItem>, ApiError> {
        let res = HttpClient::get(&self.url("/api/items"))
            .header("Content-Type", "application/json")
            .header(HEADER_AUTH_TOKEN, &self.token)
            .signal(signal)
            .send()
            .await?;
        let res = Self::check_authed(res).await?;

        let body = res.text().await?;
        let parsed =
            js_sys::JSON::parse(&body).map_err(|e| ApiError::Decode(format!("{:?}", e)))?;
        // 服务端偶尔返回非数组负载，按空列表处理
        if !js_sys::Array::is_array(&parsed) {
            return Ok(Vec::new());
        }
        serde_helper::from_value(parsed).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 新增物品
    pub async fn add_item(
        &self,
        item: &NewItem,
        signal: Option<&AbortSignal>,
    ) -> Result<(), ApiError> {
        let body = serde_helper::to_json_string(item).map_err(|e| ApiError::Decode(e.to_string()))?;
        let res = HttpClient::post(&self.url("/api/items"))
            .header("Content-Type", "application/json")
            .header(HEADER_AUTH_TOKEN, &self.token)
            .body(body)
            .signal(signal)
            .send()
            .await?;
        Self::check_authed(res).await?;
        Ok(())
    }

    /// 更新物品（整条覆盖，含 id）
    pub async fn update_item(
        &self,
        item: &InventoryItem,
        signal: Option<&AbortSignal>,
    ) -> Result<(), ApiError> {
        let body = serde_helper::to_json_string(item).map_err(|e| ApiError::Decode(e.to_string()))?;
        let res = HttpClient::put(&self.url(&format!("/api/items/{}", item.id)))
            .header("Content-Type", "application/json")
            .header(HEADER_AUTH_TOKEN, &self.token)
            .body(body)
            .signal(signal)
            .send()
            .await?;
        Self::check_authed(res).await?;
        Ok(())
    }

    /// 删除物品
    pub async fn delete_item(
        &self,
        id: &str,
        signal: Option<&AbortSignal>,
    ) -> Result<(), ApiError> {
        let res = HttpClient::delete(&self.url(&format!("/api/items/{}", id)))
            .header("Content-Type", "application/json")
            .header(HEADER_AUTH_TOKEN, &self.token)
            .signal(signal)
            .send()
            .await?;
        Self::check_authed(res).await?;
        Ok(())
    }

    /// 获取单个物品的维护记录
    pub async fn maintenance_for_item(
        &self,
        item_id: &str,
        signal: Option<&AbortSignal>,
    ) -> Result<Vec<MaintenanceRecord>, ApiError> {
        let res = HttpClient::get(&self.url(&format!("/api/maintenance/{}", item_id)))
            .header("Content-Type", "application/json")
            .header(HEADER_AUTH_TOKEN, &self.token)
            .signal(signal)
            .send()
            .await?;
        let res = Self::check_authed(res).await?;

        let body = res.text().await?;
        serde_helper::from_json_string(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 新增维护记录
    pub async fn add_maintenance(
        &self,
        record: &NewMaintenanceRecord,
        signal: Option<&AbortSignal>,
    ) -> Result<(), ApiError> {
        let body =
            serde_helper::to_json_string(record).map_err(|e| ApiError::Decode(e.to_string()))?;
        let res = HttpClient::post(&self.url("/api/maintenance"))
            .header("Content-Type", "application/json")
            .header(HEADER_AUTH_TOKEN, &self.token)
            .body(body)
            .signal(signal)
            .send()
            .await?;
        Self::check_authed(res).await?;
        Ok(())
    }

    /// 删除维护记录
    pub async fn delete_maintenance(
        &self,
        id: &str,
        signal: Option<&AbortSignal>,
    ) -> Result<(), ApiError> {
        let res = HttpClient::delete(&self.url(&format!("/api/maintenance/{}", id)))
            .header("Content-Type", "application/json")
            .header(HEADER_AUTH_TOKEN, &self.token)
            .signal(signal)
            .send()
            .await?;
        Self::check_authed(res).await?;
        Ok(())
    }

    /// 获取当前用户资料
    pub async fn profile(
        &self,
        signal: Option<&AbortSignal>,
    ) -> Result<CustomerProfile, ApiError> {
        let res = HttpClient::get(&self.url("/api/customers/profile"))
            .header("Content-Type", "application/json")
            .header(HEADER_AUTH_TOKEN, &self.token)
            .signal(signal)
            .send()
            .await?;
        let res = Self::check_authed(res).await?;

        let body = res.text().await?;
        serde_helper::from_json_string(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// 登录（无令牌）
pub async fn login(
    req: &LoginRequest,
    signal: Option<&AbortSignal>,
) -> Result<AuthResponse, ApiError> {
    post_credentials("/api/customers/login", req, signal).await
}

/// 注册（无令牌），成功时同样返回令牌
pub async fn register(
    req: &RegisterRequest,
    signal: Option<&AbortSignal>,
) -> Result<AuthResponse, ApiError> {
    post_credentials("/api/customers/register", req, signal).await
}

async fn post_credentials<T: Serialize>(
    path: &str,
    req: &T,
    signal: Option<&AbortSignal>,
) -> Result<AuthResponse, ApiError> {
    let body = serde_helper::to_json_string(req).map_err(|e| ApiError::Decode(e.to_string()))?;
    let res = HttpClient::post(&join_url(API_BASE, path))
        .header("Content-Type", "application/json")
        .body(body)
        .signal(signal)
        .send()
        .await?;

    // 登录接口的 401 表示凭据错误，保留服务端消息而不是当作会话过期
    if !res.ok() {
        return Err(error_from_response(res).await);
    }

    let body = res.text().await?;
    serde_helper::from_json_string(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_tolerates_leading_slash() {
        assert_eq!(join_url("http://x", "/api/items"), "http://x/api/items");
        assert_eq!(join_url("http://x", "api/items"), "http://x/api/items");
    }

    #[test]
    fn test_api_base_has_no_trailing_slash() {
        assert!(!API_BASE.ends_with('/'));
    }

    #[test]
    fn test_http_error_mapping() {
        assert!(matches!(
            ApiError::from(HttpError::Aborted),
            ApiError::Aborted
        ));
        assert!(matches!(
            ApiError::from(HttpError::NetworkError("down".into())),
            ApiError::Network(_)
        ));
        assert!(matches!(
            ApiError::from(HttpError::ResponseParseFailed("bad".into())),
            ApiError::Decode(_)
        ));
    }

    #[test]
    fn test_server_error_display_includes_message() {
        let with_message = ApiError::Server {
            status: 400,
            message: Some("Invalid credentials".to_string()),
        };
        assert_eq!(
            with_message.to_string(),
            "server returned 400: Invalid credentials"
        );

        let without_message = ApiError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(without_message.to_string(), "server returned 500");
    }
}
