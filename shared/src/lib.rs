use serde::{Deserialize, Serialize};

pub mod date;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTH_TOKEN: &str = "x-auth-token";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// Item category, fixed enum shared with the backend's select values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Furniture,
    Electronics,
    Books,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Furniture, Category::Electronics, Category::Books];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Furniture => "Furniture",
            Category::Electronics => "Electronics",
            Category::Books => "Books",
        }
    }

    /// 从 select 控件的 value 解析类别，空字符串（未选择）返回 None
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "Furniture" => Some(Category::Furniture),
            "Electronics" => Some(Category::Electronics),
            "Books" => Some(Category::Books),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    // 服务端是 Mongo 风格的 "_id"
    #[serde(rename = "_id")]
    pub id: String,
    pub item_name: String,
    pub category: Category,
    pub purchase_date: String,
    pub serial_number: String,
}

/// Creation body: same fields as [`InventoryItem`] minus the server-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub item_name: String,
    pub category: Category,
    pub purchase_date: String,
    pub serial_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub service_type: String,
    pub date_of_service: String,
    pub cost: f64,
    pub item_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMaintenanceRecord {
    pub service_type: String,
    pub date_of_service: String,
    pub cost: f64,
    pub item_id: String,
}

// =========================================================
// 认证协议 (Auth Protocol)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub password: String,
    pub email: String,
}

/// Success body of login/register. A missing `token` field is treated as a
/// failed login by the UI, so it stays optional here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
}

/// Error body the backend attaches to non-2xx responses. `message` is
/// surfaced verbatim by the login form when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests;
