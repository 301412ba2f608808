use super::*;
use serde_json::json;

// =========================================================
// 类别 (Category)
// =========================================================

#[test]
fn test_category_from_value_matches_select_options() {
    assert_eq!(Category::from_value("Furniture"), Some(Category::Furniture));
    assert_eq!(
        Category::from_value("Electronics"),
        Some(Category::Electronics)
    );
    assert_eq!(Category::from_value("Books"), Some(Category::Books));
}

#[test]
fn test_category_from_value_rejects_placeholder() {
    // "Select Category" 选项的 value 是空字符串
    assert_eq!(Category::from_value(""), None);
    assert_eq!(Category::from_value("furniture"), None);
}

#[test]
fn test_category_all_round_trips_through_as_str() {
    for cat in Category::ALL {
        assert_eq!(Category::from_value(cat.as_str()), Some(cat));
    }
}

#[test]
fn test_category_serializes_as_plain_string() {
    let v = serde_json::to_value(Category::Electronics).unwrap();
    assert_eq!(v, json!("Electronics"));
}

// =========================================================
// 物品 (Items)
// =========================================================

#[test]
fn test_inventory_item_uses_mongo_id_on_the_wire() {
    let item = InventoryItem {
        id: "abc123".to_string(),
        item_name: "Laptop".to_string(),
        category: Category::Electronics,
        purchase_date: "2024-01-01T00:00:00.000Z".to_string(),
        serial_number: "SN1".to_string(),
    };

    let v = serde_json::to_value(&item).unwrap();
    assert_eq!(v["_id"], json!("abc123"));
    assert!(v.get("id").is_none());
    assert_eq!(v["item_name"], json!("Laptop"));
    assert_eq!(v["serial_number"], json!("SN1"));
}

#[test]
fn test_inventory_item_parses_server_payload() {
    let raw = r#"{
        "_id": "65f0c0ffee",
        "item_name": "Desk",
        "category": "Furniture",
        "purchase_date": "2023-06-15T00:00:00.000Z",
        "serial_number": "D-42",
        "owner": "ignored-extra-field"
    }"#;

    let item: InventoryItem = serde_json::from_str(raw).unwrap();
    assert_eq!(item.id, "65f0c0ffee");
    assert_eq!(item.category, Category::Furniture);
}

#[test]
fn test_new_item_body_has_no_id_field() {
    let new_item = NewItem {
        item_name: "Laptop".to_string(),
        category: Category::Electronics,
        purchase_date: "2024-01-01T00:00:00.000Z".to_string(),
        serial_number: "SN1".to_string(),
    };

    let v = serde_json::to_value(&new_item).unwrap();
    let obj = v.as_object().unwrap();
    assert!(!obj.contains_key("_id"));
    assert!(!obj.contains_key("id"));
    assert_eq!(obj.len(), 4);
}

// =========================================================
// 维护记录 (Maintenance)
// =========================================================

#[test]
fn test_maintenance_record_round_trip() {
    let raw = r#"{
        "_id": "m1",
        "service_type": "Screen repair",
        "date_of_service": "2024-02-10",
        "cost": 1499.5,
        "item_id": "abc123"
    }"#;

    let rec: MaintenanceRecord = serde_json::from_str(raw).unwrap();
    assert_eq!(rec.id, "m1");
    assert_eq!(rec.cost, 1499.5);

    let v = serde_json::to_value(&rec).unwrap();
    assert_eq!(v["_id"], json!("m1"));
    assert_eq!(v["item_id"], json!("abc123"));
}

#[test]
fn test_new_maintenance_record_body_shape() {
    let body = NewMaintenanceRecord {
        service_type: "Oil change".to_string(),
        date_of_service: "2024-05-01".to_string(),
        cost: 300.0,
        item_id: "i9".to_string(),
    };

    let v = serde_json::to_value(&body).unwrap();
    assert_eq!(
        v,
        json!({
            "service_type": "Oil change",
            "date_of_service": "2024-05-01",
            "cost": 300.0,
            "item_id": "i9"
        })
    );
}

// =========================================================
// 认证 (Auth)
// =========================================================

#[test]
fn test_login_request_body_shape() {
    let req = LoginRequest {
        email: "a@b.c".to_string(),
        password: "hunter2".to_string(),
    };
    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(v, json!({ "email": "a@b.c", "password": "hunter2" }));
}

#[test]
fn test_register_request_body_shape() {
    let req = RegisterRequest {
        name: "Riya".to_string(),
        password: "hunter2".to_string(),
        email: "a@b.c".to_string(),
    };
    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(
        v,
        json!({ "name": "Riya", "password": "hunter2", "email": "a@b.c" })
    );
}

#[test]
fn test_auth_response_token_is_optional() {
    let with: AuthResponse = serde_json::from_str(r#"{"token":"t0k"}"#).unwrap();
    assert_eq!(with.token.as_deref(), Some("t0k"));

    // 成功响应缺 token 字段时不报错，由 UI 判定为失败
    let without: AuthResponse = serde_json::from_str(r#"{"msg":"ok"}"#).unwrap();
    assert!(without.token.is_none());
}

#[test]
fn test_error_body_message_is_optional() {
    let with: ErrorBody = serde_json::from_str(r#"{"message":"Invalid credentials"}"#).unwrap();
    assert_eq!(with.message.as_deref(), Some("Invalid credentials"));

    let without: ErrorBody = serde_json::from_str(r#"{}"#).unwrap();
    assert!(without.message.is_none());
}

#[test]
fn test_profile_reads_name_only() {
    let profile: CustomerProfile =
        serde_json::from_str(r#"{"name":"Riya","email":"a@b.c"}"#).unwrap();
    assert_eq!(profile.name, "Riya");
}

#[test]
fn test_auth_header_constant() {
    // 后端校验的是小写自定义头
    assert_eq!(HEADER_AUTH_TOKEN, "x-auth-token");
}
