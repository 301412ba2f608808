//! 物品表单状态
//!
//! 将零散的 signal 整合为 `ItemFormState`，新增表单与更新弹窗共用：
//! 持有数据、重置、从已有物品预填、转换为请求对象。
//! 转换时把 `<input type="date">` 的值规范化为 ISO 字符串。

use inventrack_shared::date::{date_input_to_iso, iso_to_date_input};
use inventrack_shared::{Category, InventoryItem, NewItem};
use leptos::prelude::*;

/// 表单状态结构体
///
/// `RwSignal` 实现了 `Copy`，适合作为 Props 在组件间传递。
/// `category` 保存 select 控件的原始 value，空串表示未选择。
#[derive(Clone, Copy)]
pub struct ItemFormState {
    pub item_name: RwSignal<String>,
    pub category: RwSignal<String>,
    pub purchase_date: RwSignal<String>,
    pub serial_number: RwSignal<String>,
}

impl ItemFormState {
    pub fn new() -> Self {
        Self {
            item_name: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            purchase_date: RwSignal::new(String::new()),
            serial_number: RwSignal::new(String::new()),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.item_name.set(String::new());
        self.category.set(String::new());
        self.purchase_date.set(String::new());
        self.serial_number.set(String::new());
    }

    /// 从已有物品预填（更新弹窗打开时调用）
    ///
    /// 存储的 ISO 日期转回 `YYYY-MM-DD` 供 date 输入框使用。
    pub fn load(&self, item: &InventoryItem) {
        self.item_name.set(item.item_name.clone());
        self.category.set(item.category.as_str().to_string());
        self.purchase_date
            .set(iso_to_date_input(&item.purchase_date).unwrap_or_default());
        self.serial_number.set(item.serial_number.clone());
    }

    /// 转换为新增请求体
    ///
    /// 类别未选择或日期非法时返回 None，调用方不应发出请求。
    pub fn to_new_item(&self) -> Option<NewItem> {
        let category = Category::from_value(&self.category.get_untracked())?;
        let purchase_date = date_input_to_iso(&self.purchase_date.get_untracked())?;
        Some(NewItem {
            item_name: self.item_name.get_untracked(),
            category,
            purchase_date,
            serial_number: self.serial_number.get_untracked(),
        })
    }

    /// 转换为整条覆盖的更新请求体（带服务端 id）
    pub fn to_item(&self, id: String) -> Option<InventoryItem> {
        let new_item = self.to_new_item()?;
        Some(InventoryItem {
            id,
            item_name: new_item.item_name,
            category: new_item.category,
            purchase_date: new_item.purchase_date,
            serial_number: new_item.serial_number,
        })
    }
}

impl Default for ItemFormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ItemFormState {
        let form = ItemFormState::new();
        form.item_name.set("Laptop".to_string());
        form.category.set("Electronics".to_string());
        form.purchase_date.set("2024-01-01".to_string());
        form.serial_number.set("SN1".to_string());
        form
    }

    #[test]
    fn test_to_new_item_normalizes_date_to_iso() {
        let item = filled_form().to_new_item().unwrap();
        assert_eq!(item.item_name, "Laptop");
        assert_eq!(item.category, Category::Electronics);
        assert_eq!(item.purchase_date, "2024-01-01T00:00:00.000Z");
        assert_eq!(item.serial_number, "SN1");
    }

    #[test]
    fn test_to_new_item_rejects_unselected_category() {
        let form = filled_form();
        form.category.set(String::new());
        assert!(form.to_new_item().is_none());
    }

    #[test]
    fn test_to_new_item_rejects_bad_date() {
        let form = filled_form();
        form.purchase_date.set("not-a-date".to_string());
        assert!(form.to_new_item().is_none());
    }

    #[test]
    fn test_load_prefills_date_input_value() {
        let form = ItemFormState::new();
        form.load(&InventoryItem {
            id: "i1".to_string(),
            item_name: "Desk".to_string(),
            category: Category::Furniture,
            purchase_date: "2023-11-05T00:00:00.000Z".to_string(),
            serial_number: "SN2".to_string(),
        });
        assert_eq!(form.purchase_date.get_untracked(), "2023-11-05");
        assert_eq!(form.category.get_untracked(), "Furniture");
    }

    #[test]
    fn test_to_item_keeps_server_id() {
        let item = filled_form().to_item("abc123".to_string()).unwrap();
        assert_eq!(item.id, "abc123");
        assert_eq!(item.purchase_date, "2024-01-01T00:00:00.000Z");
    }
}
