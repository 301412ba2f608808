//! 日期转换模块
//!
//! 服务端以字符串形式传输日期：物品的 `purchase_date` 写入时规范化为
//! ISO 字符串（等价于 JS 的 `toISOString()`），维护记录的 `date_of_service`
//! 按表单原值（`YYYY-MM-DD`）写入。此模块集中所有方向的转换，
//! 使用 chrono 实现，便于在非 wasm 目标上测试。

use chrono::{DateTime, NaiveDate, NaiveTime};

/// 宽松解析：先按 RFC 3339 / ISO 8601，再按纯日期 `YYYY-MM-DD`
fn parse_flexible(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// 将 `<input type="date">` 的值转换为 ISO 字符串
///
/// `"2024-01-01"` -> `"2024-01-01T00:00:00.000Z"`（UTC 午夜，毫秒精度，
/// 与 `new Date(v).toISOString()` 一致）。解析失败返回 None。
pub fn date_input_to_iso(value: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let utc = date.and_time(NaiveTime::MIN).and_utc();
    Some(utc.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

/// 将存储的日期字符串转回 `<input type="date">` 可用的 `YYYY-MM-DD`
///
/// 用于更新弹窗的默认值。解析失败返回 None。
pub fn iso_to_date_input(stored: &str) -> Option<String> {
    parse_flexible(stored).map(|d| d.format("%Y-%m-%d").to_string())
}

/// 本地化短日期显示（`M/D/YYYY`），物品卡片使用
///
/// 解析失败时原样返回，避免因脏数据渲染空白。
pub fn display_date(stored: &str) -> String {
    match parse_flexible(stored) {
        Some(d) => d.format("%-m/%-d/%Y").to_string(),
        None => stored.to_string(),
    }
}

/// 维护记录表格的 `DD-MM-YYYY` 显示格式
pub fn format_day_month_year(stored: &str) -> String {
    match parse_flexible(stored) {
        Some(d) => d.format("%d-%m-%Y").to_string(),
        None => stored.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_input_to_iso_is_utc_midnight() {
        assert_eq!(
            date_input_to_iso("2024-01-01").as_deref(),
            Some("2024-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_date_input_to_iso_rejects_garbage() {
        assert_eq!(date_input_to_iso(""), None);
        assert_eq!(date_input_to_iso("01/02/2024"), None);
        assert_eq!(date_input_to_iso("2024-13-40"), None);
    }

    #[test]
    fn test_iso_round_trips_back_to_input_value() {
        let iso = date_input_to_iso("2023-11-05").unwrap();
        assert_eq!(iso_to_date_input(&iso).as_deref(), Some("2023-11-05"));
    }

    #[test]
    fn test_iso_to_date_input_accepts_plain_dates() {
        // 维护记录按表单原值写入，读回时可能仍是纯日期
        assert_eq!(iso_to_date_input("2024-02-29").as_deref(), Some("2024-02-29"));
    }

    #[test]
    fn test_display_date_is_unpadded() {
        assert_eq!(display_date("2024-01-09T00:00:00.000Z"), "1/9/2024");
        assert_eq!(display_date("2024-12-31"), "12/31/2024");
    }

    #[test]
    fn test_display_date_falls_through_on_parse_failure() {
        assert_eq!(display_date("soon"), "soon");
    }

    #[test]
    fn test_format_day_month_year_pads_both_fields() {
        assert_eq!(format_day_month_year("2024-03-07"), "07-03-2024");
        assert_eq!(
            format_day_month_year("2024-10-21T00:00:00.000Z"),
            "21-10-2024"
        );
    }
}
