//! serde <-> JsValue 转换工具
//!
//! JSON 编解码通过 `js_sys::JSON` + `serde-wasm-bindgen` 完成，
//! 避免把 `serde_json` 编进 WASM 二进制。

use js_sys::wasm_bindgen::JsValue;
use serde::{Serialize, de::DeserializeOwned};

/// 序列化/反序列化错误
#[derive(Debug)]
pub enum Error {
    /// serde-wasm-bindgen 层的结构不匹配
    SerdeWasmBindgen(serde_wasm_bindgen::Error),
    /// JS 侧的 JSON.parse / JSON.stringify 失败
    JsSys(JsValue),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::SerdeWasmBindgen(e) => write!(f, "Serde WASM Bindgen Error: {}", e),
            Error::JsSys(v) => write!(f, "JS Sys Error: {:?}", v),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_wasm_bindgen::Error> for Error {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Error::SerdeWasmBindgen(e)
    }
}

/// Rust 数据结构 -> JsValue
pub fn to_value<T: Serialize>(value: &T) -> Result<JsValue, Error> {
    serde_wasm_bindgen::to_value(value).map_err(Error::from)
}

/// JsValue -> Rust 数据结构
pub fn from_value<T: DeserializeOwned>(value: JsValue) -> Result<T, Error> {
    serde_wasm_bindgen::from_value(value).map_err(Error::from)
}

/// Rust 数据结构 -> JSON 字符串（经 JsValue 和 JSON.stringify）
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String, Error> {
    let js_val = to_value(value)?;
    let json_str = js_sys::JSON::stringify(&js_val)
        .map_err(Error::JsSys)?
        .as_string()
        .ok_or_else(|| Error::JsSys(JsValue::from_str("JSON.stringify returned non-string")))?;
    Ok(json_str)
}

/// JSON 字符串 -> Rust 数据结构（经 JSON.parse 和 JsValue）
pub fn from_json_string<T: DeserializeOwned>(s: &str) -> Result<T, Error> {
    let js_val = js_sys::JSON::parse(s).map_err(Error::JsSys)?;
    from_value(js_val)
}
