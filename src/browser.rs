//! Browser Helpers
//!
//! Thin wrappers over `window.location`, `history` and `localStorage`.

use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

use crate::error::{ApiError, ApiResult};

fn js_err(e: JsValue) -> ApiError {
    ApiError::Browser(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

pub fn window() -> ApiResult<Window> {
    web_sys::window().ok_or_else(|| ApiError::Browser("no window".into()))
}

pub fn origin() -> ApiResult<String> {
    window()?.location().origin().map_err(js_err)
}

pub fn pathname() -> String {
    window()
        .and_then(|w| w.location().pathname().map_err(js_err))
        .unwrap_or_else(|_| "/".to_string())
}

/// Full page navigation
pub fn navigate(href: &str) -> ApiResult<()> {
    window()?.location().set_href(href).map_err(js_err)
}

/// Current URL fragment without the leading `#` (empty when absent)
pub fn fragment() -> String {
    window()
        .and_then(|w| w.location().hash().map_err(js_err))
        .map(|h| h.trim_start_matches('#').to_string())
        .unwrap_or_default()
}

/// Drop the fragment from the address bar without reloading
pub fn clear_fragment() -> ApiResult<()> {
    let window = window()?;
    let location = window.location();
    let path = location.pathname().map_err(js_err)?;
    let search = location.search().map_err(js_err)?;
    window
        .history()
        .map_err(js_err)?
        .replace_state_with_url(&JsValue::NULL, "", Some(&format!("{}{}", path, search)))
        .map_err(js_err)
}

fn local_storage() -> ApiResult<Storage> {
    window()?
        .local_storage()
        .map_err(js_err)?
        .ok_or_else(|| ApiError::Browser("localStorage unavailable".into()))
}

pub fn storage_get(key: &str) -> ApiResult<Option<String>> {
    local_storage()?.get_item(key).map_err(js_err)
}

pub fn storage_set(key: &str, value: &str) -> ApiResult<()> {
    local_storage()?.set_item(key, value).map_err(js_err)
}

pub fn storage_remove(key: &str) -> ApiResult<()> {
    local_storage()?.remove_item(key).map_err(js_err)
}
