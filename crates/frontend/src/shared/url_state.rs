//! Синхронизация состояния редактора с адресной строкой.
//!
//! Параметры читаются один раз при открытии страницы; дальше URL только
//! перезаписывается через `history.replaceState`, без новых записей истории.

use contracts::shared::work_queue::query_params::{parse_query_string, QueryParams};

pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

pub fn current_query() -> QueryParams {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    parse_query_string(&search)
}

/// Заменить текущий URL (путь + query), если он изменился
pub fn replace_url(href: &str) {
    let Some(w) = web_sys::window() else {
        return;
    };
    let location = w.location();
    let current = format!(
        "{}{}",
        location.pathname().unwrap_or_default(),
        location.search().unwrap_or_default()
    );
    if current == href {
        return;
    }
    if let Ok(history) = w.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(href));
    }
}
