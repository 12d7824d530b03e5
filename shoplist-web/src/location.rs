use shoplist_engine::UrlHistory;
use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::dom;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("browser window is unavailable")]
    Unavailable,
    #[error("history update rejected: {0}")]
    Rejected(String),
}

impl From<JsValue> for LocationError {
    fn from(value: JsValue) -> Self {
        Self::Rejected(dom::js_error_message(&value))
    }
}

/// The address bar, written with `history.replaceState` so edits never add
/// history entries or reload the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

/// Path plus `?query` plus hash, as passed to `replaceState`.
#[must_use]
pub fn replacement_url(pathname: &str, query: &str, hash: &str) -> String {
    if query.is_empty() {
        format!("{pathname}{hash}")
    } else {
        format!("{pathname}?{query}{hash}")
    }
}

impl UrlHistory for BrowserHistory {
    type Error = LocationError;

    fn current_url(&self) -> String {
        dom::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default()
    }

    fn replace_query(&self, query: &str) -> Result<(), Self::Error> {
        let window = dom::window().ok_or(LocationError::Unavailable)?;
        let location = window.location();
        let url = replacement_url(&location.pathname()?, query, &location.hash()?);
        window
            .history()?
            .replace_state_with_url(&JsValue::NULL, "", Some(&url))?;
        Ok(())
    }
}
