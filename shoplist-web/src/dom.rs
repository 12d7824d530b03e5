use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Show a blocking message to the user.
///
/// # Errors
/// Returns an error if there is no window or the page refuses the dialog.
pub fn alert(message: &str) -> Result<(), JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("window unavailable"))?
        .alert_with_message(message)
}

/// Milliseconds since the epoch, from the JS clock.
#[must_use]
pub fn now_ms() -> u64 {
    // Date.now() is a non-negative integral f64 well inside u64 range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let now = js_sys::Date::now().max(0.0) as u64;
    now
}

/// Run `callback` once after `delay_ms`. Returns the browser timer handle.
///
/// # Errors
/// Returns an error if there is no window or the timer cannot be scheduled.
pub fn set_timeout(delay_ms: u32, callback: impl FnOnce() + 'static) -> Result<i32, JsValue> {
    let window = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    let closure = Closure::once(callback);
    let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        timeout,
    )?;
    closure.forget();
    Ok(handle)
}

pub fn clear_timeout(handle: i32) {
    if let Some(window) = window() {
        window.clear_timeout_with_handle(handle);
    }
}

/// Attach a listener that lives as long as the page.
///
/// # Errors
/// Returns an error if the browser rejects the listener.
pub fn listen<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Every element under `root` matching `selector`, in document order.
#[must_use]
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(err) => {
            log::warn!("Bad selector {selector:?}: {}", js_error_message(&err));
            Vec::new()
        }
    }
}

/// Like [`query_all`], starting from the document element.
#[must_use]
pub fn query_document(selector: &str) -> Vec<Element> {
    document()
        .and_then(|doc| doc.document_element())
        .map(|root| query_all(&root, selector))
        .unwrap_or_default()
}

/// Create an element with a class list and optional text.
///
/// # Errors
/// Returns an error if the document is unavailable or refuses the tag.
pub fn create(tag: &str, class: &str, text: Option<&str>) -> Result<Element, JsValue> {
    let doc = document().ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let el = doc.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    if let Some(text) = text {
        el.set_text_content(Some(text));
    }
    Ok(el)
}

/// Set an inline style property, logging rather than failing.
pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>()
        && let Err(err) = html.style().set_property(property, value)
    {
        log::debug!("Could not set {property}: {}", js_error_message(&err));
    }
}

/// The event's target as an element, if it is one.
#[must_use]
pub fn event_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

/// Strip a simple `.class` selector down to its class name.
#[must_use]
pub fn class_of(selector: &str) -> Option<&str> {
    let class = selector.trim().strip_prefix('.')?;
    let simple = !class.is_empty()
        && class
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    simple.then_some(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_of_accepts_only_simple_class_selectors() {
        assert_eq!(class_of(".col-rarity"), Some("col-rarity"));
        assert_eq!(class_of(" .col_value "), Some("col_value"));
        assert_eq!(class_of("td.col-rarity"), None);
        assert_eq!(class_of(".a .b"), None);
        assert_eq!(class_of("."), None);
    }
}
