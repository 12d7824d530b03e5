//! The shared preview popup element.
//!
//! One popup is created per page: a header with the preview title and a close
//! button, an iframe for remote detail pages, and a body for custom items.
//! All lifecycle decisions live in the engine's controller; this view only
//! renders and hides.

use shoplist_engine::constants::{PREVIEW_HIDDEN_CHROME, PREVIEW_TITLE_SELECTOR};
use shoplist_engine::{CustomPreview, PreviewSource, Rect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, HtmlIFrameElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::dom;

const PREVIEW_STYLE_ID: &str = "shoplist-preview-chrome";
const BLANK: &str = "about:blank";
const OPEN_CLASS: &str = "shoplist-open";

pub struct PopupView {
    root: Element,
    title: Element,
    close: Element,
    frame: HtmlIFrameElement,
    body: Element,
}

impl PopupView {
    /// Build the popup and append it to `<body>`, hidden.
    ///
    /// # Errors
    /// Returns an error if the document has no body or refuses an element.
    pub fn create() -> Result<Self, JsValue> {
        let doc = dom::document().ok_or_else(|| JsValue::from_str("document unavailable"))?;
        let root = dom::create("div", "shoplist-popup", None)?;
        root.set_attribute("role", "dialog")?;
        root.set_attribute("aria-hidden", "true")?;

        let header = dom::create("div", "shoplist-popup-header", None)?;
        let title = dom::create("span", "shoplist-popup-title", None)?;
        let close = dom::create("button", "shoplist-popup-close", Some("×"))?;
        close.set_attribute("type", "button")?;
        close.set_attribute("aria-label", "Close preview")?;
        header.append_child(&title)?;
        header.append_child(&close)?;

        let frame: HtmlIFrameElement = dom::create("iframe", "shoplist-popup-frame", None)?
            .dyn_into()
            .map_err(JsValue::from)?;
        frame.set_src(BLANK);
        let body = dom::create("div", "shoplist-popup-body", None)?;

        root.append_child(&header)?;
        root.append_child(&frame)?;
        root.append_child(&body)?;
        doc.body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?
            .append_child(&root)?;

        Ok(Self {
            root,
            title,
            close,
            frame,
            body,
        })
    }

    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    #[must_use]
    pub const fn close_button(&self) -> &Element {
        &self.close
    }

    #[must_use]
    pub const fn frame(&self) -> &HtmlIFrameElement {
        &self.frame
    }

    #[must_use]
    pub fn contains(&self, el: &Element) -> bool {
        self.root.contains(Some(el))
    }

    /// Whether the pointer is currently over the popup.
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.root.matches(":hover").unwrap_or(false)
    }

    pub fn render(&self, source: &PreviewSource, rect: Rect) {
        self.title.set_text_content(Some(source.title()));
        match source {
            PreviewSource::Remote { url, .. } => {
                self.body.set_inner_html("");
                dom::set_style(&self.body, "display", "none");
                dom::set_style(&self.frame, "display", "block");
                self.frame.set_src(url);
            }
            PreviewSource::Custom(preview) => {
                self.frame.set_src(BLANK);
                dom::set_style(&self.frame, "display", "none");
                dom::set_style(&self.body, "display", "block");
                if let Err(err) = self.fill_custom(preview) {
                    log::warn!("Could not render custom preview: {}", dom::js_error_message(&err));
                }
            }
        }
        dom::set_style(&self.root, "left", &format!("{}px", rect.left));
        dom::set_style(&self.root, "top", &format!("{}px", rect.top));
        dom::set_style(&self.root, "width", &format!("{}px", rect.width));
        dom::set_style(&self.root, "height", &format!("{}px", rect.height));
        let _ = self.root.class_list().add_1(OPEN_CLASS);
        let _ = self.root.set_attribute("aria-hidden", "false");
    }

    /// Hide and point the frame at a blank page so in-flight loads stop.
    pub fn hide(&self) {
        let _ = self.root.class_list().remove_1(OPEN_CLASS);
        let _ = self.root.set_attribute("aria-hidden", "true");
        self.frame.set_src(BLANK);
    }

    fn fill_custom(&self, preview: &CustomPreview) -> Result<(), JsValue> {
        self.body.set_inner_html("");
        let list = dom::create("dl", "", None)?;
        let fields = [
            ("Name", preview.name.as_str()),
            ("Rarity", preview.rarity.as_str()),
            ("Value", preview.value.as_str()),
            ("Description", preview.description.as_str()),
        ];
        for (label, value) in fields {
            if value.is_empty() {
                continue;
            }
            let term = dom::create("dt", "", Some(label))?;
            list.append_child(&term)?;
            let definition = dom::create("dd", "", Some(value))?;
            list.append_child(&definition)?;
        }
        self.body.append_child(&list)?;
        Ok(())
    }
}

/// Hide the detail page's navigation chrome and scroll to its title.
///
/// Cross-origin documents are not reachable; that is reported as an error
/// and the page is shown as loaded.
///
/// # Errors
/// Returns an error if the embedded document is inaccessible.
pub fn shape_remote(frame: &HtmlIFrameElement) -> Result<(), JsValue> {
    if frame.src().is_empty() || frame.src() == BLANK {
        return Ok(());
    }
    let doc = frame
        .content_document()
        .ok_or_else(|| JsValue::from_str("preview document is not accessible"))?;
    if doc.get_element_by_id(PREVIEW_STYLE_ID).is_none()
        && let Some(head) = doc.head()
    {
        let style = doc.create_element("style")?;
        style.set_id(PREVIEW_STYLE_ID);
        style.set_text_content(Some(&format!(
            "{PREVIEW_HIDDEN_CHROME} {{ display: none !important; }}"
        )));
        head.append_child(&style)?;
    }
    if let Some(title) = doc.query_selector(PREVIEW_TITLE_SELECTOR)? {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Instant);
        options.set_block(ScrollLogicalPosition::Start);
        title.scroll_into_view_with_scroll_into_view_options(&options);
    }
    Ok(())
}
