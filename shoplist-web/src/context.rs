//! Shared handle passed to every listener.
//!
//! The session is borrowed only for the duration of one engine call. Effects
//! and DOM updates run after the borrow is released, because DOM changes can
//! fire listeners synchronously (an input's blur on removal, for instance).

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use shoplist_engine::{
    ContentChange, CustomItemDraft, HostSelectors, ItemId, Placement, Point, PopupEffect,
    PopupEvent, PreviewSource, ShopConfig, ShopSession, SortColumn, TimerToken, Viewport,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlAnchorElement, KeyboardEvent, MouseEvent};
use yew::{AppHandle, Callback, Renderer};

use crate::components::add_item_dialog::{AddItemDialog, AddItemDialogProps};
use crate::dom;
use crate::location::BrowserHistory;
use crate::page::{self, WebPage};
use crate::popup::{PopupView, shape_remote};

pub type Session = ShopSession<BrowserHistory, Element>;

struct DialogMount {
    host: Element,
    handle: AppHandle<AddItemDialog>,
}

#[derive(Clone)]
pub struct ShopContext {
    session: Rc<RefCell<Session>>,
    selectors: Rc<HostSelectors>,
    placement: Placement,
    popup: Rc<PopupView>,
    timers: Rc<RefCell<BTreeMap<TimerToken, i32>>>,
    dialog: Rc<RefCell<Option<DialogMount>>>,
}

impl ShopContext {
    /// Hydrate from the current URL and create the popup.
    ///
    /// # Errors
    /// Returns an error if the popup element cannot be created.
    pub fn new(config: ShopConfig) -> Result<Self, JsValue> {
        let popup = PopupView::create()?;
        let selectors = Rc::new(config.selectors.clone());
        let placement = config.placement;
        let session = ShopSession::new(BrowserHistory, config);
        Ok(Self {
            session: Rc::new(RefCell::new(session)),
            selectors,
            placement,
            popup: Rc::new(popup),
            timers: Rc::new(RefCell::new(BTreeMap::new())),
            dialog: Rc::new(RefCell::new(None)),
        })
    }

    #[must_use]
    pub fn selectors(&self) -> &HostSelectors {
        &self.selectors
    }

    #[must_use]
    pub fn popup(&self) -> &PopupView {
        &self.popup
    }

    #[must_use]
    pub fn page(&self) -> WebPage {
        WebPage::new(self.clone())
    }

    pub fn initialize(&self) {
        let mut page = self.page();
        let report = self.session.borrow_mut().initialize(&mut page);
        log::info!(
            "Shop list ready: {} rows decorated, {} custom items",
            report.rows_decorated,
            report.custom_added
        );
    }

    /// Feed a content change in; schedules one deferred refresh per burst.
    pub fn content_changed(&self, change: ContentChange) {
        let schedule = self.session.borrow_mut().notify_change(change);
        if !schedule {
            return;
        }
        let ctx = self.clone();
        if let Err(err) = dom::set_timeout(0, move || ctx.refresh()) {
            log::warn!("Could not schedule refresh: {}", dom::js_error_message(&err));
        }
    }

    fn refresh(&self) {
        let mut page = self.page();
        let report = self.session.borrow_mut().refresh(&mut page);
        if report.changed() {
            log::debug!("Refreshed after content change: {report:?}");
        }
    }

    pub fn dispatch(&self, event: PopupEvent<Element>) {
        let effects = self.session.borrow_mut().popup_mut().handle(event);
        for effect in effects {
            self.perform(effect);
        }
    }

    fn perform(&self, effect: PopupEffect<Element>) {
        match effect {
            PopupEffect::StartTimer {
                token, delay_ms, ..
            } => {
                let ctx = self.clone();
                match dom::set_timeout(delay_ms, move || ctx.timer_fired(token)) {
                    Ok(handle) => {
                        self.timers.borrow_mut().insert(token, handle);
                    }
                    Err(err) => {
                        log::warn!("Could not start popup timer: {}", dom::js_error_message(&err));
                    }
                }
            }
            PopupEffect::CancelTimer { token } => {
                let handle = self.timers.borrow_mut().remove(&token);
                if let Some(handle) = handle {
                    dom::clear_timeout(handle);
                }
            }
            PopupEffect::Render {
                source, pointer, ..
            } => {
                let rect = self.placement.place(viewport(), pointer);
                self.popup.render(&source, rect);
            }
            PopupEffect::Hide => self.popup.hide(),
        }
    }

    fn timer_fired(&self, token: TimerToken) {
        self.timers.borrow_mut().remove(&token);
        self.dispatch(PopupEvent::TimerFired {
            token,
            pointer_over_popup: self.popup.is_hovered(),
        });
    }

    /// Pointer entered a detail link.
    pub fn hover_link(&self, link: &Element, event: &MouseEvent) {
        let url = link.dyn_ref::<HtmlAnchorElement>().map_or_else(
            || link.get_attribute("href").unwrap_or_default(),
            HtmlAnchorElement::href,
        );
        let title = link.text_content().unwrap_or_default().trim().to_string();
        self.dispatch(PopupEvent::HoverEnter {
            target: link.clone(),
            source: PreviewSource::Remote { url, title },
            pointer: pointer(event),
        });
    }

    /// Pointer entered the name of custom item `id`.
    pub fn hover_custom(&self, target: &Element, id: &str, event: &MouseEvent) {
        let source = self.session.borrow().custom_preview(id);
        if let Some(source) = source {
            self.dispatch(PopupEvent::HoverEnter {
                target: target.clone(),
                source,
                pointer: pointer(event),
            });
        }
    }

    pub fn hover_leave(&self, target: &Element) {
        self.dispatch(PopupEvent::HoverLeave {
            target: target.clone(),
        });
    }

    pub fn toggle_excluded(&self, row: &Element, id: &ItemId) {
        let excluded = self.session.borrow_mut().list_mut().toggle_excluded(id);
        page::show_excluded(row, excluded);
    }

    /// Commit an edited price and return the text to display.
    pub fn commit_price(&self, id: &ItemId, value: &str) -> String {
        let fallback = self.base_price(id);
        self.session
            .borrow_mut()
            .list_mut()
            .commit_price_edit(id, value, &fallback)
    }

    /// What a row shows without an override.
    fn base_price(&self, id: &ItemId) -> String {
        if let Some(record) = self.session.borrow().list().state().custom_item(id.as_str()) {
            return record.price.clone();
        }
        page::original_price_of(id).unwrap_or_default()
    }

    pub fn sort(&self, column: SortColumn) {
        let mut page = self.page();
        self.session.borrow_mut().sort_by(&mut page, column);
    }

    pub fn delete_custom(&self, id: &ItemId) {
        let mut page = self.page();
        let removed = self.session.borrow_mut().delete_custom_item(&mut page, id);
        if removed {
            log::info!("Removed custom item {id}");
        }
    }

    pub fn reset(&self) {
        let mut page = self.page();
        self.session.borrow_mut().reset(&mut page);
        log::info!("Shop list reset");
    }

    pub fn open_dialog(&self) {
        if self.dialog.borrow().is_some() {
            return;
        }
        let Some(body) = dom::document().and_then(|doc| doc.body()) else {
            return;
        };
        let host = match dom::create("div", "shoplist-dialog-host", None) {
            Ok(host) => host,
            Err(err) => {
                log::warn!("Could not open dialog: {}", dom::js_error_message(&err));
                return;
            }
        };
        if let Err(err) = body.append_child(&host) {
            log::warn!("Could not open dialog: {}", dom::js_error_message(&err));
            return;
        }
        let props = AddItemDialogProps {
            on_submit: {
                let ctx = self.clone();
                Callback::from(move |draft: CustomItemDraft| ctx.submit_draft(draft))
            },
            on_close: {
                let ctx = self.clone();
                Callback::from(move |()| ctx.close_dialog())
            },
        };
        let handle = Renderer::<AddItemDialog>::with_root_and_props(host.clone(), props).render();
        *self.dialog.borrow_mut() = Some(DialogMount { host, handle });
    }

    /// Tear the dialog down after the current event finishes.
    pub fn close_dialog(&self) {
        let dialog = self.dialog.clone();
        let teardown = move || {
            if let Some(mount) = dialog.borrow_mut().take() {
                mount.handle.destroy();
                mount.host.remove();
            }
        };
        if let Err(err) = dom::set_timeout(0, teardown) {
            log::warn!("Could not close dialog: {}", dom::js_error_message(&err));
        }
    }

    fn submit_draft(&self, draft: CustomItemDraft) {
        let mut page = self.page();
        let result = self
            .session
            .borrow_mut()
            .add_custom_item(&mut page, draft, dom::now_ms());
        match result {
            Ok(_) => self.close_dialog(),
            Err(err) => {
                log::info!("Rejected custom item: {err}");
                if let Err(shown) = dom::alert(&err.to_string()) {
                    log::warn!("Could not show message: {}", dom::js_error_message(&shown));
                }
            }
        }
    }

    /// Document-level and popup listeners.
    ///
    /// # Errors
    /// Returns an error if a listener cannot be attached.
    pub fn bind_document(&self) -> Result<(), JsValue> {
        let doc = dom::document().ok_or_else(|| JsValue::from_str("document unavailable"))?;
        {
            let ctx = self.clone();
            dom::listen(&doc, "click", move |event: MouseEvent| {
                let Some(target) = dom::event_element(&event) else {
                    return;
                };
                let on_previewable = target
                    .closest(&format!("[{}]", page::LISTENER_ATTR))
                    .ok()
                    .flatten()
                    .is_some();
                ctx.dispatch(PopupEvent::DocumentClick {
                    inside_popup: ctx.popup.contains(&target),
                    on_previewable,
                });
            })?;
        }
        {
            let ctx = self.clone();
            dom::listen(&doc, "keydown", move |event: KeyboardEvent| {
                if event.key() == "Escape" {
                    ctx.dispatch(PopupEvent::EscapePressed);
                }
            })?;
        }
        {
            let ctx = self.clone();
            dom::listen(self.popup.close_button(), "click", move |event: MouseEvent| {
                event.stop_propagation();
                ctx.dispatch(PopupEvent::CloseRequested);
            })?;
        }
        {
            let ctx = self.clone();
            dom::listen(self.popup.root(), "mouseleave", move |_: MouseEvent| {
                ctx.dispatch(PopupEvent::PopupPointerLeave);
            })?;
        }
        {
            let frame = self.popup.frame().clone();
            dom::listen(self.popup.frame(), "load", move |_: web_sys::Event| {
                if let Err(err) = shape_remote(&frame) {
                    log::debug!("Preview left unshaped: {}", dom::js_error_message(&err));
                }
            })?;
        }
        Ok(())
    }
}

fn pointer(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn viewport() -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    dom::window().map_or(
        Viewport {
            width: 0.0,
            height: 0.0,
        },
        |w| Viewport {
            width: dimension(w.inner_width()),
            height: dimension(w.inner_height()),
        },
    )
}
