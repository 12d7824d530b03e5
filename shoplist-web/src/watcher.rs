use js_sys::Array;
use shoplist_engine::ContentChange;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{MutationObserver, MutationObserverInit, MutationRecord, Node};

use crate::context::ShopContext;
use crate::dom;

/// Watch the document for injected content and re-run decoration.
///
/// Mutations inside the popup are ignored; everything else that adds nodes
/// counts, including our own rows, which settle after one idempotent pass.
///
/// # Errors
/// Returns an error if the observer cannot be created or attached.
pub fn watch(ctx: &ShopContext) -> Result<MutationObserver, JsValue> {
    let target: Node = dom::document()
        .and_then(|doc| doc.body())
        .ok_or_else(|| JsValue::from_str("document has no body"))?
        .into();

    let handler_ctx = ctx.clone();
    let callback = Closure::wrap(Box::new(move |records: Array, _observer: MutationObserver| {
        let added = records
            .iter()
            .filter_map(|record| record.dyn_into::<MutationRecord>().ok())
            .filter(|record| {
                !record
                    .target()
                    .is_some_and(|node| handler_ctx.popup().root().contains(Some(&node)))
            })
            .map(|record| usize::try_from(record.added_nodes().length()).unwrap_or(0))
            .sum();
        handler_ctx.content_changed(ContentChange::added(added));
    }) as Box<dyn FnMut(Array, MutationObserver)>);

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    callback.forget();

    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    observer.observe_with_options(&target, &options)?;
    log::debug!("Watching document for injected rows");
    Ok(observer)
}
