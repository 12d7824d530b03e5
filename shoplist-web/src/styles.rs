use crate::dom;

const STYLE_ID: &str = "shoplist-styles";

const CSS: &str = r"
.shoplist-popup { position: fixed; z-index: 2147483000; display: none; flex-direction: column;
  background: #fff; border: 1px solid #888; border-radius: 6px; box-shadow: 0 6px 24px rgba(0,0,0,.35); overflow: hidden; }
.shoplist-popup.shoplist-open { display: flex; }
.shoplist-popup-header { display: flex; align-items: center; justify-content: space-between;
  padding: 4px 8px; background: #2b2b2b; color: #fff; font-weight: bold; }
.shoplist-popup-close { background: none; border: none; color: inherit; font-size: 18px; cursor: pointer; }
.shoplist-popup-frame { flex: 1; border: none; width: 100%; }
.shoplist-popup-body { flex: 1; overflow: auto; padding: 12px; }
.shoplist-popup-body dt { font-weight: bold; }
.shoplist-excluded { filter: grayscale(100%); opacity: .45; }
.shoplist-excluded .shoplist-price { text-decoration: line-through; }
.shoplist-price { cursor: text; }
.shoplist-price-input { width: 8em; }
.shoplist-toggle, .shoplist-delete, .shoplist-sort, .shoplist-add-row button { cursor: pointer; margin: 0 4px; }
.shoplist-add-row { display: flex; gap: 8px; padding: 8px 0; }
.shoplist-dialog-backdrop { position: fixed; inset: 0; background: rgba(0,0,0,.4); z-index: 2147483100;
  display: flex; align-items: center; justify-content: center; }
.shoplist-dialog { background: #fff; padding: 16px; border-radius: 6px; min-width: 320px; }
.shoplist-dialog label { display: block; margin-top: 8px; }
.shoplist-dialog input, .shoplist-dialog select, .shoplist-dialog textarea { width: 100%; }
.shoplist-dialog-actions { display: flex; justify-content: flex-end; gap: 8px; margin-top: 12px; }
";

/// Add the stylesheet once per document.
pub fn inject() {
    let Some(doc) = dom::document() else {
        return;
    };
    if doc.get_element_by_id(STYLE_ID).is_some() {
        return;
    }
    let Some(head) = doc.head() else {
        log::warn!("Document has no <head>; styles not injected");
        return;
    };
    match dom::create("style", "", Some(CSS)) {
        Ok(style) => {
            style.set_id(STYLE_ID);
            if let Err(err) = head.append_child(&style) {
                log::warn!("Could not add styles: {}", dom::js_error_message(&err));
            }
        }
        Err(err) => log::warn!("Could not create styles: {}", dom::js_error_message(&err)),
    }
}
