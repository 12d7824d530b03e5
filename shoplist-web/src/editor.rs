use std::cell::RefCell;
use std::rc::Rc;

use shoplist_engine::{EditEnd, EditOutcome, ItemId, PriceEditor, strip_price_label};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, HtmlInputElement, KeyboardEvent, MouseEvent};

use crate::context::ShopContext;
use crate::{dom, page};

const INPUT_CLASS: &str = "shoplist-price-input";

/// Make `cell` click-to-edit for item `id`.
///
/// # Errors
/// Returns an error if the click listener cannot be attached.
pub fn attach(ctx: &ShopContext, cell: &Element, id: ItemId) -> Result<(), JsValue> {
    let editor = Rc::new(RefCell::new(PriceEditor::new()));
    let ctx = ctx.clone();
    let target = cell.clone();
    dom::listen(cell, "click", move |event: MouseEvent| {
        event.stop_propagation();
        let text = target.text_content().unwrap_or_default();
        let seed = editor.borrow_mut().begin(&text);
        if let Some(seed) = seed
            && let Err(err) = open(&ctx, &target, &editor, &id, strip_price_label(&seed))
        {
            log::warn!("Could not open price editor: {}", dom::js_error_message(&err));
            let _ = editor.borrow_mut().finish(EditEnd::Discard, "");
        }
    })
}

fn open(
    ctx: &ShopContext,
    cell: &Element,
    editor: &Rc<RefCell<PriceEditor>>,
    id: &ItemId,
    seed: &str,
) -> Result<(), JsValue> {
    let input: HtmlInputElement = dom::create("input", INPUT_CLASS, None)?
        .dyn_into()
        .map_err(JsValue::from)?;
    input.set_type("text");
    input.set_value(seed);
    input.set_attribute("aria-label", "Price")?;

    {
        let (ctx, cell, editor, id) = (ctx.clone(), cell.clone(), editor.clone(), id.clone());
        let field = input.clone();
        dom::listen(&input, "keydown", move |event: KeyboardEvent| {
            let end = match event.key().as_str() {
                "Enter" => EditEnd::Commit,
                "Escape" => EditEnd::Discard,
                _ => return,
            };
            event.prevent_default();
            event.stop_propagation();
            finish(&ctx, &cell, &editor, &id, end, &field.value());
        })?;
    }
    {
        let (ctx, cell, editor, id) = (ctx.clone(), cell.clone(), editor.clone(), id.clone());
        let field = input.clone();
        dom::listen(&input, "blur", move |_: Event| {
            finish(&ctx, &cell, &editor, &id, EditEnd::Commit, &field.value());
        })?;
    }

    cell.set_text_content(None);
    cell.append_child(&input)?;
    input.focus()?;
    input.select();
    Ok(())
}

fn finish(
    ctx: &ShopContext,
    cell: &Element,
    editor: &Rc<RefCell<PriceEditor>>,
    id: &ItemId,
    end: EditEnd,
    value: &str,
) {
    // Replacing the input fires a blur synchronously; the borrow must be
    // released first so that blur sees the editor already closed.
    let outcome = editor.borrow_mut().finish(end, value);
    match outcome {
        EditOutcome::Commit(value) => {
            let shown = ctx.commit_price(id, &value);
            page::show_price(cell, &shown);
        }
        EditOutcome::Restore(original) => cell.set_text_content(Some(&original)),
        EditOutcome::Ignored => {}
    }
}
