//! Host page adapter: rows, links and controls as the engine sees them.

use shoplist_engine::{
    CustomItemRecord, ItemId, RowFacts, ShopPage, SortColumn, SortDirection, SortKey, SortState,
    SortableList, with_price_label,
};
use wasm_bindgen::JsValue;
use web_sys::{Element, MouseEvent};

use crate::context::ShopContext;
use crate::{dom, editor};

pub const DECORATED_ATTR: &str = "data-shoplist-decorated";
pub const ITEM_ID_ATTR: &str = "data-shoplist-id";
pub const ORIGINAL_PRICE_ATTR: &str = "data-original-price";
pub const CUSTOM_ID_ATTR: &str = "data-custom-id";
pub const LISTENER_ATTR: &str = "data-popup-listener";
const SORT_COLUMN_ATTR: &str = "data-sort-column";

const EXCLUDED_CLASS: &str = "shoplist-excluded";
const PRICE_CLASS: &str = "shoplist-price";
const RARITY_CLASS: &str = "shoplist-rarity";
const TOGGLE_CLASS: &str = "shoplist-toggle";
const SORT_CLASS: &str = "shoplist-sort";
const ADD_ROW_CLASS: &str = "shoplist-add-row";
const CUSTOM_ROW_CLASS: &str = "shoplist-custom-row";

pub struct WebPage {
    ctx: ShopContext,
}

/// Reflect exclusion on a row and its toggle button.
pub fn show_excluded(row: &Element, excluded: bool) {
    let _ = row.class_list().toggle_with_force(EXCLUDED_CLASS, excluded);
    if let Ok(Some(toggle)) = row.query_selector(&format!(".{TOGGLE_CLASS}")) {
        toggle.set_text_content(Some(if excluded { "Include" } else { "Exclude" }));
        let _ = toggle.set_attribute("aria-pressed", if excluded { "true" } else { "false" });
    }
}

/// Write a price into its cell, keeping the host's `Label:` prefix.
pub fn show_price(cell: &Element, text: &str) {
    let original = cell
        .closest(&format!("[{ORIGINAL_PRICE_ATTR}]"))
        .ok()
        .flatten()
        .and_then(|row| row.get_attribute(ORIGINAL_PRICE_ATTR));
    let shown = original.map_or_else(|| text.trim().to_string(), |o| with_price_label(&o, text));
    cell.set_text_content(Some(&shown));
}

/// Host price text remembered for a native row.
#[must_use]
pub fn original_price_of(id: &ItemId) -> Option<String> {
    dom::query_document(&format!("[{ITEM_ID_ATTR}=\"{id}\"]"))
        .into_iter()
        .find_map(|row| row.get_attribute(ORIGINAL_PRICE_ATTR))
}

fn with_class(base: &str, selector: &str) -> String {
    match dom::class_of(selector) {
        Some(class) => format!("{base} {class}"),
        None => base.to_string(),
    }
}

fn sort_label(column: SortColumn, direction: SortDirection) -> String {
    format!("{} {}", column.label(), direction.indicator())
}

fn aria_sort(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::None => "none",
        SortDirection::Ascending => "ascending",
        SortDirection::Descending => "descending",
    }
}

impl WebPage {
    #[must_use]
    pub const fn new(ctx: ShopContext) -> Self {
        Self { ctx }
    }

    fn first(root: &Element, selector: &str) -> Option<Element> {
        root.query_selector(selector).ok().flatten()
    }

    fn price_cell(&self, row: &Element) -> Option<Element> {
        Self::first(row, &self.ctx.selectors().price_cell)
            .or_else(|| Self::first(row, &format!(".{PRICE_CLASS}")))
    }

    fn rarity_cell(&self, row: &Element) -> Option<Element> {
        Self::first(row, &self.ctx.selectors().rarity_cell)
            .or_else(|| Self::first(row, &format!(".{RARITY_CLASS}")))
    }

    fn add_control(&self) -> Option<Element> {
        let selector = format!(
            "{}, .{ADD_ROW_CLASS}",
            self.ctx.selectors().add_item_control
        );
        dom::query_document(&selector).into_iter().next()
    }

    fn exclude_toggle(&self, row: &Element, id: &ItemId) -> Result<Element, JsValue> {
        let toggle = dom::create("button", TOGGLE_CLASS, Some("Exclude"))?;
        toggle.set_attribute("type", "button")?;
        toggle.set_attribute("aria-pressed", "false")?;
        let (ctx, row, id) = (self.ctx.clone(), row.clone(), id.clone());
        dom::listen(&toggle, "click", move |event: MouseEvent| {
            event.stop_propagation();
            ctx.toggle_excluded(&row, &id);
        })?;
        Ok(toggle)
    }

    fn try_decorate_row(&self, row: &Element, id: &ItemId) -> Result<(), JsValue> {
        row.set_attribute(ITEM_ID_ATTR, id.as_str())?;
        if let Some(cell) = self.price_cell(row) {
            let text = cell.text_content().unwrap_or_default();
            row.set_attribute(ORIGINAL_PRICE_ATTR, text.trim())?;
            cell.class_list().add_1(PRICE_CLASS)?;
            editor::attach(&self.ctx, &cell, id.clone())?;
        }
        let toggle = self.exclude_toggle(row, id)?;
        row.prepend_with_node_1(&toggle)?;
        row.set_attribute(DECORATED_ATTR, "true")?;
        Ok(())
    }

    fn build_custom_row(
        &self,
        record: &CustomItemRecord,
        display_price: &str,
        excluded: bool,
    ) -> Result<Element, JsValue> {
        let selectors = self.ctx.selectors();
        let row = dom::create("div", &with_class(CUSTOM_ROW_CLASS, &selectors.row), None)?;
        row.set_attribute(CUSTOM_ID_ATTR, record.id.as_str())?;
        row.set_attribute(ITEM_ID_ATTR, record.id.as_str())?;
        row.set_attribute(DECORATED_ATTR, "true")?;
        let toggle = self.exclude_toggle(&row, &record.id)?;
        row.append_child(&toggle)?;

        let name = dom::create("span", "shoplist-custom-name", Some(&record.name))?;
        name.set_attribute(LISTENER_ATTR, "true")?;
        {
            let (ctx, target, id) = (self.ctx.clone(), name.clone(), record.id.to_string());
            dom::listen(&name, "mouseenter", move |event: MouseEvent| {
                ctx.hover_custom(&target, &id, &event);
            })?;
        }
        {
            let (ctx, target) = (self.ctx.clone(), name.clone());
            dom::listen(&name, "mouseleave", move |_: MouseEvent| ctx.hover_leave(&target))?;
        }
        row.append_child(&name)?;

        let rarity = dom::create(
            "span",
            &with_class(RARITY_CLASS, &selectors.rarity_cell),
            Some(&record.rarity_label()),
        )?;
        row.append_child(&rarity)?;

        let price = dom::create(
            "span",
            &with_class(PRICE_CLASS, &selectors.price_cell),
            Some(display_price),
        )?;
        editor::attach(&self.ctx, &price, record.id.clone())?;
        row.append_child(&price)?;

        let delete = dom::create("button", "shoplist-delete", Some("×"))?;
        delete.set_attribute("type", "button")?;
        delete.set_attribute("aria-label", &format!("Remove {}", record.name))?;
        {
            let (ctx, id) = (self.ctx.clone(), record.id.clone());
            dom::listen(&delete, "click", move |event: MouseEvent| {
                event.stop_propagation();
                ctx.delete_custom(&id);
            })?;
        }
        row.append_child(&delete)?;

        show_excluded(&row, excluded);
        Ok(row)
    }

    fn insert_custom_row(&self, row: &Element) -> Result<(), JsValue> {
        if let Some(control) = self.add_control()
            && let Some(parent) = control.parent_node()
        {
            parent.insert_before(row, Some(control.as_ref()))?;
            return Ok(());
        }
        if let Some(last) = self.item_rows().last() {
            last.after_with_node_1(row)?;
            return Ok(());
        }
        dom::document()
            .and_then(|doc| doc.body())
            .ok_or_else(|| JsValue::from_str("document has no body"))?
            .append_child(row)?;
        Ok(())
    }

    fn sort_button(&self, column: SortColumn) -> Result<Element, JsValue> {
        let button = dom::create(
            "button",
            SORT_CLASS,
            Some(&sort_label(column, SortDirection::None)),
        )?;
        button.set_attribute("type", "button")?;
        button.set_attribute(SORT_COLUMN_ATTR, column.label())?;
        button.set_attribute("aria-sort", aria_sort(SortDirection::None))?;
        let ctx = self.ctx.clone();
        dom::listen(&button, "click", move |event: MouseEvent| {
            event.stop_propagation();
            ctx.sort(column);
        })?;
        Ok(button)
    }

    fn try_install_controls(&self) -> Result<(), JsValue> {
        let selectors = self.ctx.selectors();
        let add_row = dom::create(
            "div",
            &with_class(ADD_ROW_CLASS, &selectors.add_item_control),
            None,
        )?;

        let add = dom::create("button", "shoplist-add", Some("+ Add item"))?;
        add.set_attribute("type", "button")?;
        {
            let ctx = self.ctx.clone();
            dom::listen(&add, "click", move |_: MouseEvent| ctx.open_dialog())?;
        }
        let reset = dom::create("button", "shoplist-reset", Some("Reset list"))?;
        reset.set_attribute("type", "button")?;
        {
            let ctx = self.ctx.clone();
            dom::listen(&reset, "click", move |_: MouseEvent| ctx.reset())?;
        }
        add_row.append_child(&add)?;
        add_row.append_child(&reset)?;

        let header = dom::query_document(&selectors.header_row).into_iter().next();
        for column in SortColumn::ALL {
            let button = self.sort_button(column)?;
            let cell_selector = match column {
                SortColumn::Rarity => &selectors.rarity_cell,
                SortColumn::Price => &selectors.price_cell,
            };
            match &header {
                Some(header) => Self::first(header, cell_selector)
                    .unwrap_or_else(|| header.clone())
                    .append_child(&button)?,
                None => add_row.append_child(&button)?,
            };
        }

        if let Some(last) = self.item_rows().last() {
            last.after_with_node_1(&add_row)?;
        } else if let Some(header) = &header {
            header.after_with_node_1(&add_row)?;
        } else {
            dom::document()
                .and_then(|doc| doc.body())
                .ok_or_else(|| JsValue::from_str("document has no body"))?
                .append_child(&add_row)?;
        }
        Ok(())
    }
}

impl ShopPage for WebPage {
    type Row = Element;
    type Link = Element;

    fn item_rows(&self) -> Vec<Element> {
        dom::query_document(&self.ctx.selectors().row)
            .into_iter()
            .filter(|row| !row.has_attribute(CUSTOM_ID_ATTR))
            .collect()
    }

    fn row_facts(&self, row: &Element) -> RowFacts {
        let selectors = self.ctx.selectors();
        let link = Self::first(row, &selectors.item_link)
            .or_else(|| Self::first(row, &selectors.spell_link));
        RowFacts {
            href: link.as_ref().and_then(|a| a.get_attribute("href")),
            data_id: row.get_attribute("data-item-id"),
            name: link.and_then(|a| a.text_content()),
        }
    }

    fn is_decorated(&self, row: &Element) -> bool {
        row.has_attribute(DECORATED_ATTR)
    }

    fn decorate_row(&mut self, row: &Element, id: &ItemId) {
        if let Err(err) = self.try_decorate_row(row, id) {
            log::warn!("Could not decorate row {id}: {}", dom::js_error_message(&err));
        }
    }

    fn set_excluded(&mut self, row: &Element, excluded: bool) {
        show_excluded(row, excluded);
    }

    fn set_price_text(&mut self, row: &Element, text: &str) {
        if let Some(cell) = self.price_cell(row) {
            show_price(&cell, text);
        }
    }

    fn original_price(&self, row: &Element) -> Option<String> {
        row.get_attribute(ORIGINAL_PRICE_ATTR)
    }

    fn custom_row_ids(&self) -> Vec<ItemId> {
        dom::query_document(&format!("[{CUSTOM_ID_ATTR}]"))
            .into_iter()
            .filter_map(|row| row.get_attribute(CUSTOM_ID_ATTR))
            .map(ItemId::from)
            .collect()
    }

    fn append_custom_row(&mut self, record: &CustomItemRecord, display_price: &str, excluded: bool) {
        let result = self
            .build_custom_row(record, display_price, excluded)
            .and_then(|row| self.insert_custom_row(&row));
        if let Err(err) = result {
            log::warn!(
                "Could not add row for {}: {}",
                record.name,
                dom::js_error_message(&err)
            );
        }
    }

    fn remove_custom_row(&mut self, id: &ItemId) {
        for row in dom::query_document(&format!("[{CUSTOM_ID_ATTR}=\"{id}\"]")) {
            row.remove();
        }
    }

    fn previewable_links(&self) -> Vec<Element> {
        let selectors = self.ctx.selectors();
        dom::query_document(&format!("{}, {}", selectors.item_link, selectors.spell_link))
    }

    fn has_preview_listener(&self, link: &Element) -> bool {
        link.get_attribute(LISTENER_ATTR).as_deref() == Some("true")
    }

    fn attach_preview_listener(&mut self, link: &Element) {
        let attach = || -> Result<(), JsValue> {
            {
                let (ctx, target) = (self.ctx.clone(), link.clone());
                dom::listen(link, "mouseenter", move |event: MouseEvent| {
                    ctx.hover_link(&target, &event);
                })?;
            }
            {
                let (ctx, target) = (self.ctx.clone(), link.clone());
                dom::listen(link, "mouseleave", move |_: MouseEvent| ctx.hover_leave(&target))?;
            }
            link.set_attribute(LISTENER_ATTR, "true")
        };
        if let Err(err) = attach() {
            log::warn!("Could not attach preview: {}", dom::js_error_message(&err));
        }
    }

    fn has_list_controls(&self) -> bool {
        self.add_control().is_some()
    }

    fn install_list_controls(&mut self) {
        if let Err(err) = self.try_install_controls() {
            log::warn!("Could not install list controls: {}", dom::js_error_message(&err));
        }
    }
}

impl SortableList for WebPage {
    type Row = Element;

    /// Native and custom rows in document order.
    fn rows(&self) -> Vec<Element> {
        dom::query_document(&format!(
            "{}, [{CUSTOM_ID_ATTR}]",
            self.ctx.selectors().row
        ))
    }

    fn sort_key(&self, row: &Element) -> SortKey {
        let text = |cell: Option<Element>| {
            cell.and_then(|c| c.text_content()).unwrap_or_default()
        };
        SortKey::from_texts(
            &row.class_name(),
            &text(self.rarity_cell(row)),
            &text(self.price_cell(row)),
        )
    }

    fn custom_id(&self, row: &Element) -> Option<ItemId> {
        row.get_attribute(CUSTOM_ID_ATTR).map(ItemId::new)
    }

    fn reorder(&mut self, rows: &[Element]) {
        let Some(parent) = rows.first().and_then(|row| row.parent_node()) else {
            return;
        };
        for row in rows {
            if let Err(err) = parent.append_child(row) {
                log::warn!("Could not move row: {}", dom::js_error_message(&err));
                return;
            }
        }
        if let Some(control) = self.add_control()
            && control.parent_node().as_ref() == Some(&parent)
        {
            let _ = parent.append_child(&control);
        }
    }

    fn show_directions(&mut self, state: &SortState) {
        for button in dom::query_document(&format!(".{SORT_CLASS}")) {
            let Some(column) = SortColumn::ALL.into_iter().find(|column| {
                button.get_attribute(SORT_COLUMN_ATTR).as_deref() == Some(column.label())
            }) else {
                continue;
            };
            let direction = state.direction(column);
            button.set_text_content(Some(&sort_label(column, direction)));
            let _ = button.set_attribute("aria-sort", aria_sort(direction));
        }
    }
}
