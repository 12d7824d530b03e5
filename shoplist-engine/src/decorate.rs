//! Row decoration: applying shop list state to host rows.
//!
//! Decoration runs on first load and again whenever the host injects rows, so
//! every step checks for its own marker before touching a row or link.

use std::collections::BTreeSet;

use crate::item_id::{ItemId, RowFacts};
use crate::model::{CustomItemRecord, ShopListState};

/// Host page surface the decorator works against.
/// Platform-specific implementations should provide this
pub trait ShopPage {
    type Row: Clone;
    type Link: Clone;

    /// Native item rows in document order; synthetic custom rows are excluded.
    fn item_rows(&self) -> Vec<Self::Row>;

    fn row_facts(&self, row: &Self::Row) -> RowFacts;

    fn is_decorated(&self, row: &Self::Row) -> bool;

    /// Attach the exclude toggle and price editor, remember the original
    /// price text, and mark the row decorated.
    fn decorate_row(&mut self, row: &Self::Row, id: &ItemId);

    fn set_excluded(&mut self, row: &Self::Row, excluded: bool);

    fn set_price_text(&mut self, row: &Self::Row, text: &str);

    /// Price text the host rendered before any override was applied.
    fn original_price(&self, row: &Self::Row) -> Option<String>;

    /// Ids of synthetic custom rows currently in the list.
    fn custom_row_ids(&self) -> Vec<ItemId>;

    /// Insert before the trailing add-item control when present, else append.
    fn append_custom_row(&mut self, record: &CustomItemRecord, display_price: &str, excluded: bool);

    fn remove_custom_row(&mut self, id: &ItemId);

    fn previewable_links(&self) -> Vec<Self::Link>;

    fn has_preview_listener(&self, link: &Self::Link) -> bool;

    fn attach_preview_listener(&mut self, link: &Self::Link);

    /// Sort headers, add-item and reset controls.
    fn has_list_controls(&self) -> bool;

    fn install_list_controls(&mut self);
}

/// What a decoration pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationReport {
    pub rows_seen: usize,
    pub rows_decorated: usize,
    pub rows_without_id: usize,
    pub custom_added: usize,
    pub custom_removed: usize,
    pub links_attached: usize,
    pub controls_installed: bool,
}

impl DecorationReport {
    /// Whether the pass touched the page at all.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.rows_decorated > 0
            || self.custom_added > 0
            || self.custom_removed > 0
            || self.links_attached > 0
            || self.controls_installed
    }
}

/// Decorate every undecorated row and reconcile custom rows with `state`.
pub fn decorate<P: ShopPage>(page: &mut P, state: &ShopListState) -> DecorationReport {
    let mut report = DecorationReport::default();

    if !page.has_list_controls() {
        page.install_list_controls();
        report.controls_installed = true;
    }

    for row in page.item_rows() {
        report.rows_seen += 1;
        if page.is_decorated(&row) {
            continue;
        }
        let Some(id) = page.row_facts(&row).item_id() else {
            report.rows_without_id += 1;
            continue;
        };
        page.decorate_row(&row, &id);
        page.set_excluded(&row, state.is_excluded(id.as_str()));
        if let Some(price) = state.price_override(id.as_str()) {
            page.set_price_text(&row, price);
        }
        report.rows_decorated += 1;
    }

    reconcile_custom_rows(page, state, &mut report);

    for link in page.previewable_links() {
        if !page.has_preview_listener(&link) {
            page.attach_preview_listener(&link);
            report.links_attached += 1;
        }
    }

    if report.changed() {
        log::debug!("Decoration pass: {report:?}");
    }
    report
}

/// Put decorated native rows back to the host's rendering: not excluded,
/// original price. Used after a reset.
pub fn restore_rows<P: ShopPage>(page: &mut P) {
    for row in page.item_rows() {
        if !page.is_decorated(&row) {
            continue;
        }
        page.set_excluded(&row, false);
        if let Some(original) = page.original_price(&row) {
            page.set_price_text(&row, &original);
        }
    }
}

fn reconcile_custom_rows<P: ShopPage>(
    page: &mut P,
    state: &ShopListState,
    report: &mut DecorationReport,
) {
    let present: BTreeSet<ItemId> = page.custom_row_ids().into_iter().collect();
    for id in &present {
        if state.custom_item(id.as_str()).is_none() {
            page.remove_custom_row(id);
            report.custom_removed += 1;
        }
    }
    for (id, record) in &state.custom_items {
        if present.contains(id) {
            continue;
        }
        let price = state.display_price(id.as_str(), &record.price);
        page.append_custom_row(record, price, state.is_excluded(id.as_str()));
        report.custom_added += 1;
    }
}
