//! URL-backed shop list store.
//!
//! Every mutation is flushed to the address bar with a history replace before
//! the call returns, so the URL stays the single source of truth across
//! reloads and shared links.

use crate::UrlHistory;
use crate::editor::{PriceCommit, price_commit};
use crate::item_id::ItemId;
use crate::model::{CustomItemRecord, ShopListState};
use crate::query::{QueryParams, hydrate, merge_query};

pub struct ShopList<H>
where
    H: UrlHistory,
{
    state: ShopListState,
    history: H,
    params: QueryParams,
}

impl<H> ShopList<H>
where
    H: UrlHistory,
{
    /// Hydrate from the host's current URL.
    pub fn hydrate(history: H, params: QueryParams) -> Self {
        let state = hydrate(&history.current_url(), &params);
        log::debug!(
            "Hydrated shop list: {} excluded, {} overrides, {} custom",
            state.excluded.len(),
            state.price_overrides.len(),
            state.custom_items.len()
        );
        Self {
            state,
            history,
            params,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ShopListState {
        &self.state
    }

    #[must_use]
    pub const fn params(&self) -> &QueryParams {
        &self.params
    }

    #[must_use]
    pub const fn history(&self) -> &H {
        &self.history
    }

    /// Returns whether the item is excluded after the toggle.
    pub fn toggle_excluded(&mut self, id: &ItemId) -> bool {
        let excluded = self.state.toggle_excluded(id);
        self.flush();
        excluded
    }

    pub fn set_price_override(&mut self, id: &ItemId, price: &str) {
        self.state.set_price_override(id, price);
        self.flush();
    }

    pub fn clear_price_override(&mut self, id: &ItemId) {
        self.state.clear_price_override(id.as_str());
        self.flush();
    }

    /// Route an edited price through set or clear and return the text to display.
    ///
    /// `fallback` is what the row showed before any override: the host's
    /// original price, or a custom record's own price.
    pub fn commit_price_edit(&mut self, id: &ItemId, value: &str, fallback: &str) -> String {
        match price_commit(value) {
            PriceCommit::Set(price) => {
                self.set_price_override(id, &price);
                price
            }
            PriceCommit::Clear => {
                self.clear_price_override(id);
                fallback.to_string()
            }
        }
    }

    pub fn add_custom_item(&mut self, record: CustomItemRecord) {
        self.state.add_custom_item(record);
        self.flush();
    }

    pub fn remove_custom_item(&mut self, id: &ItemId) -> Option<CustomItemRecord> {
        let removed = self.state.remove_custom_item(id.as_str());
        self.flush();
        removed
    }

    /// Drop every exclusion, override and custom item.
    pub fn reset(&mut self) {
        self.state.clear();
        self.flush();
    }

    fn flush(&self) {
        let query = merge_query(&self.history.current_url(), &self.state, &self.params);
        if let Err(err) = self.history.replace_query(&query) {
            log::warn!("Failed to persist shop list to URL: {err}");
        }
    }
}
