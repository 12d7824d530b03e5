//! Per-page context.
//!
//! One `ShopSession` is created by the content script's entry point and holds
//! everything that would otherwise be page-global: the URL-backed list, sort
//! state, the popup controller and the refresh gate.

use crate::UrlHistory;
use crate::config::ShopConfig;
use crate::decorate::{DecorationReport, ShopPage, decorate, restore_rows};
use crate::draft::{CustomItemDraft, DraftError, allocate_custom_id};
use crate::item_id::ItemId;
use crate::popup::{CustomPreview, PopupController, PreviewSource};
use crate::refresh::{ContentChange, RefreshGate};
use crate::sort::{SortColumn, SortDirection, SortEngine, SortableList};
use crate::store::ShopList;

pub struct ShopSession<H, T>
where
    H: UrlHistory,
{
    config: ShopConfig,
    list: ShopList<H>,
    sort: SortEngine,
    popup: PopupController<T>,
    refresh: RefreshGate,
}

impl<H, T> ShopSession<H, T>
where
    H: UrlHistory,
{
    /// Hydrate the list from `history` and set up idle components.
    pub fn new(history: H, config: ShopConfig) -> Self {
        let list = ShopList::hydrate(history, config.params.clone());
        let popup = PopupController::new(config.timing);
        Self {
            config,
            list,
            sort: SortEngine::new(),
            popup,
            refresh: RefreshGate::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ShopConfig {
        &self.config
    }

    #[must_use]
    pub const fn list(&self) -> &ShopList<H> {
        &self.list
    }

    pub const fn list_mut(&mut self) -> &mut ShopList<H> {
        &mut self.list
    }

    #[must_use]
    pub const fn sort(&self) -> &SortEngine {
        &self.sort
    }

    #[must_use]
    pub const fn popup(&self) -> &PopupController<T> {
        &self.popup
    }

    pub const fn popup_mut(&mut self) -> &mut PopupController<T> {
        &mut self.popup
    }

    /// Decorate the page against the current state.
    pub fn initialize<P: ShopPage>(&mut self, page: &mut P) -> DecorationReport {
        decorate(page, self.list.state())
    }

    /// Record a content change. Returns `true` when a refresh should be scheduled.
    pub fn notify_change(&mut self, change: ContentChange) -> bool {
        self.refresh.request(change)
    }

    /// Run a scheduled refresh.
    pub fn refresh<P: ShopPage>(&mut self, page: &mut P) -> DecorationReport {
        self.refresh.begin_run();
        self.initialize(page)
    }

    pub fn sort_by<L: SortableList>(&mut self, rows: &mut L, column: SortColumn) -> SortDirection {
        self.sort.activate(rows, self.list.state(), column)
    }

    /// Validate a dialog draft, store it, and render its row.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError`] when the draft is rejected; nothing is stored.
    pub fn add_custom_item<P: ShopPage>(
        &mut self,
        page: &mut P,
        draft: CustomItemDraft,
        now_ms: u64,
    ) -> Result<ItemId, DraftError> {
        let id = allocate_custom_id(self.list.state(), now_ms);
        let record = draft.into_record(id.clone())?;
        log::info!("Adding custom item {} ({id})", record.name);
        self.list.add_custom_item(record);
        decorate(page, self.list.state());
        Ok(id)
    }

    /// Remove a custom item from the state, the URL and the page.
    pub fn delete_custom_item<P: ShopPage>(&mut self, page: &mut P, id: &ItemId) -> bool {
        let removed = self.list.remove_custom_item(id).is_some();
        page.remove_custom_row(id);
        removed
    }

    /// Drop every customization and re-render custom rows.
    pub fn reset<P: ShopPage>(&mut self, page: &mut P) {
        self.list.reset();
        restore_rows(page);
        decorate(page, self.list.state());
    }

    /// Preview for a custom row, using the price currently displayed for it.
    #[must_use]
    pub fn custom_preview(&self, id: &str) -> Option<PreviewSource> {
        let state = self.list.state();
        let record = state.custom_item(id)?;
        let price = state.display_price(id, &record.price);
        Some(PreviewSource::Custom(CustomPreview::from_record(record, price)))
    }
}
