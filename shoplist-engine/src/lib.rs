//! Shop List Engine
//!
//! Platform-agnostic core of the shop list content script: hover-preview popup
//! state machine, URL-persisted list customizations, row decoration and sorting.
//! This crate holds no DOM code; hosts plug in through [`UrlHistory`],
//! [`ShopPage`] and [`SortableList`].

#![forbid(unsafe_code)]

pub mod config;
pub mod constants;
pub mod decorate;
pub mod draft;
pub mod editor;
pub mod item_id;
pub mod model;
pub mod placement;
pub mod popup;
pub mod price;
pub mod query;
pub mod rarity;
pub mod refresh;
pub mod session;
pub mod sort;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigError, HostSelectors, ShopConfig};
pub use decorate::{DecorationReport, ShopPage, decorate, restore_rows};
pub use draft::{CustomItemDraft, DraftError, allocate_custom_id};
pub use editor::{EditEnd, EditOutcome, PriceCommit, PriceEditor, price_commit};
pub use item_id::{ItemId, RowFacts, derive_item_id};
pub use model::{CustomItemRecord, ShopListState};
pub use placement::{Placement, Point, Rect, Viewport};
pub use popup::{
    CustomPreview, PopupController, PopupEffect, PopupEvent, PopupState, PopupTiming,
    PreviewSource, TimerKind, TimerToken,
};
pub use price::{parse_price, strip_price_label, with_price_label};
pub use query::{QueryError, QueryParams};
pub use rarity::Rarity;
pub use refresh::{ContentChange, RefreshGate};
pub use session::ShopSession;
pub use sort::{RowOrigin, SortColumn, SortDirection, SortEngine, SortKey, SortState, SortableList};
pub use store::ShopList;

/// Trait for abstracting the page address the list state lives in
/// Platform-specific implementations should provide this
pub trait UrlHistory {
    type Error: std::error::Error + 'static;

    /// Full current URL, query string included.
    fn current_url(&self) -> String;

    /// Replace the query string of the current history entry without
    /// reloading or adding an entry. An empty `query` removes the `?`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform refuses the history update.
    fn replace_query(&self, query: &str) -> Result<(), Self::Error>;
}
