//! In-memory shop list state.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::constants::DEFAULT_CUSTOM_PRICE;
use crate::item_id::ItemId;
use crate::rarity::{Rarity, display_label};

fn default_custom_price() -> String {
    DEFAULT_CUSTOM_PRICE.to_string()
}

/// A user-added item. Records are replaced or removed, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomItemRecord {
    /// Filled from the map key when a record is read back from the URL.
    #[serde(default)]
    pub id: ItemId,
    pub name: String,
    /// Rarity code as entered; unknown codes are kept and sort last.
    pub rarity: String,
    /// Free-form price text.
    #[serde(default = "default_custom_price")]
    pub price: String,
    #[serde(default)]
    pub description: String,
}

impl CustomItemRecord {
    #[must_use]
    pub fn rarity_tier(&self) -> Option<Rarity> {
        Rarity::parse(&self.rarity)
    }

    #[must_use]
    pub fn rarity_label(&self) -> String {
        display_label(&self.rarity)
    }
}

/// Exclusions, price overrides and custom items layered over the host list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopListState {
    pub excluded: BTreeSet<ItemId>,
    pub price_overrides: BTreeMap<ItemId, String>,
    pub custom_items: BTreeMap<ItemId, CustomItemRecord>,
}

impl ShopListState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty() && self.price_overrides.is_empty() && self.custom_items.is_empty()
    }

    #[must_use]
    pub fn is_excluded(&self, id: &str) -> bool {
        self.excluded.contains(id)
    }

    #[must_use]
    pub fn price_override(&self, id: &str) -> Option<&str> {
        self.price_overrides.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn custom_item(&self, id: &str) -> Option<&CustomItemRecord> {
        self.custom_items.get(id)
    }

    /// Creation-order position of a custom item. Ids embed their creation
    /// time, so map order is creation order.
    #[must_use]
    pub fn custom_position(&self, id: &str) -> Option<usize> {
        self.custom_items.keys().position(|key| key.as_str() == id)
    }

    /// Price shown for an item: the override when present, otherwise `base`.
    #[must_use]
    pub fn display_price<'a>(&'a self, id: &str, base: &'a str) -> &'a str {
        self.price_override(id).unwrap_or(base)
    }

    /// Flip exclusion for `id`. Returns whether the item is now excluded.
    pub fn toggle_excluded(&mut self, id: &ItemId) -> bool {
        if self.excluded.remove(id.as_str()) {
            false
        } else {
            self.excluded.insert(id.clone());
            true
        }
    }

    pub fn set_price_override(&mut self, id: &ItemId, price: &str) {
        self.price_overrides
            .insert(id.clone(), price.trim().to_string());
    }

    /// Returns whether an override was present.
    pub fn clear_price_override(&mut self, id: &str) -> bool {
        self.price_overrides.remove(id).is_some()
    }

    /// Insert a custom record, replacing any record with the same id.
    pub fn add_custom_item(&mut self, record: CustomItemRecord) {
        self.custom_items.insert(record.id.clone(), record);
    }

    /// Remove a custom record together with its exclusion and override entries.
    pub fn remove_custom_item(&mut self, id: &str) -> Option<CustomItemRecord> {
        let removed = self.custom_items.remove(id)?;
        self.excluded.remove(id);
        self.price_overrides.remove(id);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.excluded.clear();
        self.price_overrides.clear();
        self.custom_items.clear();
    }
}
