//! Custom-item drafts from the add-item dialog.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{CUSTOM_ID_PREFIX, DEFAULT_CUSTOM_PRICE, DEFAULT_CUSTOM_RARITY};
use crate::item_id::ItemId;
use crate::model::{CustomItemRecord, ShopListState};

/// The four strings the dialog collects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomItemDraft {
    pub name: String,
    pub rarity: String,
    pub price: String,
    pub description: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Please enter an item name.")]
    MissingName,
}

impl CustomItemDraft {
    /// Trim fields, apply defaults and bind the record to `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::MissingName`] when the name is blank.
    pub fn into_record(self, id: ItemId) -> Result<CustomItemRecord, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }
        let rarity = match self.rarity.trim() {
            "" => DEFAULT_CUSTOM_RARITY,
            code => code,
        };
        let price = match self.price.trim() {
            "" => DEFAULT_CUSTOM_PRICE,
            price => price,
        };
        Ok(CustomItemRecord {
            id,
            name: name.to_string(),
            rarity: rarity.to_string(),
            price: price.to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

/// Allocate `custom_<millis>`, bumping until it is unused in `state`.
#[must_use]
pub fn allocate_custom_id(state: &ShopListState, now_ms: u64) -> ItemId {
    let mut stamp = now_ms;
    loop {
        let id = ItemId::new(format!("{CUSTOM_ID_PREFIX}{stamp}"));
        if state.custom_item(id.as_str()).is_none() {
            return id;
        }
        stamp = stamp.wrapping_add(1);
    }
}
