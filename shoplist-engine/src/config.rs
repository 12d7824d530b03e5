//! Content-script configuration.
//!
//! Every field has a default matching the host page the script ships for, so
//! an empty object (or no object at all) is a complete configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    ADD_ITEM_CONTROL_SELECTOR, HEADER_ROW_SELECTOR, ITEM_LINK_SELECTOR, PRICE_CELL_SELECTOR,
    RARITY_CELL_SELECTOR, ROW_SELECTOR, SPELL_LINK_SELECTOR,
};
use crate::placement::Placement;
use crate::popup::PopupTiming;
use crate::query::QueryParams;

/// CSS selectors describing the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSelectors {
    pub row: String,
    pub header_row: String,
    pub item_link: String,
    pub spell_link: String,
    pub rarity_cell: String,
    pub price_cell: String,
    pub add_item_control: String,
}

impl Default for HostSelectors {
    fn default() -> Self {
        Self {
            row: ROW_SELECTOR.to_string(),
            header_row: HEADER_ROW_SELECTOR.to_string(),
            item_link: ITEM_LINK_SELECTOR.to_string(),
            spell_link: SPELL_LINK_SELECTOR.to_string(),
            rarity_cell: RARITY_CELL_SELECTOR.to_string(),
            price_cell: PRICE_CELL_SELECTOR.to_string(),
            add_item_control: ADD_ITEM_CONTROL_SELECTOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub params: QueryParams,
    pub timing: PopupTiming,
    pub placement: Placement,
    pub selectors: HostSelectors,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL parameter name for {field} is empty")]
    EmptyParam { field: &'static str },
    #[error("URL parameter name {name:?} is used twice")]
    DuplicateParam { name: String },
    #[error("selector for {field} is empty")]
    EmptySelector { field: &'static str },
    #[error("popup placement is out of range")]
    InvalidPlacement,
}

impl ShopConfig {
    /// Parse and validate a JSON configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails [`ShopConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check parameter names, selectors and placement.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let params = [
            ("excluded", &self.params.excluded),
            ("prices", &self.params.prices),
            ("custom", &self.params.custom),
        ];
        for (field, name) in params {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyParam { field });
            }
        }
        for (i, (_, name)) in params.iter().enumerate() {
            if params[i + 1..].iter().any(|(_, other)| other == name) {
                return Err(ConfigError::DuplicateParam {
                    name: (*name).clone(),
                });
            }
        }

        let selectors = [
            ("row", &self.selectors.row),
            ("header_row", &self.selectors.header_row),
            ("item_link", &self.selectors.item_link),
            ("spell_link", &self.selectors.spell_link),
            ("rarity_cell", &self.selectors.rarity_cell),
            ("price_cell", &self.selectors.price_cell),
            ("add_item_control", &self.selectors.add_item_control),
        ];
        if let Some(&(field, _)) = selectors.iter().find(|(_, sel)| sel.trim().is_empty()) {
            return Err(ConfigError::EmptySelector { field });
        }

        if !self.placement.is_valid() {
            return Err(ConfigError::InvalidPlacement);
        }
        Ok(())
    }
}
