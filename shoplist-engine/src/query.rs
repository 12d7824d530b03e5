//! URL query-string codec for the shop list.
//!
//! Three independent parameters carry the state:
//! - `excluded`: comma-separated ids
//! - `prices`: comma-separated `id:price` pairs (a price containing a comma
//!   cannot be represented)
//! - `custom`: JSON object of id to record, percent-encoded by the form encoder
//!
//! Empty containers are omitted. Parameters that belong to the host page pass
//! through untouched and keep their order.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use url::form_urlencoded;

use crate::constants::{
    LIST_SEPARATOR, PARAM_CUSTOM, PARAM_EXCLUDED, PARAM_PRICES, PRICE_PAIR_SEPARATOR,
};
use crate::item_id::ItemId;
use crate::model::{CustomItemRecord, ShopListState};

/// Names of the three shop list parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    pub excluded: String,
    pub prices: String,
    pub custom: String,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            excluded: PARAM_EXCLUDED.to_string(),
            prices: PARAM_PRICES.to_string(),
            custom: PARAM_CUSTOM.to_string(),
        }
    }
}

impl QueryParams {
    fn owns(&self, key: &str) -> bool {
        key == self.excluded || key == self.prices || key == self.custom
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("custom items are not valid JSON: {0}")]
    CustomJson(#[from] serde_json::Error),
}

/// The query portion of a full URL, a `?query`, or a bare query string.
#[must_use]
pub fn query_part(url: &str) -> &str {
    let without_fragment = url.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None if without_fragment.contains('=') && !without_fragment.contains('/') => {
            without_fragment
        }
        None => "",
    }
}

/// Read shop list state from a URL. Each field is absent-safe on its own.
#[must_use]
pub fn hydrate(url: &str, params: &QueryParams) -> ShopListState {
    let mut state = ShopListState::new();
    let mut seen_excluded = false;
    let mut seen_prices = false;
    let mut seen_custom = false;

    for (key, value) in form_urlencoded::parse(query_part(url).as_bytes()) {
        if key == params.excluded && !seen_excluded {
            seen_excluded = true;
            state.excluded = parse_excluded(&value);
        } else if key == params.prices && !seen_prices {
            seen_prices = true;
            state.price_overrides = parse_prices(&value);
        } else if key == params.custom && !seen_custom {
            seen_custom = true;
            match parse_custom(&value) {
                Ok(items) => state.custom_items = items,
                Err(err) => log::warn!("Discarding custom items from URL: {err}"),
            }
        }
    }
    state
}

#[must_use]
pub fn parse_excluded(raw: &str) -> BTreeSet<ItemId> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ItemId::from)
        .collect()
}

/// Parse `id:price` pairs. The first `:` splits, so prices may contain colons.
#[must_use]
pub fn parse_prices(raw: &str) -> BTreeMap<ItemId, String> {
    raw.split(LIST_SEPARATOR)
        .filter_map(|pair| pair.split_once(PRICE_PAIR_SEPARATOR))
        .map(|(id, price)| (id.trim(), price.trim()))
        .filter(|(id, price)| !id.is_empty() && !price.is_empty())
        .map(|(id, price)| (ItemId::from(id), price.to_string()))
        .collect()
}

/// Parse the custom-item JSON object.
///
/// Map keys are authoritative for record ids. Keys without the custom prefix
/// are dropped so they can never shadow a host row.
///
/// # Errors
///
/// Returns an error when the value is not a JSON object of records.
pub fn parse_custom(raw: &str) -> Result<BTreeMap<ItemId, CustomItemRecord>, QueryError> {
    let parsed: BTreeMap<ItemId, CustomItemRecord> = serde_json::from_str(raw)?;
    Ok(parsed
        .into_iter()
        .filter_map(|(id, mut record)| {
            if !id.is_custom() {
                log::warn!("Ignoring custom item with non-custom id {id}");
                return None;
            }
            record.id = id.clone();
            Some((id, record))
        })
        .collect())
}

fn encode_excluded(state: &ShopListState) -> Option<String> {
    if state.excluded.is_empty() {
        return None;
    }
    let ids: Vec<&str> = state.excluded.iter().map(ItemId::as_str).collect();
    Some(ids.join(","))
}

fn encode_prices(state: &ShopListState) -> Option<String> {
    if state.price_overrides.is_empty() {
        return None;
    }
    let pairs: Vec<String> = state
        .price_overrides
        .iter()
        .map(|(id, price)| format!("{id}{PRICE_PAIR_SEPARATOR}{price}"))
        .collect();
    Some(pairs.join(","))
}

fn encode_custom(state: &ShopListState) -> Option<String> {
    if state.custom_items.is_empty() {
        return None;
    }
    match serde_json::to_string(&state.custom_items) {
        Ok(json) => Some(json),
        Err(err) => {
            log::error!("Failed to encode custom items: {err}");
            None
        }
    }
}

fn append_state(
    serializer: &mut form_urlencoded::Serializer<'_, String>,
    state: &ShopListState,
    params: &QueryParams,
) {
    if let Some(value) = encode_excluded(state) {
        serializer.append_pair(&params.excluded, &value);
    }
    if let Some(value) = encode_prices(state) {
        serializer.append_pair(&params.prices, &value);
    }
    if let Some(value) = encode_custom(state) {
        serializer.append_pair(&params.custom, &value);
    }
}

/// Encode only the shop list parameters, without a leading `?`.
#[must_use]
pub fn serialize(state: &ShopListState, params: &QueryParams) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    append_state(&mut serializer, state, params);
    serializer.finish()
}

/// Rebuild a query string: foreign parameters first, in their original order,
/// then the shop list parameters. Returned without a leading `?`.
#[must_use]
pub fn merge_query(existing: &str, state: &ShopListState, params: &QueryParams) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(query_part(existing).as_bytes()) {
        if !params.owns(&key) {
            serializer.append_pair(&key, &value);
        }
    }
    append_state(&mut serializer, state, params);
    serializer.finish()
}
