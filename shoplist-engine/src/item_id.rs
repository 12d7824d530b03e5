//! Item identifiers and how rows derive them.
//!
//! An id must survive re-renders of the same logical row, so it is read from
//! the most stable source available: the numeric id in the detail link, then an
//! explicit `data-item-id`, then a slug of the display name. Two differently
//! linked items that share a name and lack both earlier sources collide; that
//! is accepted.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{CUSTOM_ID_PREFIX, ITEM_ID_QUERY_KEYS};

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id names a user-added item rather than a host row.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.0.starts_with(CUSTOM_ID_PREFIX)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Raw identity facts read from a host row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFacts {
    pub href: Option<String>,
    pub data_id: Option<String>,
    pub name: Option<String>,
}

impl RowFacts {
    #[must_use]
    pub fn item_id(&self) -> Option<ItemId> {
        derive_item_id(
            self.href.as_deref(),
            self.data_id.as_deref(),
            self.name.as_deref(),
        )
    }
}

/// Derive an id from the first usable source, in priority order.
#[must_use]
pub fn derive_item_id(
    href: Option<&str>,
    data_id: Option<&str>,
    name: Option<&str>,
) -> Option<ItemId> {
    if let Some(id) = href.and_then(id_from_href) {
        return Some(ItemId(id));
    }
    // Host attributes are free text; slugging keeps `,` and `:` out of the URL
    // lists and the `custom_` prefix out of reach.
    if let Some(id) = data_id.map(slugify).filter(|id| !id.is_empty()) {
        return Some(ItemId(id));
    }
    name.map(slugify)
        .filter(|slug| !slug.is_empty())
        .map(ItemId)
}

/// Numeric `id` or `spellid` query value of a detail link.
#[must_use]
pub fn id_from_href(href: &str) -> Option<String> {
    let (_, query) = href.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| {
            let key: &str = key;
            ITEM_ID_QUERY_KEYS.contains(&key)
                && !value.is_empty()
                && value.chars().all(|c| c.is_ascii_digit())
        })
        .map(|(_, value)| value.into_owned())
}

/// Lowercase ASCII slug: alphanumerics kept, every other run collapsed to `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
