//! Tri-state column sorting over host rows.
//!
//! Each column cycles `None -> Ascending -> Descending -> None`, and only one
//! column may be active. `None` is an active arrangement: it puts rows back in
//! the order recorded by their `row-<n>` structural class, followed by custom
//! rows in creation order, however many times the columns were toggled.
//! Sorting is stable, so equal keys never trade places between clicks.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::constants::ROW_INDEX_CLASS_PREFIX;
use crate::item_id::ItemId;
use crate::model::ShopListState;
use crate::price::{parse_price, strip_price_label};
use crate::rarity::sort_rank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::None,
        }
    }

    /// Arrow shown next to a column heading.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::None => "↕",
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortColumn {
    Rarity,
    Price,
}

impl SortColumn {
    pub const ALL: [Self; 2] = [Self::Rarity, Self::Price];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rarity => "Rarity",
            Self::Price => "Price",
        }
    }
}

/// At most one column is ever non-`None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    rarity: SortDirection,
    price: SortDirection,
}

impl SortState {
    #[must_use]
    pub const fn direction(&self, column: SortColumn) -> SortDirection {
        match column {
            SortColumn::Rarity => self.rarity,
            SortColumn::Price => self.price,
        }
    }

    /// Advance `column` and reset the other one. Returns the new direction.
    pub fn activate(&mut self, column: SortColumn) -> SortDirection {
        let next = self.direction(column).next();
        *self = match column {
            SortColumn::Rarity => Self {
                rarity: next,
                price: SortDirection::None,
            },
            SortColumn::Price => Self {
                rarity: SortDirection::None,
                price: next,
            },
        };
        next
    }

    /// The column currently driving the order, if any.
    #[must_use]
    pub fn active(&self) -> Option<(SortColumn, SortDirection)> {
        SortColumn::ALL
            .into_iter()
            .map(|column| (column, self.direction(column)))
            .find(|(_, direction)| *direction != SortDirection::None)
    }
}

/// Where a row sits when no column is active. Native rows come first by
/// their structural index, then custom rows by creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum RowOrigin {
    Native(usize),
    Custom(usize),
    #[default]
    Unplaced,
}

/// Comparable facts read from one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortKey {
    pub origin: RowOrigin,
    pub rarity_rank: u8,
    pub price: f64,
}

impl SortKey {
    #[must_use]
    pub fn from_texts(class_name: &str, rarity_text: &str, price_text: &str) -> Self {
        Self {
            origin: original_index(class_name).map_or(RowOrigin::Unplaced, RowOrigin::Native),
            rarity_rank: sort_rank(rarity_text),
            price: parse_price(strip_price_label(price_text)),
        }
    }

    /// Place a custom row after every native row.
    #[must_use]
    pub fn placed_as_custom(mut self, id: &ItemId, state: &ShopListState) -> Self {
        if let Some(position) = state.custom_position(id.as_str()) {
            self.origin = RowOrigin::Custom(position);
        }
        self
    }
}

/// Original position encoded in a `row-<n>` class token.
#[must_use]
pub fn original_index(class_name: &str) -> Option<usize> {
    class_name.split_whitespace().find_map(|token| {
        token
            .strip_prefix(ROW_INDEX_CLASS_PREFIX)
            .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
            .and_then(|digits| digits.parse().ok())
    })
}

fn column_order(column: SortColumn, a: &SortKey, b: &SortKey) -> Ordering {
    match column {
        SortColumn::Rarity => a.rarity_rank.cmp(&b.rarity_rank),
        SortColumn::Price => a.price.total_cmp(&b.price),
    }
}

/// Indices into `keys` (current document order) giving the target order.
#[must_use]
pub fn arrangement(keys: &[SortKey], column: SortColumn, direction: SortDirection) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    match direction {
        SortDirection::None => order.sort_by_key(|&i| keys[i].origin),
        SortDirection::Ascending => order.sort_by(|&a, &b| column_order(column, &keys[a], &keys[b])),
        SortDirection::Descending => {
            order.sort_by(|&a, &b| column_order(column, &keys[b], &keys[a]));
        }
    }
    order
}

/// Host list that can be re-ordered by re-appending rows.
pub trait SortableList {
    type Row: Clone;

    /// Rows in current document order.
    fn rows(&self) -> Vec<Self::Row>;

    fn sort_key(&self, row: &Self::Row) -> SortKey;

    /// Id of a custom row, `None` for native rows.
    fn custom_id(&self, row: &Self::Row) -> Option<ItemId>;

    /// Re-append `rows` to their container in the given order.
    fn reorder(&mut self, rows: &[Self::Row]);

    /// Refresh the per-column direction indicators.
    fn show_directions(&mut self, _state: &SortState) {}
}

/// Sort state plus the act of applying it to a list.
#[derive(Debug, Clone, Default)]
pub struct SortEngine {
    state: SortState,
}

impl SortEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &SortState {
        &self.state
    }

    /// Advance `column`, reset the other one, and re-order `list`.
    /// `items` supplies the creation order of custom rows.
    pub fn activate<L: SortableList>(
        &mut self,
        list: &mut L,
        items: &ShopListState,
        column: SortColumn,
    ) -> SortDirection {
        let direction = self.state.activate(column);
        apply(list, items, column, direction);
        list.show_directions(&self.state);
        log::debug!("Sorted by {} {direction:?}", column.label());
        direction
    }
}

/// Re-order `list` for one column and direction.
pub fn apply<L: SortableList>(
    list: &mut L,
    items: &ShopListState,
    column: SortColumn,
    direction: SortDirection,
) {
    let rows = list.rows();
    if rows.is_empty() {
        return;
    }
    let keys: Vec<SortKey> = rows
        .iter()
        .map(|row| {
            let key = list.sort_key(row);
            match list.custom_id(row) {
                Some(id) => key.placed_as_custom(&id, items),
                None => key,
            }
        })
        .collect();
    let ordered: Vec<L::Row> = arrangement(&keys, column, direction)
        .into_iter()
        .map(|index| rows[index].clone())
        .collect();
    list.reorder(&ordered);
}
