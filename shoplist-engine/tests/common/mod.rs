#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use shoplist_engine::{
    CustomItemRecord, ItemId, RowFacts, ShopPage, SortKey, SortState, SortableList, UrlHistory,
};

/// Address bar double: remembers the URL and counts history replacements.
#[derive(Clone, Default)]
pub struct MemoryHistory {
    url: Rc<RefCell<String>>,
    replacements: Rc<RefCell<usize>>,
}

impl MemoryHistory {
    pub fn at(url: &str) -> Self {
        let history = Self::default();
        *history.url.borrow_mut() = url.to_string();
        history
    }

    pub fn url(&self) -> String {
        self.url.borrow().clone()
    }

    pub fn replacements(&self) -> usize {
        *self.replacements.borrow()
    }
}

impl UrlHistory for MemoryHistory {
    type Error = Infallible;

    fn current_url(&self) -> String {
        self.url()
    }

    fn replace_query(&self, query: &str) -> Result<(), Self::Error> {
        let current = self.url();
        let base = current.split(['?', '#']).next().unwrap_or_default().to_string();
        *self.url.borrow_mut() = if query.is_empty() {
            base
        } else {
            format!("{base}?{query}")
        };
        *self.replacements.borrow_mut() += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeRow {
    pub class_name: String,
    pub href: Option<String>,
    pub name: String,
    pub rarity: String,
    pub price: String,
    pub original_price: Option<String>,
    pub decorated: bool,
    pub excluded: bool,
    pub custom_id: Option<ItemId>,
    pub preview_listener: bool,
}

/// In-memory host list. Rows live in an arena; `order` is document order.
#[derive(Debug, Default)]
pub struct FakePage {
    pub rows: Vec<FakeRow>,
    pub order: Vec<usize>,
    pub controls_installed: usize,
    pub listeners_attached: usize,
    pub directions: Option<SortState>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a native row linking to item `id`, with structural index `index`.
    pub fn push_item(&mut self, index: usize, id: u32, name: &str, rarity: &str, price: &str) {
        self.push_row(FakeRow {
            class_name: format!("contentrow row-{index}"),
            href: Some(format!(
                "https://shop.example/magicitems/magic-item?id={id}"
            )),
            name: name.to_string(),
            rarity: rarity.to_string(),
            price: format!("Value: {price}"),
            ..FakeRow::default()
        });
    }

    pub fn push_row(&mut self, row: FakeRow) -> usize {
        self.rows.push(row);
        let handle = self.rows.len() - 1;
        self.order.push(handle);
        handle
    }

    /// Native row by its link id.
    pub fn row_for(&self, id: u32) -> &FakeRow {
        let suffix = format!("id={id}");
        self.rows
            .iter()
            .find(|row| row.href.as_deref().is_some_and(|href| href.ends_with(&suffix)))
            .expect("row exists")
    }

    pub fn custom_rows(&self) -> Vec<&FakeRow> {
        self.order
            .iter()
            .map(|&handle| &self.rows[handle])
            .filter(|row| row.custom_id.is_some())
            .collect()
    }

    /// Names in document order.
    pub fn names(&self) -> Vec<&str> {
        self.order
            .iter()
            .map(|&handle| self.rows[handle].name.as_str())
            .collect()
    }
}

impl ShopPage for FakePage {
    type Row = usize;
    type Link = usize;

    fn item_rows(&self) -> Vec<usize> {
        self.order
            .iter()
            .copied()
            .filter(|&handle| self.rows[handle].custom_id.is_none())
            .collect()
    }

    fn row_facts(&self, row: &usize) -> RowFacts {
        let row = &self.rows[*row];
        RowFacts {
            href: row.href.clone(),
            data_id: None,
            name: Some(row.name.clone()),
        }
    }

    fn is_decorated(&self, row: &usize) -> bool {
        self.rows[*row].decorated
    }

    fn decorate_row(&mut self, row: &usize, _id: &ItemId) {
        let row = &mut self.rows[*row];
        row.original_price = Some(row.price.clone());
        row.decorated = true;
    }

    fn set_excluded(&mut self, row: &usize, excluded: bool) {
        self.rows[*row].excluded = excluded;
    }

    fn set_price_text(&mut self, row: &usize, text: &str) {
        self.rows[*row].price = text.to_string();
    }

    fn original_price(&self, row: &usize) -> Option<String> {
        self.rows[*row].original_price.clone()
    }

    fn custom_row_ids(&self) -> Vec<ItemId> {
        self.custom_rows()
            .into_iter()
            .filter_map(|row| row.custom_id.clone())
            .collect()
    }

    fn append_custom_row(&mut self, record: &CustomItemRecord, display_price: &str, excluded: bool) {
        self.push_row(FakeRow {
            class_name: "contentrow shoplist-custom-row".to_string(),
            name: record.name.clone(),
            rarity: record.rarity_label(),
            price: display_price.to_string(),
            original_price: Some(record.price.clone()),
            decorated: true,
            excluded,
            custom_id: Some(record.id.clone()),
            ..FakeRow::default()
        });
    }

    fn remove_custom_row(&mut self, id: &ItemId) {
        let rows = &self.rows;
        self.order
            .retain(|&handle| rows[handle].custom_id.as_ref() != Some(id));
    }

    fn previewable_links(&self) -> Vec<usize> {
        self.order
            .iter()
            .copied()
            .filter(|&handle| self.rows[handle].href.is_some())
            .collect()
    }

    fn has_preview_listener(&self, link: &usize) -> bool {
        self.rows[*link].preview_listener
    }

    fn attach_preview_listener(&mut self, link: &usize) {
        self.rows[*link].preview_listener = true;
        self.listeners_attached += 1;
    }

    fn has_list_controls(&self) -> bool {
        self.controls_installed > 0
    }

    fn install_list_controls(&mut self) {
        self.controls_installed += 1;
    }
}

impl SortableList for FakePage {
    type Row = usize;

    fn rows(&self) -> Vec<usize> {
        self.order.clone()
    }

    fn sort_key(&self, row: &usize) -> SortKey {
        let row = &self.rows[*row];
        SortKey::from_texts(&row.class_name, &row.rarity, &row.price)
    }

    fn custom_id(&self, row: &usize) -> Option<ItemId> {
        self.rows[*row].custom_id.clone()
    }

    fn reorder(&mut self, rows: &[usize]) {
        self.order = rows.to_vec();
    }

    fn show_directions(&mut self, state: &SortState) {
        self.directions = Some(*state);
    }
}

/// Four host rows in their original order.
pub fn sample_page() -> FakePage {
    let mut page = FakePage::new();
    page.push_item(0, 101, "Bag of Holding", "Uncommon", "500 gp");
    page.push_item(1, 102, "Cloak of Elvenkind", "Uncommon", "5,000 gp");
    page.push_item(2, 103, "Potion of Healing", "Common", "50 gp");
    page.push_item(3, 104, "Staff of Power", "Very Rare", "95,500 gp");
    page
}
