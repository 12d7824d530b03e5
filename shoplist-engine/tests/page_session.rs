mod common;

use common::{FakeRow, MemoryHistory, sample_page};
use shoplist_engine::{
    ContentChange, CustomItemDraft, DraftError, ItemId, PreviewSource, ShopConfig, ShopSession,
};

const LIST_URL: &str = "https://shop.example/magicitems?source=dmg";

fn session_at(url: &str) -> (ShopSession<MemoryHistory, usize>, MemoryHistory) {
    let history = MemoryHistory::at(url);
    let session = ShopSession::new(history.clone(), ShopConfig::default());
    (session, history)
}

fn ring_draft() -> CustomItemDraft {
    CustomItemDraft {
        name: "Ring of X".to_string(),
        rarity: "R".to_string(),
        price: "500 gp".to_string(),
        description: "Glows faintly.".to_string(),
    }
}

#[test]
fn decoration_is_idempotent() {
    let (mut session, history) = session_at(LIST_URL);
    let mut page = sample_page();

    let first = session.initialize(&mut page);
    assert_eq!(first.rows_decorated, 4);
    assert!(first.controls_installed);
    assert_eq!(first.links_attached, 4);

    let second = session.initialize(&mut page);
    assert!(!second.changed());
    assert_eq!(second.rows_seen, 4);
    assert_eq!(page.controls_installed, 1);
    assert_eq!(page.listeners_attached, 4);
    assert_eq!(history.replacements(), 0);
}

#[test]
fn hydrated_state_is_applied_to_rows() {
    let url = format!("{LIST_URL}&excluded=102&prices=103%3A40+gp");
    let (mut session, _) = session_at(&url);
    let mut page = sample_page();
    session.initialize(&mut page);

    assert!(page.row_for(102).excluded);
    assert!(!page.row_for(101).excluded);
    assert_eq!(page.row_for(103).price, "40 gp");
    assert_eq!(page.row_for(103).original_price.as_deref(), Some("Value: 50 gp"));
}

#[test]
fn rows_without_any_identity_are_skipped() {
    let (mut session, _) = session_at(LIST_URL);
    let mut page = sample_page();
    page.push_row(FakeRow {
        class_name: "contentrow row-4".to_string(),
        name: "  ".to_string(),
        ..FakeRow::default()
    });
    let report = session.initialize(&mut page);
    assert_eq!(report.rows_without_id, 1);
    assert_eq!(report.rows_decorated, 4);
}

#[test]
fn custom_item_lifecycle() {
    let (mut session, history) = session_at(LIST_URL);
    let mut page = sample_page();
    session.initialize(&mut page);

    let id = session
        .add_custom_item(&mut page, ring_draft(), 1_700_000_000_000)
        .unwrap();
    assert_eq!(id.as_str(), "custom_1700000000000");
    assert_eq!(session.list().state().custom_items.len(), 1);
    let custom = page.custom_rows();
    assert_eq!(custom.len(), 1);
    assert_eq!(custom[0].name, "Ring of X");
    assert_eq!(custom[0].rarity, "Rare");
    assert_eq!(custom[0].price, "500 gp");
    assert!(history.url().starts_with(&format!("{LIST_URL}&custom=")));

    let Some(PreviewSource::Custom(preview)) = session.custom_preview(id.as_str()) else {
        panic!("custom rows preview their own record");
    };
    assert_eq!(preview.value, "500 gp");
    assert_eq!(preview.description, "Glows faintly.");

    assert!(session.delete_custom_item(&mut page, &id));
    assert!(session.list().state().custom_items.is_empty());
    assert!(page.custom_rows().is_empty());
    assert_eq!(history.url(), LIST_URL);
}

#[test]
fn custom_rows_survive_reload() {
    let (mut session, history) = session_at(LIST_URL);
    let mut page = sample_page();
    session.initialize(&mut page);
    let id = session.add_custom_item(&mut page, ring_draft(), 42).unwrap();
    session.list_mut().toggle_excluded(&id);
    session.list_mut().set_price_override(&id, "450 gp");

    let (mut reloaded, _) = session_at(&history.url());
    let mut fresh = sample_page();
    let report = reloaded.initialize(&mut fresh);
    assert_eq!(report.custom_added, 1);
    let custom = fresh.custom_rows();
    assert_eq!(custom[0].price, "450 gp");
    assert!(custom[0].excluded);
    assert_eq!(reloaded.list().state(), session.list().state());
}

#[test]
fn blank_name_adds_nothing() {
    let (mut session, history) = session_at(LIST_URL);
    let mut page = sample_page();
    session.initialize(&mut page);

    let draft = CustomItemDraft {
        name: "   ".to_string(),
        ..ring_draft()
    };
    let err = session.add_custom_item(&mut page, draft, 7).unwrap_err();
    assert_eq!(err, DraftError::MissingName);
    assert!(page.custom_rows().is_empty());
    assert_eq!(history.replacements(), 0);
}

#[test]
fn zero_gp_commit_clears_override_from_state_and_url() {
    let url = format!("{LIST_URL}&prices=101%3A450+gp");
    let (mut session, history) = session_at(&url);
    let id = ItemId::from("101");

    let shown = session
        .list_mut()
        .commit_price_edit(&id, "0 gp", "Value: 500 gp");
    assert_eq!(shown, "Value: 500 gp");
    assert_eq!(session.list().state().price_override("101"), None);
    assert_eq!(history.url(), LIST_URL);
}

#[test]
fn reset_restores_native_rows_and_drops_custom_rows() {
    let url = format!("{LIST_URL}&excluded=101&prices=104%3A1+gp");
    let (mut session, history) = session_at(&url);
    let mut page = sample_page();
    session.initialize(&mut page);
    session.add_custom_item(&mut page, ring_draft(), 9).unwrap();

    session.reset(&mut page);
    assert!(session.list().state().is_empty());
    assert!(!page.row_for(101).excluded);
    assert_eq!(page.row_for(104).price, "Value: 95,500 gp");
    assert!(page.custom_rows().is_empty());
    assert_eq!(history.url(), LIST_URL);
}

#[test]
fn injected_rows_are_decorated_after_one_coalesced_refresh() {
    let (mut session, _) = session_at(&format!("{LIST_URL}&excluded=105"));
    let mut page = sample_page();
    session.initialize(&mut page);

    page.push_item(4, 105, "Wand of Web", "Uncommon", "400 gp");
    assert!(session.notify_change(ContentChange::added(1)));
    assert!(!session.notify_change(ContentChange::added(2)));

    let report = session.refresh(&mut page);
    assert_eq!(report.rows_decorated, 1);
    assert_eq!(report.links_attached, 1);
    assert!(page.row_for(105).excluded);
    assert!(session.notify_change(ContentChange::added(1)));
}
