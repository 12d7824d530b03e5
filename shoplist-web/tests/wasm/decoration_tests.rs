#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

use shoplist_engine::ShopConfig;
use shoplist_web::dom;

wasm_bindgen_test_configure!(run_in_browser);

const LISTING: &str = r#"
<div class="headerrow"><div class="col-name">Name</div><div class="col-rarity">Rarity</div><div class="col-value">Value</div></div>
<div class="contentrow row-0"><a href="/magicitems/magic-item?id=11">Bag of Holding</a><div class="col-rarity">Uncommon</div><div class="col-value">Value: 500 gp</div></div>
<div class="contentrow row-1"><a href="/magicitems/magic-item?id=12">Potion of Healing</a><div class="col-rarity">Common</div><div class="col-value">Value: 50 gp</div></div>
<div class="contentrow row-2"><span class="spellnamelink"><a href="/spells/spell?spellid=7">Fireball</a></span><div class="col-rarity">Rare</div><div class="col-value">Value: 900 gp</div></div>
"#;

fn fixture(query: &str) -> Element {
    let window = dom::window().expect("window");
    let path = window.location().pathname().expect("pathname");
    let url = if query.is_empty() {
        path
    } else {
        format!("{path}?{query}")
    };
    window
        .history()
        .expect("history")
        .replace_state_with_url(&JsValue::NULL, "", Some(&url))
        .expect("reset url");

    let doc = dom::document().expect("document");
    for stale in dom::query_document(".shoplist-fixture, .shoplist-popup, .shoplist-add-row") {
        stale.remove();
    }
    let root = doc.create_element("div").expect("fixture root");
    root.set_class_name("shoplist-fixture");
    root.set_inner_html(LISTING);
    doc.body()
        .expect("body")
        .append_child(&root)
        .expect("append fixture");
    root
}

fn row(root: &Element, id: u32) -> Element {
    root.query_selector(&format!("[data-shoplist-id=\"{id}\"]"))
        .expect("query row")
        .expect("decorated row")
}

fn click(el: &Element) {
    el.dyn_ref::<HtmlElement>().expect("html element").click();
}

#[wasm_bindgen_test]
fn rows_are_decorated_once_with_url_state() {
    let root = fixture("excluded=12&prices=11%3A450+gp");
    let ctx = shoplist_web::install(ShopConfig::default()).expect("install");

    let bag = row(&root, 11);
    assert_eq!(
        bag.query_selector(".col-value").unwrap().unwrap().text_content().as_deref(),
        Some("Value: 450 gp")
    );
    assert!(row(&root, 12).class_list().contains("shoplist-excluded"));
    assert_eq!(dom::query_all(&root, ".shoplist-toggle").len(), 3);
    assert_eq!(dom::query_all(&root, "[data-popup-listener=\"true\"]").len(), 3);

    ctx.initialize();
    assert_eq!(dom::query_all(&root, ".shoplist-toggle").len(), 3);
    assert_eq!(dom::query_document(".shoplist-add-row").len(), 1);
}

#[wasm_bindgen_test]
fn exclusion_toggle_writes_the_url() {
    let root = fixture("");
    shoplist_web::install(ShopConfig::default()).expect("install");

    let toggle = row(&root, 11)
        .query_selector(".shoplist-toggle")
        .unwrap()
        .unwrap();
    click(&toggle);
    let search = dom::window().unwrap().location().search().unwrap();
    assert_eq!(search, "?excluded=11");
    assert!(row(&root, 11).class_list().contains("shoplist-excluded"));

    click(&toggle);
    assert_eq!(dom::window().unwrap().location().search().unwrap(), "");
}

#[wasm_bindgen_test]
fn sort_buttons_cycle_back_to_original_order() {
    let root = fixture("");
    shoplist_web::install(ShopConfig::default()).expect("install");

    let names = || {
        dom::query_all(&root, ".contentrow a")
            .iter()
            .map(|a| a.text_content().unwrap_or_default())
            .collect::<Vec<_>>()
    };
    let original = names();
    let price = dom::query_document(".shoplist-sort[data-sort-column=\"Price\"]")
        .into_iter()
        .next()
        .expect("price sort button");

    click(&price);
    assert_eq!(names()[0], "Potion of Healing");
    assert_eq!(price.text_content().as_deref(), Some("Price ▲"));
    click(&price);
    assert_eq!(names()[0], "Fireball");
    click(&price);
    assert_eq!(names(), original);
}
