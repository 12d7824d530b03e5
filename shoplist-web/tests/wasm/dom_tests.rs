#![cfg(target_arch = "wasm32")]

use js_sys::{Function, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use shoplist_web::dom;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn refused_alert_is_reported_to_the_caller() {
    let window: JsValue = dom::window().expect("window").into();
    let key = JsValue::from_str("alert");
    let original = Reflect::get(&window, &key).expect("alert");
    let refuse = Function::new_no_args("throw new Error('dialogs blocked')");
    Reflect::set(&window, &key, &refuse).expect("replace alert");

    let result = dom::alert("Please enter an item name.");
    Reflect::set(&window, &key, &original).expect("restore alert");

    let err = result.expect_err("alert should fail");
    assert_eq!(dom::js_error_message(&err), "dialogs blocked");
}

#[wasm_bindgen_test]
fn accepted_alert_returns_ok() {
    let window: JsValue = dom::window().expect("window").into();
    let key = JsValue::from_str("alert");
    let original = Reflect::get(&window, &key).expect("alert");
    let accept = Function::new_no_args("");
    Reflect::set(&window, &key, &accept).expect("replace alert");

    let result = dom::alert("Please enter an item name.");
    Reflect::set(&window, &key, &original).expect("restore alert");

    assert!(result.is_ok());
}
