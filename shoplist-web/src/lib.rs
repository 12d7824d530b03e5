#![forbid(unsafe_code)]
//! Browser content script for item listing pages.
//!
//! Adds hover previews for item and spell links, and turns the listing into
//! an editable shop list whose state lives in the page URL.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod components;
pub mod context;
pub mod dom;
pub mod editor;
pub mod location;
pub mod logger;
pub mod page;
pub mod popup;
pub mod styles;
pub mod watcher;

use std::cell::Cell;

use shoplist_engine::{ConfigError, ShopConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("configuration could not be read: {0}")]
    Decode(String),
    #[error("DOM setup failed: {0}")]
    Dom(String),
    #[error("already installed in this document")]
    AlreadyInstalled,
}

impl From<wasm_bindgen::JsValue> for InstallError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(dom::js_error_message(&value))
    }
}

thread_local! {
    static INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Wire everything into the current document.
///
/// # Errors
/// Returns an error if the configuration is invalid or the page cannot be
/// decorated at all.
pub fn install(config: ShopConfig) -> Result<context::ShopContext, InstallError> {
    config.validate()?;
    styles::inject();
    let ctx = context::ShopContext::new(config)?;
    ctx.bind_document()?;
    ctx.initialize();
    watcher::watch(&ctx)?;
    Ok(ctx)
}

/// Install once the document has parsed. Only the first call per document
/// installs; the loader entry point and autostart never both take effect.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn install_when_ready(config: ShopConfig) {
    if INSTALLED.with(|installed| installed.replace(true)) {
        dom::console_error(&format!("shoplist: {}", InstallError::AlreadyInstalled));
        return;
    }
    let run = move || {
        if let Err(err) = install(config) {
            dom::console_error(&format!("shoplist: {err}"));
        }
    };
    match dom::document() {
        Some(doc) if doc.ready_state() == "loading" => {
            let mut run = Some(run);
            let listened = dom::listen(&doc, "DOMContentLoaded", move |_: web_sys::Event| {
                if let Some(run) = run.take() {
                    run();
                }
            });
            if let Err(err) = listened {
                dom::console_error(&format!(
                    "shoplist: could not wait for the document: {}",
                    dom::js_error_message(&err)
                ));
            }
        }
        Some(_) => run(),
        None => dom::console_error("shoplist: no document to install into"),
    }
}

/// Decode a loader-supplied configuration. Anything unusable is logged and
/// replaced by the defaults.
#[must_use]
pub fn config_or_default(decoded: Result<ShopConfig, InstallError>) -> ShopConfig {
    let checked = decoded.and_then(|config| {
        config.validate()?;
        Ok(config)
    });
    checked.unwrap_or_else(|err| {
        log::warn!("Ignoring configuration, using defaults: {err}");
        ShopConfig::default()
    })
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init();
    #[cfg(feature = "autostart")]
    install_when_ready(ShopConfig::default());
}

/// Install with a configuration object from the extension loader. Missing
/// fields take their default values; build without the `autostart` feature
/// so this call is the one that installs.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = installWithConfig)]
pub fn install_with_config(config: JsValue) {
    logger::init();
    let decoded = if config.is_undefined() || config.is_null() {
        Ok(ShopConfig::default())
    } else {
        serde_wasm_bindgen::from_value(config).map_err(|err| InstallError::Decode(err.to_string()))
    };
    install_when_ready(config_or_default(decoded));
}
