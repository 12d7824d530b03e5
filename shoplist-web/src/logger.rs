//! `log` backend writing to the browser console.
//!
//! The level comes from `SHOPLIST_LOG_LEVEL` at compile time and defaults to
//! `info`.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from(format!(
            "[shoplist {}] {}",
            record.level(),
            record.args()
        ));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Parse a level name; unknown or missing names fall back to `info`.
#[must_use]
pub fn level_from(name: Option<&str>) -> LevelFilter {
    name.and_then(|name| name.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the console logger. Safe to call more than once.
pub fn init() {
    let level = level_from(option_env!("SHOPLIST_LOG_LEVEL"));
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
