//! Centralized names and timings for the shop list engine.
//!
//! URL parameter names and popup delays live here so the query codec, the
//! configuration defaults and the hosts all agree on one set of values.

// URL parameters ----------------------------------------------------------
pub const PARAM_EXCLUDED: &str = "excluded";
pub const PARAM_PRICES: &str = "prices";
pub const PARAM_CUSTOM: &str = "custom";

// Encoding separators ------------------------------------------------------
pub(crate) const LIST_SEPARATOR: char = ',';
pub(crate) const PRICE_PAIR_SEPARATOR: char = ':';

// Popup timing ------------------------------------------------------------
/// Hover time before a preview materializes.
pub const SHOW_DELAY_MS: u32 = 300;
/// Time the pointer has to travel from a link onto the popup.
pub const HIDE_GRACE_MS: u32 = 100;

// Custom items ------------------------------------------------------------
pub const DEFAULT_CUSTOM_PRICE: &str = "0 gp";
pub const DEFAULT_CUSTOM_RARITY: &str = "C";
/// Custom ids carry an underscore, which neither numeric ids nor name slugs can contain.
pub const CUSTOM_ID_PREFIX: &str = "custom_";

// Previewable links -------------------------------------------------------
pub const ITEM_LINK_MARKER: &str = "/magicitems/magic-item?id=";
pub const SPELL_LINK_MARKER: &str = "/spells/spell?spellid=";
pub(crate) const ITEM_ID_QUERY_KEYS: [&str; 2] = ["id", "spellid"];

// Host page schema ----------------------------------------------------------
pub const ROW_SELECTOR: &str = ".contentrow";
pub const HEADER_ROW_SELECTOR: &str = ".headerrow";
pub const ITEM_LINK_SELECTOR: &str = "a[href*=\"/magicitems/magic-item?id=\"]";
pub const SPELL_LINK_SELECTOR: &str = ".spellnamelink a[href*=\"/spells/spell?spellid=\"]";
pub const RARITY_CELL_SELECTOR: &str = ".col-rarity";
pub const PRICE_CELL_SELECTOR: &str = ".col-value";
pub const ADD_ITEM_CONTROL_SELECTOR: &str = ".shoplist-add-row";
pub const ROW_INDEX_CLASS_PREFIX: &str = "row-";

// Remote preview shaping ------------------------------------------------------
pub const PREVIEW_HIDDEN_CHROME: &str = ".navbar, .footer, .sidebar, .breadcrumb, .nav-tabs";
pub const PREVIEW_TITLE_SELECTOR: &str = ".titlemain h1";
