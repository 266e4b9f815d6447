//! Shared constants for the board crate.

// ── DOM markers ─────────────────────────────────────────────────

/// Attribute that tags a column container element with its column name.
pub const COLUMN_TAG_ATTR: &str = "data-area";

// ── Orders ──────────────────────────────────────────────────────

/// Prefix of generated order ids; the store sequence number follows it.
pub const ORDER_ID_PREFIX: &str = "order";

/// Table preselected in the add form.
pub const DEFAULT_TABLE: &str = "1";
