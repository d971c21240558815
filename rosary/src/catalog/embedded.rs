//! Embedded catalog
//!
//! Compiled into the binary so the viewer works without any data file.
//!
//! The builtin data marks "Fatima Prayer" `decade_only`, so it is prayed after
//! each decade but not in the opening block. Without the flag the opening
//! would carry it too (five opening steps, 33 in all instead of 32).

use tracing::debug;

/// The builtin `rosary.json`
pub const DEFAULT_CATALOG: &str = include_str!("../../catalog/rosary.json");

/// Name used for the builtin catalog in logs and diagnostics
pub const BUILTIN: &str = "builtin";

/// Get the embedded catalog source text
pub fn get_embedded() -> &'static str {
    debug!(len = DEFAULT_CATALOG.len(), "get_embedded: called");
    DEFAULT_CATALOG
}
