//! Prayer catalog: data types, loading, name index and checks
//!
//! The catalog is loaded once per session and never mutated afterwards.

mod check;
pub mod embedded;
mod index;
mod loader;
mod model;

pub use check::{CheckReport, Finding, MYSTERIES_PER_THEME, Severity, check_catalog};
pub use embedded::BUILTIN;
pub use index::CatalogIndex;
pub use loader::{CatalogSource, load_catalog, parse_catalog};
pub use model::{Catalog, CatalogDocument, LocalizedText, StepTemplate, SubTheme, ThemeVariant, WEEKDAYS};
