//! Rosary - daily prayer sequence builder
//!
//! Selects the mystery theme for a date, expands it with the prayer catalog
//! into a numbered, localized sequence of steps, and lets a user step through
//! it in a terminal viewer.
//!
//! # Core Concepts
//!
//! - **Catalog**: prayer templates and weekly themes, loaded once per session
//! - **Theme selection**: the first theme whose weekday set contains the date's weekday
//! - **Sequence building**: opening prayers, five decades, closing prayers, numbered 1..N
//! - **Fresh render always**: every render rebuilds the sequence, nothing is cached
//!
//! # Modules
//!
//! - [`catalog`] - Catalog types, loading, name index and checks
//! - [`sequence`] - Theme selection, sequence building and localization
//! - [`session`] - View-model owning language, focus and date
//! - [`output`] - Text and JSON projections
//! - [`tui`] - Interactive terminal viewer
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use rosary::catalog::{CatalogIndex, BUILTIN, embedded, parse_catalog};
//! use rosary::sequence::{build_sequence, select_theme};
//!
//! let catalog = parse_catalog(embedded::get_embedded(), BUILTIN)?;
//! let theme = select_theme(&catalog, chrono::Local::now().date_naive())?.clone();
//! let steps = build_sequence(&CatalogIndex::new(catalog), &theme, "English")?;
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod sequence;
pub mod session;
pub mod tui;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogIndex, CatalogSource, StepTemplate, SubTheme, ThemeVariant, load_catalog};
pub use config::Config;
pub use error::RosaryError;
pub use sequence::{
    FallbackPolicy, LocalizationPolicy, RenderStep, SequenceBuilder, SequenceRules, StepKind, build_sequence,
    select_theme,
};
pub use session::{Rosary, Session};
