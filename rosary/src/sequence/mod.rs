//! Theme selection and sequence building
//!
//! Both are pure functions of their inputs: the catalog, a date, a language.

mod builder;
mod localize;
mod theme;

pub use builder::{RenderStep, SequenceBuilder, SequenceRules, StepKind, build_sequence};
pub use localize::{DEFAULT_LANGUAGE, FallbackPolicy, LocalizationPolicy};
pub use theme::{select_theme, weekday_name};
