//! Rosary error types

use thiserror::Error;

/// Errors raised while loading a catalog or rendering a rosary
#[derive(Debug, Error)]
pub enum RosaryError {
    #[error("Catalog unavailable from {source_name}: {reason}")]
    CatalogUnavailable { source_name: String, reason: String },

    #[error("No mystery found for {weekday}")]
    ThemeNotFound { weekday: String },

    #[error("Rosary data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Step template not found: {0}")]
    MissingTemplate(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RosaryError {
    /// Build a `CatalogUnavailable` from any displayable cause
    pub fn catalog_unavailable(source_name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        RosaryError::CatalogUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}
