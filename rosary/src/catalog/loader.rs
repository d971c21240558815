//! Catalog loading
//!
//! The catalog is fetched exactly once per session. Loading is the only
//! asynchronous step; nothing may select a theme or build a sequence until
//! it has resolved.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, error, info};

use super::embedded::{self, BUILTIN};
use super::model::{Catalog, CatalogDocument};
use crate::error::RosaryError;

/// Where a catalog comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// The catalog compiled into the binary
    Embedded,
    /// A local JSON file
    File(PathBuf),
    /// An `http://` or `https://` URL
    Url(String),
}

impl CatalogSource {
    /// Interpret a configured catalog location
    ///
    /// Empty or `builtin` selects the embedded catalog, anything with an
    /// http(s) scheme is fetched, everything else is a file path.
    pub fn parse(location: &str) -> Self {
        debug!(%location, "CatalogSource::parse: called");
        let location = location.trim();
        if location.is_empty() || location == BUILTIN {
            Self::Embedded
        } else if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else if let Some(rest) = location.strip_prefix("~/") {
            match dirs::home_dir() {
                Some(home) => Self::File(home.join(rest)),
                None => Self::File(PathBuf::from(location)),
            }
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => write!(f, "{}", BUILTIN),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Parse a `rosary.json` document
pub fn parse_catalog(json: &str, source_name: &str) -> Result<Catalog, RosaryError> {
    debug!(%source_name, len = json.len(), "parse_catalog: called");
    let document: CatalogDocument =
        serde_json::from_str(json).map_err(|e| RosaryError::catalog_unavailable(source_name, e))?;

    let catalog = document.rosary;
    if catalog.is_empty() {
        return Err(RosaryError::catalog_unavailable(
            source_name,
            "catalog contains no steps or mysteries",
        ));
    }

    debug!(
        steps = catalog.steps.len(),
        variants = catalog.mysteries.len(),
        "parse_catalog: parsed"
    );
    Ok(catalog)
}

/// Load a catalog from its source
pub async fn load_catalog(source: &CatalogSource, timeout: Duration) -> Result<Catalog, RosaryError> {
    debug!(%source, ?timeout, "load_catalog: called");
    let name = source.to_string();

    let result = match source {
        CatalogSource::Embedded => parse_catalog(embedded::get_embedded(), &name),
        CatalogSource::File(path) => match tokio::fs::read_to_string(path).await {
            Ok(json) => parse_catalog(&json, &name),
            Err(e) => Err(RosaryError::catalog_unavailable(&name, e)),
        },
        CatalogSource::Url(url) => match fetch(url, timeout).await {
            Ok(json) => parse_catalog(&json, &name),
            Err(e) => Err(e),
        },
    };

    match &result {
        Ok(catalog) => info!(
            source = %name,
            steps = catalog.steps.len(),
            variants = catalog.mysteries.len(),
            "Loaded catalog"
        ),
        Err(e) => error!(source = %name, "Error fetching the catalog: {}", e),
    }
    result
}

async fn fetch(url: &str, timeout: Duration) -> Result<String, RosaryError> {
    debug!(%url, "fetch: called");
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| RosaryError::catalog_unavailable(url, e))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| RosaryError::catalog_unavailable(url, e))?;

    let status = response.status();
    if !status.is_success() {
        debug!(%status, "fetch: non-success status");
        return Err(RosaryError::catalog_unavailable(
            url,
            format!("Failed to load: {}", status),
        ));
    }

    response
        .text()
        .await
        .map_err(|e| RosaryError::catalog_unavailable(url, e))
}
