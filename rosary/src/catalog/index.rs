//! Name index over a loaded catalog

use std::collections::HashMap;

use tracing::{debug, warn};

use super::model::{Catalog, StepTemplate, ThemeVariant};
use crate::error::RosaryError;

/// A read-only catalog with O(1) template lookup by name
///
/// Built once after load. When two templates share a name the first one in
/// catalog order wins.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    catalog: Catalog,
    by_name: HashMap<String, usize>,
}

impl CatalogIndex {
    /// Index a catalog
    pub fn new(catalog: Catalog) -> Self {
        debug!(steps = catalog.steps.len(), "CatalogIndex::new: called");
        let mut by_name = HashMap::with_capacity(catalog.steps.len());
        for (i, step) in catalog.steps.iter().enumerate() {
            if by_name.contains_key(&step.name) {
                warn!(name = %step.name, position = i, "Duplicate step template name, keeping the first");
                continue;
            }
            by_name.insert(step.name.clone(), i);
        }
        Self { catalog, by_name }
    }

    /// The underlying catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Step templates in catalog order
    pub fn steps(&self) -> &[StepTemplate] {
        &self.catalog.steps
    }

    /// Theme variants in catalog order
    pub fn variants(&self) -> &[ThemeVariant] {
        &self.catalog.mysteries
    }

    /// Look up a template by exact name
    pub fn get(&self, name: &str) -> Result<&StepTemplate, RosaryError> {
        self.find(name)
            .ok_or_else(|| RosaryError::MissingTemplate(name.to_string()))
    }

    /// Look up a template by exact name, if present
    pub fn find(&self, name: &str) -> Option<&StepTemplate> {
        self.by_name.get(name).map(|&i| &self.catalog.steps[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }
}
