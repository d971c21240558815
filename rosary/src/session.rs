//! Session view-model
//!
//! Owns everything the viewer changes between renders: the loaded catalog,
//! the current language, the focused step and the date. Every render and
//! every navigation re-derives the sequence from scratch.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::catalog::CatalogIndex;
use crate::error::RosaryError;
use crate::sequence::{RenderStep, SequenceBuilder, select_theme, weekday_name};

/// A rendered rosary for one date and language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rosary {
    /// Theme label ("Joyful", "Glorious", ...)
    pub theme: String,
    pub weekday: String,
    pub date: NaiveDate,
    pub language: String,
    pub steps: Vec<RenderStep>,
}

impl Rosary {
    pub fn header(&self) -> String {
        format!("Today's Mystery: {}", self.theme)
    }
}

/// Render state for one viewer session
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Option<CatalogIndex>,
    builder: SequenceBuilder,
    language: String,
    focus: usize,
    date: NaiveDate,
}

impl Session {
    /// Create a session whose catalog is still loading
    pub fn new(builder: SequenceBuilder, language: impl Into<String>, date: NaiveDate) -> Self {
        let language = language.into();
        debug!(%language, %date, "Session::new: called");
        Self {
            catalog: None,
            builder,
            language,
            focus: 0,
            date,
        }
    }

    /// Create a session over an already loaded catalog
    pub fn with_catalog(
        catalog: CatalogIndex,
        builder: SequenceBuilder,
        language: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        let mut session = Self::new(builder, language, date);
        session.attach_catalog(catalog);
        session
    }

    /// Install the catalog once loading has finished
    pub fn attach_catalog(&mut self, catalog: CatalogIndex) {
        info!(steps = catalog.steps().len(), "Session: catalog attached");
        self.catalog = Some(catalog);
        self.focus = 0;
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn catalog(&self) -> Option<&CatalogIndex> {
        self.catalog.as_ref()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Index of the focused step
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Render the rosary for the current date and language
    pub fn render(&self) -> Result<Rosary, RosaryError> {
        debug!(language = %self.language, date = %self.date, "Session::render: called");
        self.try_render().inspect_err(|e| {
            if let RosaryError::DataUnavailable(_) = e {
                error!(error = %e, "Session::render: nothing to render");
            }
        })
    }

    fn try_render(&self) -> Result<Rosary, RosaryError> {
        let index = self
            .catalog
            .as_ref()
            .ok_or_else(|| RosaryError::DataUnavailable("catalog not loaded".to_string()))?;

        let theme = select_theme(index.catalog(), self.date)?;
        let steps = self.builder.build(index, theme, &self.language)?;

        Ok(Rosary {
            theme: theme.label.clone(),
            weekday: weekday_name(self.date).to_string(),
            date: self.date,
            language: self.language.clone(),
            steps,
        })
    }

    /// Languages offered by the catalog, in sorted order
    pub fn languages(&self) -> Vec<String> {
        self.catalog
            .as_ref()
            .map(|c| c.catalog().languages().into_iter().collect())
            .unwrap_or_default()
    }

    /// Switch language; returns true if it changed
    pub fn set_language(&mut self, language: impl Into<String>) -> bool {
        let language = language.into();
        if language == self.language {
            return false;
        }
        info!(from = %self.language, to = %language, "Language changed");
        self.language = language;
        true
    }

    /// Move to the next language offered by the catalog, wrapping around
    pub fn cycle_language(&mut self) -> bool {
        let languages = self.languages();
        if languages.is_empty() {
            return false;
        }
        let next = match languages.iter().position(|l| *l == self.language) {
            Some(i) => (i + 1) % languages.len(),
            None => 0,
        };
        self.set_language(languages[next].clone())
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        debug!(%date, "Session::set_date: called");
        self.date = date;
        self.focus = 0;
    }

    /// Focus the next step; stays on the last one
    pub fn next_step(&mut self) -> Result<(), RosaryError> {
        let len = self.step_count()?;
        if len > 0 && self.focus < len - 1 {
            self.focus += 1;
        }
        Ok(())
    }

    /// Focus the previous step; stays on the first one
    pub fn prev_step(&mut self) -> Result<(), RosaryError> {
        self.step_count()?;
        self.focus = self.focus.saturating_sub(1);
        Ok(())
    }

    pub fn first_step(&mut self) {
        self.focus = 0;
    }

    pub fn last_step(&mut self) -> Result<(), RosaryError> {
        let len = self.step_count()?;
        self.focus = len.saturating_sub(1);
        Ok(())
    }

    fn step_count(&self) -> Result<usize, RosaryError> {
        Ok(self.render()?.steps.len())
    }
}
