//! Catalog checks
//!
//! Reports problems that the builder tolerates silently: weekdays without a
//! theme, overlapping weekdays, missing templates and missing translations.
//! Nothing here is enforced at load time.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::index::CatalogIndex;
use super::model::WEEKDAYS;
use crate::sequence::SequenceRules;

/// Expected number of sub-themes per variant
pub const MYSTERIES_PER_THEME: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single catalog problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Result of checking a catalog
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub findings: Vec<Finding>,

    /// Templates flagged `decade_only`, kept out of the opening block
    pub decade_only: Vec<String>,
}

impl CheckReport {
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Check a catalog against the rules the builder will apply
pub fn check_catalog(index: &CatalogIndex, rules: &SequenceRules) -> CheckReport {
    debug!("check_catalog: called");
    let mut report = CheckReport::default();

    check_weekdays(index, &mut report);
    check_variants(index, &mut report);
    check_templates(index, rules, &mut report);
    check_translations(index, &mut report);

    debug!(findings = report.findings.len(), "check_catalog: done");
    report
}

fn check_weekdays(index: &CatalogIndex, report: &mut CheckReport) {
    for day in WEEKDAYS {
        let covering: Vec<&str> = index
            .variants()
            .iter()
            .filter(|v| v.applies_on(day))
            .map(|v| v.label.as_str())
            .collect();

        match covering.as_slice() {
            [] => report.findings.push(Finding::error(format!("No mystery covers {}", day))),
            [_] => {}
            [first, ..] => report.findings.push(Finding::warning(format!(
                "{} is covered by {}; {} wins",
                day,
                covering.join(", "),
                first
            ))),
        }
    }
}

fn check_variants(index: &CatalogIndex, report: &mut CheckReport) {
    for variant in index.variants() {
        if variant.mysteries.len() != MYSTERIES_PER_THEME {
            report.findings.push(Finding::warning(format!(
                "{} has {} mysteries, expected {}",
                variant.label,
                variant.mysteries.len(),
                MYSTERIES_PER_THEME
            )));
        }
        for day in &variant.days {
            if !WEEKDAYS.contains(&day.as_str()) {
                report.findings.push(Finding::warning(format!(
                    "{} lists unknown weekday '{}'",
                    variant.label, day
                )));
            }
        }
    }
}

fn check_templates(index: &CatalogIndex, rules: &SequenceRules, report: &mut CheckReport) {
    let mut seen = HashSet::new();
    for step in index.steps() {
        if !seen.insert(step.name.as_str()) {
            report.findings.push(Finding::warning(format!(
                "Duplicate step template '{}'; only the first is used by name",
                step.name
            )));
        }
        if step.decade_only {
            report.decade_only.push(step.name.clone());
        }
        if step.prayer.is_none() && step.details.is_none() {
            report
                .findings
                .push(Finding::warning(format!("'{}' has neither prayer nor details", step.name)));
        }
    }

    for name in rules.referenced_names() {
        if !index.contains(name) {
            report.findings.push(Finding::warning(format!(
                "Step template not found: {}; the step will be omitted",
                name
            )));
        }
    }
}

fn check_translations(index: &CatalogIndex, report: &mut CheckReport) {
    let languages = index.catalog().languages();

    for step in index.steps() {
        let Some(prayer) = &step.prayer else { continue };
        let missing: Vec<&str> = languages
            .iter()
            .filter(|l| !prayer.contains_key(*l))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            report.findings.push(Finding::warning(format!(
                "'{}' has no {} text",
                step.name,
                missing.join("/")
            )));
        }
    }

    for variant in index.variants() {
        for sub in variant.mysteries.iter().filter(|s| !s.reflection.is_empty()) {
            let missing: Vec<&str> = languages
                .iter()
                .filter(|l| !sub.reflection.contains_key(*l))
                .map(String::as_str)
                .collect();
            if !missing.is_empty() {
                report.findings.push(Finding::warning(format!(
                    "{} / '{}' has no {} reflection",
                    variant.label,
                    sub.name,
                    missing.join("/")
                )));
            }
        }
    }
}
