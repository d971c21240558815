//! Text and JSON projections for the non-interactive commands

use colored::*;
use serde::Serialize;

use crate::catalog::{CatalogIndex, CheckReport, Severity};
use crate::error::RosaryError;
use crate::sequence::StepKind;
use crate::session::Rosary;

/// Theme summary used by `rosary themes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeSummary {
    pub label: String,
    pub days: Vec<String>,
    pub mysteries: Vec<String>,
    pub today: bool,
}

/// Summarize every theme variant, marking the one that applies on `weekday`
///
/// Only the first matching variant is marked, matching selection order.
pub fn theme_summaries(index: &CatalogIndex, weekday: &str) -> Vec<ThemeSummary> {
    let mut marked = false;
    index
        .variants()
        .iter()
        .map(|v| {
            let today = !marked && v.applies_on(weekday);
            marked |= today;
            ThemeSummary {
                label: v.label.clone(),
                days: v.days.clone(),
                mysteries: v.mysteries.iter().map(|m| m.name.clone()).collect(),
                today,
            }
        })
        .collect()
}

/// Plain text rendering of a rosary
pub fn rosary_text(rosary: &Rosary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({} {}, {})\n",
        rosary.header().bold(),
        rosary.weekday,
        rosary.date,
        rosary.language
    ));

    for step in &rosary.steps {
        out.push('\n');
        let title = match step.kind {
            StepKind::Announcement => step.title.yellow().bold(),
            _ => step.title.cyan().bold(),
        };
        out.push_str(&format!("{}\n", title));
        if let Some(text) = &step.text {
            out.push_str(&format!("{}\n", text));
        }
    }
    out
}

pub fn themes_text(themes: &[ThemeSummary]) -> String {
    let mut out = String::new();
    for theme in themes {
        let marker = if theme.today { "*".green().to_string() } else { " ".to_string() };
        out.push_str(&format!(
            "{} {:<12} {}\n",
            marker,
            theme.label.cyan(),
            theme.days.join(", ").dimmed()
        ));
        for (i, name) in theme.mysteries.iter().enumerate() {
            out.push_str(&format!("    {}. {}\n", i + 1, name));
        }
    }
    out
}

pub fn check_text(report: &CheckReport) -> String {
    let mut out = String::new();
    if report.is_clean() {
        out.push_str(&format!("{} Catalog OK\n", "✓".green()));
    } else {
        for finding in &report.findings {
            let label = match finding.severity {
                Severity::Error => finding.severity.to_string().red().bold(),
                Severity::Warning => finding.severity.to_string().yellow(),
            };
            out.push_str(&format!("{}: {}\n", label, finding.message));
        }
        out.push_str(&format!(
            "{} error(s), {} warning(s)\n",
            report.errors().count(),
            report.warnings().count()
        ));
    }

    if !report.decade_only.is_empty() {
        out.push_str(&format!(
            "{}: decade-only, not prayed in the opening: {}\n",
            "note".cyan(),
            report.decade_only.join(", ")
        ));
    }
    out
}

/// Pretty JSON for any serializable output
pub fn to_json<T: Serialize>(value: &T) -> Result<String, RosaryError> {
    Ok(serde_json::to_string_pretty(value)?)
}
