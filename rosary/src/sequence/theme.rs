//! Theme selection by weekday

use chrono::{Datelike, NaiveDate};
use tracing::{debug, error};

use crate::catalog::{Catalog, ThemeVariant, WEEKDAYS};
use crate::error::RosaryError;

/// Weekday name of a date, from the Sunday-first list
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_sunday() as usize]
}

/// Select the theme variant for a date
///
/// Returns the first variant in catalog order whose day set contains the
/// date's weekday name.
pub fn select_theme(catalog: &Catalog, date: NaiveDate) -> Result<&ThemeVariant, RosaryError> {
    let weekday = weekday_name(date);
    debug!(%date, %weekday, "select_theme: called");

    match catalog.mysteries.iter().find(|v| v.applies_on(weekday)) {
        Some(variant) => {
            debug!(label = %variant.label, "select_theme: matched");
            Ok(variant)
        }
        None => {
            error!(%weekday, "No mystery found for today");
            Err(RosaryError::ThemeNotFound {
                weekday: weekday.to_string(),
            })
        }
    }
}
