//! Catalog data types
//!
//! These mirror the `rosary.json` wire format:
//!
//! ```text
//! { "rosary": { "steps": [StepTemplate...], "mysteries": [ThemeVariant...] } }
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Per-language text, keyed by language code ("English", "Japanese", ...)
pub type LocalizedText = BTreeMap<String, String>;

/// Weekday names in Sunday-first order
pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// A named prayer or instruction referenced from the sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTemplate {
    /// Ordinal hint from the data file; never used for numbering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,

    /// Template name, unique within a catalog
    pub name: String,

    /// Prayer text per language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prayer: Option<LocalizedText>,

    /// Fixed, non-localized detail text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Never emit this template in the opening block
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub decade_only: bool,
}

impl StepTemplate {
    /// Create a template carrying only detail text
    pub fn with_details(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            step: None,
            name: name.into(),
            prayer: None,
            details: Some(details.into()),
            decade_only: false,
        }
    }

    /// Create a template carrying prayer text for the given languages
    pub fn with_prayer<I, K, V>(name: impl Into<String>, prayer: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            step: None,
            name: name.into(),
            prayer: Some(prayer.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
            details: None,
            decade_only: false,
        }
    }
}

/// One of the meditative foci of a theme variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SubThemeRepr")]
pub struct SubTheme {
    pub name: String,

    /// Reflection text keyed by language
    #[serde(default, skip_serializing_if = "LocalizedText::is_empty")]
    pub reflection: LocalizedText,

    /// Reflection shown in every language when `reflection` is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Accepted encodings of a sub-theme: a bare name or a full object
#[derive(Deserialize)]
#[serde(untagged)]
enum SubThemeRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        reflection: LocalizedText,
        #[serde(default)]
        details: Option<String>,
    },
}

impl From<SubThemeRepr> for SubTheme {
    fn from(repr: SubThemeRepr) -> Self {
        match repr {
            SubThemeRepr::Name(name) => SubTheme::bare(name),
            SubThemeRepr::Full {
                name,
                reflection,
                details,
            } => SubTheme {
                name,
                reflection,
                details,
            },
        }
    }
}

impl SubTheme {
    /// A sub-theme known only by name; the same reflection in every language
    pub fn bare(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            details: Some(format!("Reflect on the {}", name)),
            reflection: LocalizedText::new(),
            name,
        }
    }
}

/// A weekly rotating theme ("Joyful", "Sorrowful", ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeVariant {
    /// Display label
    #[serde(rename = "type")]
    pub label: String,

    /// Weekday names on which this variant applies
    pub days: Vec<String>,

    /// Ordered sub-themes, normally five
    pub mysteries: Vec<SubTheme>,
}

impl ThemeVariant {
    /// Check whether this variant applies on the given weekday name
    pub fn applies_on(&self, weekday: &str) -> bool {
        self.days.iter().any(|d| d == weekday)
    }
}

/// Root container of templates and theme variants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub steps: Vec<StepTemplate>,

    #[serde(default)]
    pub mysteries: Vec<ThemeVariant>,
}

impl Catalog {
    /// All language codes that appear in any prayer or reflection
    pub fn languages(&self) -> BTreeSet<String> {
        let prayers = self.steps.iter().filter_map(|s| s.prayer.as_ref()).flat_map(|p| p.keys());
        let reflections = self
            .mysteries
            .iter()
            .flat_map(|v| v.mysteries.iter())
            .flat_map(|m| m.reflection.keys());
        prayers.chain(reflections).cloned().collect()
    }

    /// Check whether the catalog has nothing to build from
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty() && self.mysteries.is_empty()
    }
}

/// The `rosary.json` document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub rosary: Catalog,
}
