//! Localized text resolution

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::catalog::LocalizedText;

/// Language used when nothing else is configured
pub const DEFAULT_LANGUAGE: &str = "English";

/// What to do when a text has no entry for the requested language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Leave the body empty
    #[default]
    None,
    /// Use the configured default language instead
    DefaultLanguage,
}

impl std::str::FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "default-language" | "default" => Ok(Self::DefaultLanguage),
            _ => Err(format!("Unknown fallback: {}. Use: none or default-language", s)),
        }
    }
}

/// Localization settings applied when resolving step bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationPolicy {
    pub fallback: FallbackPolicy,

    #[serde(rename = "default-language")]
    pub default_language: String,
}

impl Default for LocalizationPolicy {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::None,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl LocalizationPolicy {
    /// Resolve `language` in `texts`, applying the fallback policy
    pub fn resolve<'a>(&self, texts: &'a LocalizedText, language: &str) -> Option<&'a str> {
        if let Some(text) = texts.get(language) {
            return Some(text.as_str());
        }
        trace!(%language, fallback = ?self.fallback, "resolve: language missing");
        match self.fallback {
            FallbackPolicy::None => None,
            FallbackPolicy::DefaultLanguage => texts.get(&self.default_language).map(String::as_str),
        }
    }
}
