//! Sequence building
//!
//! Expands a theme variant and the step catalog into the numbered list of
//! steps shown to the user:
//!
//! ```text
//! opening   catalog templates in order, minus exclusions
//! decades   per sub-theme: announcement, Our Father, Ten Hail Marys, Glory Be, Fatima Prayer
//! closing   Hail, Holy Queen, Final Prayer, Sign of the Cross (Ending)
//! ```
//!
//! Numbering is 1-based and contiguous across all three sections. The whole
//! sequence is rebuilt on every render; nothing here holds state between calls.

use serde::Serialize;
use tracing::{debug, warn};

use super::localize::LocalizationPolicy;
use crate::catalog::{CatalogIndex, StepTemplate, SubTheme, ThemeVariant};
use crate::error::RosaryError;

/// Section a rendered step belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Opening,
    Announcement,
    Prayer,
    Closing,
}

/// A numbered, localized step ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderStep {
    /// 1-based position in the sequence
    pub number: usize,
    /// Display title, prefixed by the number
    pub title: String,
    /// Resolved body; `None` when the language has no text
    pub text: Option<String>,
    pub kind: StepKind,
}

/// Names and thresholds that drive sequence building
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRules {
    /// Templates never emitted in the opening block
    pub opening_exclusions: Vec<String>,
    /// Templates whose name contains this are never emitted in the opening block
    pub repeat_marker: String,
    /// Template emitted in the opening block only while the counter is at or below `once_cutoff`
    pub once_in_opening: String,
    pub once_cutoff: usize,
    /// Prayers following each mystery announcement
    pub decade_prayers: Vec<String>,
    /// Templates emitted after the last decade
    pub closing: Vec<String>,
}

impl Default for SequenceRules {
    fn default() -> Self {
        let names = |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };
        Self {
            opening_exclusions: names(&[
                "Announce the First Mystery",
                "Ten Hail Marys",
                "Our Father",
                "Hail, Holy Queen",
                "Final Prayer",
                "Sign of the Cross (Ending)",
            ]),
            repeat_marker: "Repeat Steps".to_string(),
            once_in_opening: "Glory Be".to_string(),
            once_cutoff: 4,
            decade_prayers: names(&["Our Father", "Ten Hail Marys", "Glory Be", "Fatima Prayer"]),
            closing: names(&["Hail, Holy Queen", "Final Prayer", "Sign of the Cross (Ending)"]),
        }
    }
}

impl SequenceRules {
    /// Check whether a template may be emitted in the opening block at `counter`
    fn opens_with(&self, step: &StepTemplate, counter: usize) -> bool {
        if step.decade_only {
            return false;
        }
        if self.opening_exclusions.iter().any(|n| *n == step.name) {
            return false;
        }
        if step.name.contains(&self.repeat_marker) {
            return false;
        }
        !(step.name == self.once_in_opening && counter > self.once_cutoff)
    }

    /// Every template name the decade and closing sections look up
    pub fn referenced_names(&self) -> impl Iterator<Item = &str> {
        self.decade_prayers.iter().chain(self.closing.iter()).map(String::as_str)
    }
}

/// Builds rosary sequences with a fixed set of rules and localization policy
#[derive(Debug, Clone, Default)]
pub struct SequenceBuilder {
    rules: SequenceRules,
    policy: LocalizationPolicy,
}

impl SequenceBuilder {
    /// Use a localization policy with the default rules
    pub fn with_policy(policy: LocalizationPolicy) -> Self {
        Self {
            rules: SequenceRules::default(),
            policy,
        }
    }

    pub fn rules(&self) -> &SequenceRules {
        &self.rules
    }

    /// Build the full sequence for a theme in a language
    pub fn build(
        &self,
        index: &CatalogIndex,
        theme: &ThemeVariant,
        language: &str,
    ) -> Result<Vec<RenderStep>, RosaryError> {
        debug!(theme = %theme.label, %language, "SequenceBuilder::build: called");
        if language.trim().is_empty() {
            return Err(RosaryError::DataUnavailable("no language selected".to_string()));
        }
        if index.steps().is_empty() {
            return Err(RosaryError::DataUnavailable(
                "catalog has no step templates".to_string(),
            ));
        }

        let mut out = Emitter::default();

        for step in index.steps() {
            if self.rules.opens_with(step, out.counter) {
                out.push(&step.name, self.template_text(step, language), StepKind::Opening);
            }
        }

        for (i, sub) in theme.mysteries.iter().enumerate() {
            out.push(
                &format!("Mystery {}: {}", i + 1, sub.name),
                self.reflection_text(sub, language),
                StepKind::Announcement,
            );
            for name in &self.rules.decade_prayers {
                self.push_named(&mut out, index, name, language, StepKind::Prayer);
            }
        }

        for name in &self.rules.closing {
            self.push_named(&mut out, index, name, language, StepKind::Closing);
        }

        debug!(count = out.steps.len(), "SequenceBuilder::build: done");
        Ok(out.steps)
    }

    fn push_named(&self, out: &mut Emitter, index: &CatalogIndex, name: &str, language: &str, kind: StepKind) {
        match index.get(name) {
            Ok(step) => out.push(&step.name, self.template_text(step, language), kind),
            Err(e) => warn!("{}; omitting step", e),
        }
    }

    /// Prayer text when the template has any, otherwise its fixed details
    fn template_text(&self, step: &StepTemplate, language: &str) -> Option<String> {
        match &step.prayer {
            Some(prayer) => self.policy.resolve(prayer, language).map(str::to_string),
            None => step.details.clone(),
        }
    }

    /// Localized reflection, or the fixed one when the map has no entries
    fn reflection_text(&self, sub: &SubTheme, language: &str) -> Option<String> {
        if sub.reflection.is_empty() {
            return sub.details.clone();
        }
        self.policy.resolve(&sub.reflection, language).map(str::to_string)
    }
}

/// Build a sequence with the default rules and no localization fallback
pub fn build_sequence(
    index: &CatalogIndex,
    theme: &ThemeVariant,
    language: &str,
) -> Result<Vec<RenderStep>, RosaryError> {
    SequenceBuilder::default().build(index, theme, language)
}

/// Output accumulator owning the step counter
struct Emitter {
    counter: usize,
    steps: Vec<RenderStep>,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            counter: 1,
            steps: Vec::new(),
        }
    }
}

impl Emitter {
    fn push(&mut self, name: &str, text: Option<String>, kind: StepKind) {
        self.steps.push(RenderStep {
            number: self.counter,
            title: format!("{}. {}", self.counter, name),
            text,
            kind,
        });
        self.counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, SubTheme, embedded, parse_catalog};
    use crate::sequence::localize::FallbackPolicy;
    use proptest::prelude::*;

    fn prayer(name: &str) -> StepTemplate {
        StepTemplate::with_prayer(
            name,
            [
                ("English", format!("{} (en)", name)),
                ("Japanese", format!("{} (ja)", name)),
            ],
        )
    }

    fn standard_steps() -> Vec<StepTemplate> {
        vec![
            prayer("Sign of the Cross"),
            prayer("Apostles' Creed"),
            prayer("Our Father"),
            prayer("Three Hail Marys"),
            prayer("Glory Be"),
            StepTemplate::with_details("Announce the First Mystery", "Announce it"),
            prayer("Ten Hail Marys"),
            prayer("Fatima Prayer"),
            StepTemplate::with_details("Repeat Steps 6-8", "Repeat"),
            prayer("Hail, Holy Queen"),
            prayer("Final Prayer"),
            prayer("Sign of the Cross (Ending)"),
        ]
    }

    fn theme(label: &str, count: usize) -> ThemeVariant {
        ThemeVariant {
            label: label.to_string(),
            days: vec!["Wednesday".to_string()],
            mysteries: (1..=count)
                .map(|i| SubTheme {
                    name: format!("{} {}", label, i),
                    reflection: [
                        ("English".to_string(), format!("Reflect on {} {}", label, i)),
                        ("Japanese".to_string(), format!("黙想 {} {}", label, i)),
                    ]
                    .into(),
                    details: None,
                })
                .collect(),
        }
    }

    fn index(steps: Vec<StepTemplate>) -> CatalogIndex {
        CatalogIndex::new(Catalog {
            steps,
            mysteries: vec![],
        })
    }

    fn titles(steps: &[RenderStep]) -> Vec<&str> {
        steps.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_standard_sequence_shape() {
        let steps = build_sequence(&index(standard_steps()), &theme("Glorious", 5), "English").unwrap();

        // Opening survivors: Sign of the Cross, Creed, Three Hail Marys, Glory Be, Fatima Prayer
        assert_eq!(steps.len(), 5 + 5 * 5 + 3);

        let t = titles(&steps);
        assert_eq!(t[0], "1. Sign of the Cross");
        assert_eq!(t[3], "4. Glory Be");
        assert_eq!(t[4], "5. Fatima Prayer");
        assert_eq!(t[5], "6. Mystery 1: Glorious 1");
        assert_eq!(t[6], "7. Our Father");
        assert_eq!(t[7], "8. Ten Hail Marys");
        assert_eq!(t[8], "9. Glory Be");
        assert_eq!(t[9], "10. Fatima Prayer");

        let n = t.len();
        assert_eq!(t[n - 3], "31. Hail, Holy Queen");
        assert_eq!(t[n - 2], "32. Final Prayer");
        assert_eq!(t[n - 1], "33. Sign of the Cross (Ending)");
    }

    #[test]
    fn test_numbers_are_contiguous() {
        let steps = build_sequence(&index(standard_steps()), &theme("Joyful", 5), "Japanese").unwrap();
        let numbers: Vec<usize> = steps.iter().map(|s| s.number).collect();
        let expected: Vec<usize> = (1..=steps.len()).collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn test_step_kinds() {
        let steps = build_sequence(&index(standard_steps()), &theme("Joyful", 5), "English").unwrap();
        assert_eq!(steps[0].kind, StepKind::Opening);
        assert_eq!(steps[5].kind, StepKind::Announcement);
        assert_eq!(steps[6].kind, StepKind::Prayer);
        assert_eq!(steps.last().unwrap().kind, StepKind::Closing);
    }

    #[test]
    fn test_localized_texts() {
        let steps = build_sequence(&index(standard_steps()), &theme("Joyful", 5), "Japanese").unwrap();
        assert_eq!(steps[0].text.as_deref(), Some("Sign of the Cross (ja)"));
        assert_eq!(steps[5].text.as_deref(), Some("黙想 Joyful 1"));
    }

    #[test]
    fn test_details_used_without_prayer() {
        let mut steps = standard_steps();
        steps.insert(0, StepTemplate::with_details("Take the Crucifix", "Hold the crucifix"));

        let out = build_sequence(&index(steps), &theme("Joyful", 5), "Japanese").unwrap();
        assert_eq!(out[0].title, "1. Take the Crucifix");
        assert_eq!(out[0].text.as_deref(), Some("Hold the crucifix"));
    }

    #[test]
    fn test_glory_be_suppressed_after_cutoff() {
        let steps = vec![
            prayer("Sign of the Cross"),
            prayer("Glory Be"),
            prayer("Apostles' Creed"),
            prayer("Three Hail Marys"),
            prayer("Litany"),
            prayer("Glory Be"),
        ];

        let out = build_sequence(&index(steps), &theme("Glorious", 0), "English").unwrap();
        let t = titles(&out);
        assert_eq!(
            t,
            vec![
                "1. Sign of the Cross",
                "2. Glory Be",
                "3. Apostles' Creed",
                "4. Three Hail Marys",
                "5. Litany",
            ]
        );
    }

    #[test]
    fn test_glory_be_cutoff_is_inclusive() {
        let steps = vec![
            prayer("One"),
            prayer("Two"),
            prayer("Three"),
            prayer("Glory Be"),
            prayer("Four"),
        ];
        let out = build_sequence(&index(steps), &theme("Glorious", 0), "English").unwrap();
        assert_eq!(out[3].title, "4. Glory Be");

        let steps = vec![
            prayer("One"),
            prayer("Two"),
            prayer("Three"),
            prayer("Four"),
            prayer("Glory Be"),
        ];
        let out = build_sequence(&index(steps), &theme("Glorious", 0), "English").unwrap();
        assert!(titles(&out).iter().all(|t| !t.starts_with("5. Glory Be")));
    }

    #[test]
    fn test_glory_be_still_prayed_in_decades() {
        let out = build_sequence(&index(standard_steps()), &theme("Luminous", 5), "English").unwrap();
        let count = out.iter().filter(|s| s.title.ends_with(". Glory Be")).count();
        assert_eq!(count, 1 + 5);
    }

    #[test]
    fn test_decade_only_flag_skips_opening() {
        let mut steps = standard_steps();
        for step in steps.iter_mut().filter(|s| s.name == "Fatima Prayer") {
            step.decade_only = true;
        }

        let out = build_sequence(&index(steps), &theme("Joyful", 5), "English").unwrap();
        assert_eq!(out.len(), 4 + 25 + 3);
        assert_eq!(out[4].title, "5. Mystery 1: Joyful 1");
        // Still emitted inside each decade
        assert_eq!(out[8].title, "9. Fatima Prayer");
    }

    #[test]
    fn test_missing_template_is_omitted() {
        let steps: Vec<_> = standard_steps()
            .into_iter()
            .filter(|s| s.name != "Fatima Prayer" && s.name != "Final Prayer")
            .collect();

        let out = build_sequence(&index(steps), &theme("Joyful", 5), "English").unwrap();
        // 4 opening + 5 * 4 decade steps + 2 closing
        assert_eq!(out.len(), 4 + 20 + 2);
        assert_eq!(out[out.len() - 2].title, "25. Hail, Holy Queen");
        assert_eq!(out[out.len() - 1].title, "26. Sign of the Cross (Ending)");
    }

    #[test]
    fn test_missing_language_yields_empty_body() {
        let steps = vec![
            StepTemplate::with_prayer("Sign of the Cross", [("English", "In the name of the Father")]),
            prayer("Hail, Holy Queen"),
        ];

        let out = build_sequence(&index(steps), &theme("Joyful", 0), "Japanese").unwrap();
        assert_eq!(out[0].title, "1. Sign of the Cross");
        assert_eq!(out[0].text, None);
        assert_eq!(out[1].text.as_deref(), Some("Hail, Holy Queen (ja)"));
    }

    #[test]
    fn test_prayer_map_without_language_ignores_details() {
        let mut step = StepTemplate::with_prayer("Sign of the Cross", [("English", "In the name")]);
        step.details = Some("Touch forehead".to_string());

        let out = build_sequence(&index(vec![step]), &theme("Joyful", 0), "Japanese").unwrap();
        assert_eq!(out[0].text, None);
    }

    #[test]
    fn test_bare_mystery_reflects_in_every_language() {
        let variant: ThemeVariant =
            serde_json::from_str(r#"{"type": "Glorious", "days": ["Wednesday"], "mysteries": ["Resurrection"]}"#)
                .unwrap();

        for language in ["English", "Japanese"] {
            let out = build_sequence(&index(vec![prayer("Our Father")]), &variant, language).unwrap();
            let announcement = out.iter().find(|s| s.kind == StepKind::Announcement).unwrap();
            assert_eq!(announcement.title, "1. Mystery 1: Resurrection");
            assert_eq!(announcement.text.as_deref(), Some("Reflect on the Resurrection"));
        }
    }

    #[test]
    fn test_fallback_policy_fills_missing_language() {
        let steps = vec![StepTemplate::with_prayer(
            "Sign of the Cross",
            [("English", "In the name of the Father")],
        )];
        let builder = SequenceBuilder::with_policy(LocalizationPolicy {
            fallback: FallbackPolicy::DefaultLanguage,
            ..Default::default()
        });

        let out = builder.build(&index(steps), &theme("Joyful", 0), "Japanese").unwrap();
        assert_eq!(out[0].text.as_deref(), Some("In the name of the Father"));
    }

    #[test]
    fn test_blank_language_is_data_unavailable() {
        let err = build_sequence(&index(standard_steps()), &theme("Joyful", 5), "  ").unwrap_err();
        assert!(matches!(err, RosaryError::DataUnavailable(_)));
    }

    #[test]
    fn test_empty_catalog_is_data_unavailable() {
        let err = build_sequence(&index(vec![]), &theme("Joyful", 5), "English").unwrap_err();
        assert!(matches!(err, RosaryError::DataUnavailable(_)));
    }

    #[test]
    fn test_build_is_idempotent() {
        let idx = index(standard_steps());
        let t = theme("Sorrowful", 5);
        let first = build_sequence(&idx, &t, "English").unwrap();
        let second = build_sequence(&idx, &t, "English").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_embedded_catalog_on_a_wednesday() {
        let catalog = parse_catalog(embedded::get_embedded(), "builtin").unwrap();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let theme = crate::sequence::select_theme(&catalog, date).unwrap().clone();
        assert_eq!(theme.label, "Glorious");

        let steps = build_sequence(&CatalogIndex::new(catalog), &theme, "English").unwrap();
        let t = titles(&steps);
        assert_eq!(t.len(), 4 + 25 + 3);
        assert_eq!(t[0], "1. Sign of the Cross");
        assert_eq!(t[t.len() - 3], "30. Hail, Holy Queen");
        assert_eq!(t[t.len() - 2], "31. Final Prayer");
        assert_eq!(t[t.len() - 1], "32. Sign of the Cross (Ending)");
    }

    fn arb_name() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Sign of the Cross".to_string()),
            Just("Our Father".to_string()),
            Just("Glory Be".to_string()),
            Just("Ten Hail Marys".to_string()),
            Just("Fatima Prayer".to_string()),
            Just("Hail, Holy Queen".to_string()),
            Just("Repeat Steps 6-8".to_string()),
            "[A-Z][a-z]{2,8}",
        ]
    }

    proptest! {
        #[test]
        fn prop_numbers_are_one_to_n(
            names in prop::collection::vec(arb_name(), 1..20),
            mysteries in 0usize..7,
        ) {
            let steps = names.iter().map(|n| prayer(n)).collect();
            let out = build_sequence(&index(steps), &theme("Joyful", mysteries), "English").unwrap();

            for (i, step) in out.iter().enumerate() {
                prop_assert_eq!(step.number, i + 1);
                let prefix = format!("{}. ", i + 1);
                prop_assert!(step.title.starts_with(&prefix));
            }
        }

        #[test]
        fn prop_length_matches_sections(names in prop::collection::vec(arb_name(), 1..20)) {
            let idx = index(names.iter().map(|n| prayer(n)).collect());
            let rules = SequenceRules::default();

            let out = build_sequence(&idx, &theme("Joyful", 5), "English").unwrap();
            let opening = out.iter().filter(|s| s.kind == StepKind::Opening).count();
            let decade = 1 + rules.decade_prayers.iter().filter(|n| idx.contains(n)).count();
            let closing = rules.closing.iter().filter(|n| idx.contains(n)).count();

            prop_assert_eq!(out.len(), opening + 5 * decade + closing);
        }
    }
}
