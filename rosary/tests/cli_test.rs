//! CLI integration tests for the rosary binary
//!
//! Every test runs in its own temp dir with XDG paths redirected, so no
//! user config or log file is touched.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A Wednesday
const WEDNESDAY: &str = "2024-01-03";
/// A Thursday
const THURSDAY: &str = "2024-01-04";

fn rosary(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rosary").expect("binary should build");
    cmd.current_dir(temp.path())
        .env("XDG_DATA_HOME", temp.path().join("data"))
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("NO_COLOR", "1");
    cmd
}

fn write_catalog(dir: &Path, json: &str) -> String {
    let path = dir.join("rosary.json");
    fs::write(&path, json).expect("Failed to write catalog");
    path.to_string_lossy().into_owned()
}

/// English-only catalog without a Thursday theme
const PARTIAL_CATALOG: &str = r#"{
  "rosary": {
    "steps": [
      {"step": 1, "name": "Sign of the Cross", "prayer": {"English": "In the name of the Father"}},
      {"step": 2, "name": "Our Father", "prayer": {"English": "Our Father, who art in heaven"}},
      {"step": 3, "name": "Ten Hail Marys", "prayer": {"English": "Hail Mary"}},
      {"step": 4, "name": "Glory Be", "prayer": {"English": "Glory be"}},
      {"step": 5, "name": "Hail, Holy Queen", "prayer": {"English": "Hail, holy Queen"}}
    ],
    "mysteries": [
      {"type": "Joyful", "days": ["Monday", "Saturday"], "mysteries": ["Annunciation", "Visitation", "Nativity", "Presentation", "Finding"]},
      {"type": "Sorrowful", "days": ["Tuesday", "Friday"], "mysteries": ["Agony", "Scourging", "Crowning", "Carrying", "Crucifixion"]},
      {"type": "Glorious", "days": ["Wednesday", "Sunday"], "mysteries": ["Resurrection", "Ascension", "Descent", "Assumption", "Coronation"]}
    ]
  }
}"#;

// =============================================================================
// show
// =============================================================================

#[test]
fn test_show_text() {
    let temp = TempDir::new().unwrap();
    rosary(&temp)
        .args(["show", "--date", WEDNESDAY])
        .assert()
        .success()
        .stdout(predicate::str::contains("Today's Mystery: Glorious"))
        .stdout(predicate::str::contains("1. Sign of the Cross"))
        .stdout(predicate::str::contains("32. Sign of the Cross (Ending)"));
}

#[test]
fn test_show_json() {
    let temp = TempDir::new().unwrap();
    let output = rosary(&temp)
        .args(["show", "--date", WEDNESDAY, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["theme"], "Glorious");
    assert_eq!(value["language"], "English");

    let steps = value["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 32);
    for (i, step) in steps.iter().enumerate() {
        assert_eq!(step["number"], i + 1);
    }
    assert_eq!(steps[29]["title"], "30. Hail, Holy Queen");
    assert_eq!(steps[30]["title"], "31. Final Prayer");
    assert_eq!(steps[31]["title"], "32. Sign of the Cross (Ending)");
}

#[test]
fn test_show_japanese() {
    let temp = TempDir::new().unwrap();
    rosary(&temp)
        .args(["show", "--date", THURSDAY, "--language", "Japanese"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Today's Mystery: Luminous"))
        .stdout(predicate::str::contains("主の洗礼を黙想しましょう"));
}

#[test]
fn test_show_missing_theme_fails() {
    let temp = TempDir::new().unwrap();
    let catalog = write_catalog(temp.path(), PARTIAL_CATALOG);

    rosary(&temp)
        .args(["show", "--catalog", &catalog, "--date", THURSDAY])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No mystery found for Thursday"));
}

#[test]
fn test_show_missing_language_has_empty_bodies() {
    let temp = TempDir::new().unwrap();
    let catalog = write_catalog(temp.path(), PARTIAL_CATALOG);

    let output = rosary(&temp)
        .args(["show", "--catalog", &catalog, "--date", WEDNESDAY, "-L", "Japanese", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["steps"][0]["text"].is_null());
}

#[test]
fn test_config_fallback_fills_missing_language() {
    let temp = TempDir::new().unwrap();
    let catalog = write_catalog(temp.path(), PARTIAL_CATALOG);
    let config = temp.path().join("rosary.yml");
    fs::write(
        &config,
        format!(
            "language: Japanese\ncatalog:\n  source: {}\nlocalization:\n  fallback: default-language\n",
            catalog
        ),
    )
    .unwrap();

    let output = rosary(&temp)
        .args(["show", "--date", WEDNESDAY, "--format", "json", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["language"], "Japanese");
    assert_eq!(value["steps"][0]["text"], "In the name of the Father");
}

#[test]
fn test_missing_catalog_file_fails() {
    let temp = TempDir::new().unwrap();
    rosary(&temp)
        .args(["show", "--catalog", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog"));
}

// =============================================================================
// themes / languages / check
// =============================================================================

#[test]
fn test_themes() {
    let temp = TempDir::new().unwrap();
    let output = rosary(&temp)
        .args(["themes", "--date", THURSDAY, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let themes = value.as_array().unwrap();
    assert_eq!(themes.len(), 4);
    let today: Vec<_> = themes.iter().filter(|t| t["today"] == true).collect();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0]["label"], "Luminous");
}

#[test]
fn test_languages() {
    let temp = TempDir::new().unwrap();
    rosary(&temp)
        .arg("languages")
        .assert()
        .success()
        .stdout("English\nJapanese\n");
}

#[test]
fn test_check_builtin_is_clean() {
    let temp = TempDir::new().unwrap();
    rosary(&temp)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog OK"))
        .stdout(predicate::str::contains("decade-only, not prayed in the opening: Fatima Prayer"));
}

#[test]
fn test_check_reports_gaps() {
    let temp = TempDir::new().unwrap();
    let catalog = write_catalog(temp.path(), PARTIAL_CATALOG);

    rosary(&temp)
        .args(["check", "--catalog", &catalog])
        .assert()
        .failure()
        .stdout(predicate::str::contains("No mystery covers Thursday"))
        .stdout(predicate::str::contains("Step template not found: Fatima Prayer"))
        .stderr(predicate::str::contains("Catalog check found 1 error(s)"));
}
