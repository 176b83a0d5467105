//! Unit tests for preference persistence
//!
//! Tests cover:
//! - Default values
//! - Save/load round-trip
//! - Fallback on missing or corrupt files
//! - Partial JSON with serde defaults

use pretty_assertions::assert_eq;
use rstest::*;
use services_common::Preferences;
use tempfile::TempDir;

#[rstest]
#[test]
fn test_preferences_defaults() {
    let prefs = Preferences::default();

    assert_eq!(
        prefs.stock_list,
        vec!["PNB", "BHEL", "NTPC", "BEL", "IOC", "TATASTEEL"]
    );
    assert_eq!(prefs.chosen_months, vec!["Dec"]);
    assert_eq!(prefs.sort_by, "ROI");
    assert_eq!(prefs.atm_range_lower, 0.98);
    assert_eq!(prefs.atm_range_upper, 1.05);
    assert_eq!(prefs.margin, 0.25);
    assert!(!prefs.auto_refresh);
}

#[rstest]
#[test]
fn test_preferences_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");

    let prefs = Preferences {
        stock_list: vec!["SBIN".to_string(), "RELIANCE".to_string()],
        chosen_months: vec!["Jan".to_string(), "Feb".to_string()],
        sort_by: "Normal".to_string(),
        atm_range_lower: 0.95,
        atm_range_upper: 1.10,
        margin: 0.30,
        auto_refresh: true,
    };

    prefs.save(&path).unwrap();
    let loaded = Preferences::load(&path);

    assert_eq!(loaded, prefs);
}

#[rstest]
#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does_not_exist.json");

    assert_eq!(Preferences::load(&path), Preferences::default());
}

#[rstest]
#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "{not json at all").unwrap();

    assert_eq!(Preferences::load(&path), Preferences::default());
}

#[rstest]
#[test]
fn test_partial_file_uses_field_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(
        &path,
        r#"{"stock_list": ["SBIN"], "margin": 0.5}"#,
    )
    .unwrap();

    let loaded = Preferences::load(&path);

    assert_eq!(loaded.stock_list, vec!["SBIN"]);
    assert_eq!(loaded.margin, 0.5);
    // Untouched fields come from the field-level defaults
    assert_eq!(loaded.chosen_months, vec!["Dec"]);
    assert_eq!(loaded.atm_range_lower, 0.98);
    assert_eq!(loaded.atm_range_upper, 1.05);
    assert_eq!(loaded.sort_by, "ROI");
}

#[rstest]
#[test]
fn test_save_creates_parent_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache").join("preferences.json");

    Preferences::default().save(&path).unwrap();

    assert!(path.exists());
}
