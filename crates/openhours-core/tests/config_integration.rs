//! Integration tests for loading editor configuration from disk.

use std::io::Write;

use openhours_core::{ConfigError, DayOfWeek, EditorConfig, HourFormat};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_file() {
    let file = write_config(
        r#"
[grid]
step_minutes = 15
day_start_hour = 7
day_end_hour = 19
min_window_minutes = 15
default_window_minutes = 45

[week]
start_of_week = "sunday"

[week.day_labels]
monday = "Montag"

[layout]
px_per_minute = 1.5
hour_format = "12h"
"#,
    );

    let config = EditorConfig::load_from(file.path()).unwrap();
    assert_eq!(config.grid.step_minutes, 15);
    assert_eq!(config.engine().span().start, 420);
    assert_eq!(config.slot_config().slots_per_day(), 48);
    assert_eq!(config.week.day_labels.label(DayOfWeek::Monday), "Montag");
    assert_eq!(config.week.day_labels.label(DayOfWeek::Sunday), "Sunday");
    assert_eq!(config.lane().height_px(), 1080.0);
    assert_eq!(config.layout.hour_format, HourFormat::Twelve);
}

#[test]
fn test_load_rejects_inverted_span() {
    let file = write_config("[grid]\nday_start_hour = 18\nday_end_hour = 9\n");
    let err = EditorConfig::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "day_end_hour"));
}

#[test]
fn test_load_rejects_unknown_label_key() {
    let file = write_config("[week.day_labels]\nfunday = \"Fun\"\n");
    let err = EditorConfig::load_from(file.path()).unwrap_err();
    assert!(err.to_string().contains("week.day_labels.funday"));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = EditorConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::LoadFailed { .. }));
}
