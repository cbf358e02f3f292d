//! Tests for configuration loading.

use archivist_core::ResponseTier;
use archivist_error::ArchivistErrorKind;
use archivist_tier::ArchivistConfig;
use std::io::Write;
use std::path::PathBuf;
use strum::IntoEnumIterator;

const BUNDLED: &str = include_str!("../../../archivist.toml");

fn assert_config_error(result: Result<ArchivistConfig, archivist_error::ArchivistError>) {
    let err = result.unwrap_err();
    assert!(
        matches!(err.kind(), ArchivistErrorKind::Config(_)),
        "expected config error, got {err}"
    );
}

#[test]
fn test_bundled_defaults_match_built_in_defaults() {
    let bundled = ArchivistConfig::from_toml_str(BUNDLED).unwrap();
    assert_eq!(bundled, ArchivistConfig::default());
}

#[test]
fn test_bundled_word_limits() {
    let config = ArchivistConfig::from_toml_str(BUNDLED).unwrap();
    let limits: Vec<u32> = ResponseTier::iter()
        .map(|tier| config.limits.word_limit(tier))
        .collect();
    assert_eq!(limits, vec![500, 300, 150, 100, 50]);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
timezone = "UTC"

[limits]
daily_queries = 30

[limits.word_limits]
follow_up = 250

[storage]
path = "/srv/archivist/usage"
"#
    )
    .unwrap();

    let config = ArchivistConfig::from_file(file.path()).unwrap();
    assert_eq!(config.timezone, chrono_tz::UTC);
    assert_eq!(*config.limits.daily_queries(), 30);
    assert_eq!(*config.limits.follow_ups_per_topic(), 10);
    assert_eq!(config.limits.word_limit(ResponseTier::FollowUp), 250);
    assert_eq!(config.limits.word_limit(ResponseTier::FirstQuery), 500);
    assert_eq!(config.topics.keywords.len(), 7);
    assert_eq!(
        config.storage_path(),
        Some(PathBuf::from("/srv/archivist/usage"))
    );
}

#[test]
fn test_missing_file_is_an_error() {
    assert_config_error(ArchivistConfig::from_file("/nonexistent/archivist.toml"));
}

#[test]
fn test_unknown_timezone_is_rejected() {
    assert_config_error(ArchivistConfig::from_toml_str(r#"timezone = "Mars/Olympus_Mons""#));
}

#[test]
fn test_unknown_limit_key_is_rejected() {
    assert_config_error(ArchivistConfig::from_toml_str(
        "[limits]\ndaily_querys = 10\n",
    ));
}

#[test]
fn test_invalid_limits_are_rejected() {
    assert_config_error(ArchivistConfig::from_toml_str(
        "[limits]\ndaily_queries = 0\n",
    ));
    assert_config_error(ArchivistConfig::from_toml_str(
        "[limits]\napproaching_percent = 120\n",
    ));
}

#[test]
fn test_blank_keyword_is_rejected() {
    assert_config_error(ArchivistConfig::from_toml_str(
        "[topics]\nkeywords = [\"anc\", \" \"]\n",
    ));
}

#[test]
fn test_round_trips_through_toml() {
    let config = ArchivistConfig::default();
    let text = toml::to_string(&config).unwrap();
    assert!(text.contains("Africa/Johannesburg"));
    assert_eq!(ArchivistConfig::from_toml_str(&text).unwrap(), config);
}
