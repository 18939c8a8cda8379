use metaball_core::constants::{DEFAULT_ISO, DEFAULT_RESOLUTION, QUALITY_RESTORE_DELAY};
use metaball_core::{parse_iso, parse_resolution, BackendPreference, EditorConfig, ThresholdMode};
use std::time::Duration;

#[test]
fn iso_text_falls_back_to_default() {
    assert_eq!(parse_iso("2.5"), 2.5);
    assert_eq!(parse_iso(" 0.75 "), 0.75);
    assert_eq!(parse_iso(""), DEFAULT_ISO);
    assert_eq!(parse_iso("abc"), DEFAULT_ISO);
    assert_eq!(parse_iso("0"), DEFAULT_ISO);
    assert_eq!(parse_iso("-1"), DEFAULT_ISO);
    assert_eq!(parse_iso("NaN"), DEFAULT_ISO);
    assert_eq!(parse_iso("inf"), DEFAULT_ISO);
}

#[test]
fn resolution_text_is_parsed_and_clamped() {
    assert_eq!(parse_resolution("64"), 64);
    assert_eq!(parse_resolution("64px"), 64);
    assert_eq!(parse_resolution(""), DEFAULT_RESOLUTION);
    assert_eq!(parse_resolution("wide"), DEFAULT_RESOLUTION);
    assert_eq!(parse_resolution("0"), DEFAULT_RESOLUTION);
    assert_eq!(parse_resolution("3"), 10);
    assert_eq!(parse_resolution("-50"), 10);
    assert_eq!(parse_resolution("100000"), 400);
    assert_eq!(parse_resolution("99999999999999999999999"), 400);
}

#[test]
fn defaults_without_query() {
    let config = EditorConfig::from_query("");
    assert_eq!(config, EditorConfig::default());
    assert_eq!(config.settings.threshold_mode, ThresholdMode::SignedTotal);
    assert_eq!(config.backend, BackendPreference::Auto);
    assert_eq!(config.quality.restore_delay, QUALITY_RESTORE_DELAY);
}

#[test]
fn query_overrides_known_keys() {
    let config =
        EditorConfig::from_query("?iso=2&res=64&mode=positive&backend=software&restore_ms=300");
    assert_eq!(config.settings.iso, 2.0);
    assert_eq!(config.settings.base_resolution, 64);
    assert_eq!(config.settings.threshold_mode, ThresholdMode::PositiveOnly);
    assert_eq!(config.backend, BackendPreference::Software);
    assert_eq!(config.quality.restore_delay, Duration::from_millis(300));
}

#[test]
fn query_ignores_unknown_and_bad_values() {
    let config = EditorConfig::from_query("mode=sideways&backend=quantum&restore_ms=soon&x=1&&flag");
    assert_eq!(config, EditorConfig::default());
}
