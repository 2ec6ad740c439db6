/*!
 * Tests for configuration loading and validation
 */

use logbatch::app_config::{Config, LogLevel};

#[test]
fn test_defaultConfig_shouldCarryDocumentedDefaults() {
    let config = Config::default();

    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.api.retry_count, 3);
    assert_eq!(config.api.retry_backoff_ms, 1000);
    assert_eq!(config.input.range_connectives, vec!["a", "to"]);
    assert!(config.input.team_sentinels.contains(&"all".to_string()));
    assert_eq!(config.display.max_shown_successes, 10);
    assert_eq!(config.display.max_shown_failures, 5);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_fromJson_withMinimalConfig_shouldApplyDefaults() {
    let json = r#"{"api": {"endpoint": "http://records.internal:9000"}}"#;

    let config = Config::from_json(json).expect("minimal config should load");

    assert_eq!(config.api.endpoint, "http://records.internal:9000");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.display.max_shown_failures, 5);
}

#[test]
fn test_fromJson_withInvalidEndpoint_shouldFail() {
    let json = r#"{"api": {"endpoint": "not a url"}}"#;
    assert!(Config::from_json(json).is_err());
}

#[test]
fn test_fromJson_withZeroTimeout_shouldFail() {
    let json = r#"{"api": {"endpoint": "http://localhost:9000", "timeout_secs": 0}}"#;
    assert!(Config::from_json(json).is_err());
}

#[test]
fn test_fromJson_withMalformedJson_shouldFail() {
    assert!(Config::from_json("{not json").is_err());
}

#[test]
fn test_validate_withEmptyConnectives_shouldFail() {
    let mut config = Config::default();
    config.input.range_connectives.clear();

    assert!(config.validate().is_err());
}

#[test]
fn test_toJson_thenFromJson_shouldRoundTrip() {
    let mut config = Config::default();
    config.api.endpoint = "http://records.internal:9000".to_string();
    config.display.max_shown_successes = 4;
    config.log_level = LogLevel::Debug;

    let json = config.to_json().expect("config should serialize");
    let reloaded = Config::from_json(&json).expect("serialized config should load");

    assert_eq!(reloaded.api.endpoint, config.api.endpoint);
    assert_eq!(reloaded.display.max_shown_successes, 4);
    assert_eq!(reloaded.log_level, LogLevel::Debug);
}
