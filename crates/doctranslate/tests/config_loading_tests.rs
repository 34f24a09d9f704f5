//! Table-driven tests for configuration loading and validation.

mod common;

use std::time::Duration;

use common::TestHarness;
use doctranslate::config::{load_config, load_config_from_str, AuthMode, Config};
use doctranslate::pipeline::PipelineConfig;
use doctranslate::ConfigError;

struct ConfigTestCase {
    name: &'static str,
    config_json: &'static str,
    should_succeed: bool,
    expected_error: Option<&'static str>,
}

const CONFIG_TESTS: &[ConfigTestCase] = &[
    ConfigTestCase {
        name: "valid_minimal",
        config_json: r#"{ "version": "1.0" }"#,
        should_succeed: true,
        expected_error: None,
    },
    ConfigTestCase {
        name: "valid_full",
        config_json: r#"{
            "version": "1.0",
            "translation": {
                "model": "gemini-2.5-flash",
                "baseUrl": "https://generativelanguage.googleapis.com/v1beta",
                "sourceLanguage": "Vietnamese",
                "targetLanguage": "Japanese",
                "apiKeyFile": "~/.config/doctranslate/gemini.key",
                "requestTimeoutSecs": 30
            },
            "pipeline": {
                "maxChars": 5000,
                "binaryReadDelayMs": 1500,
                "binaryFinalizeDelayMs": 1000,
                "eventCapacity": 256
            },
            "auth": {
                "mode": "remote",
                "endpoint": "http://192.168.1.10:8080",
                "username": "admin",
                "requestTimeoutSecs": 5
            },
            "output": { "directory": "translated" }
        }"#,
        should_succeed: true,
        expected_error: None,
    },
    ConfigTestCase {
        name: "missing_version",
        config_json: r#"{ "output": { "directory": "out" } }"#,
        should_succeed: false,
        expected_error: Some("Schema validation failed"),
    },
    ConfigTestCase {
        name: "unsupported_version",
        config_json: r#"{ "version": "0.9" }"#,
        should_succeed: false,
        expected_error: Some("Unsupported config version"),
    },
    ConfigTestCase {
        name: "unknown_top_level_field",
        config_json: r#"{ "version": "1.0", "concurrency": 4 }"#,
        should_succeed: false,
        expected_error: Some("Schema validation failed"),
    },
    ConfigTestCase {
        name: "negative_delay",
        config_json: r#"{ "version": "1.0", "pipeline": { "binaryReadDelayMs": -1 } }"#,
        should_succeed: false,
        expected_error: Some("Schema validation failed"),
    },
    ConfigTestCase {
        name: "zero_max_chars",
        config_json: r#"{ "version": "1.0", "pipeline": { "maxChars": 0 } }"#,
        should_succeed: false,
        expected_error: Some("Schema validation failed"),
    },
    ConfigTestCase {
        name: "bad_auth_mode",
        config_json: r#"{ "version": "1.0", "auth": { "mode": "ldap" } }"#,
        should_succeed: false,
        expected_error: Some("Schema validation failed"),
    },
    ConfigTestCase {
        name: "fallback_without_endpoint",
        config_json: r#"{ "version": "1.0", "auth": { "mode": "remoteWithFallback" } }"#,
        should_succeed: false,
        expected_error: Some("auth.endpoint is required"),
    },
    ConfigTestCase {
        name: "non_http_base_url",
        config_json: r#"{ "version": "1.0", "translation": { "baseUrl": "file:///etc" } }"#,
        should_succeed: false,
        expected_error: Some("must be an http(s) URL"),
    },
    ConfigTestCase {
        name: "not_json",
        config_json: "version = \"1.0\"",
        should_succeed: false,
        expected_error: Some("Failed to parse config JSON"),
    },
];

#[test]
fn test_config_loading_table() {
    for case in CONFIG_TESTS {
        let result = load_config_from_str(case.config_json);

        if case.should_succeed {
            assert!(
                result.is_ok(),
                "{}: expected success, got {:?}",
                case.name,
                result.err()
            );
        } else {
            let err = match result {
                Ok(_) => panic!("{}: expected failure", case.name),
                Err(e) => e.to_string(),
            };
            if let Some(expected) = case.expected_error {
                assert!(
                    err.contains(expected),
                    "{}: error '{}' does not mention '{}'",
                    case.name,
                    err,
                    expected
                );
            }
        }
    }
}

#[test]
fn test_loaded_config_drives_pipeline_settings() {
    let config = load_config_from_str(
        r#"{
            "version": "1.0",
            "pipeline": { "maxChars": 1200, "binaryReadDelayMs": 5, "binaryFinalizeDelayMs": 0 }
        }"#,
    )
    .unwrap();

    let pipeline = PipelineConfig::from_config(&config);
    assert_eq!(pipeline.max_chars, 1200);
    assert_eq!(pipeline.binary_read_delay, Duration::from_millis(5));
    assert_eq!(pipeline.binary_finalize_delay, Duration::ZERO);
}

#[test]
fn test_default_config_survives_a_file_round_trip() {
    let harness = TestHarness::new();
    let path = harness.temp_path().join("config.json");
    std::fs::write(&path, serde_json::to_string_pretty(&Config::default()).unwrap()).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.translation.model, "gemini-2.5-flash");
    assert_eq!(config.auth.mode, AuthMode::Local);
    assert_eq!(config.output.directory, "translated");
}

#[test]
fn test_missing_file_reports_path() {
    let harness = TestHarness::new();
    let path = harness.temp_path().join("absent.json");

    match load_config(&path) {
        Err(ConfigError::ReadFile { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected ReadFile error, got {:?}", other.map(|_| ())),
    }
}
