//! Tests for layered configuration loading.

use std::io::Write;
use std::time::Duration;
use tempfile::Builder;
use vignette_config::{RetryConfig, VignetteConfig};

#[test]
fn test_bundled_defaults_match_builtin_defaults() {
    let config = VignetteConfig::load().unwrap();

    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.pacing_units, 1);
    assert!(!config.gemini.image_model.is_empty());
    assert!(!config.assets.fallback_path.is_empty());
}

#[test]
fn test_default_fallback_placeholder_ships_with_workspace() {
    let workspace = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let placeholder = workspace.join(VignetteConfig::default().assets.fallback_path);

    let bytes = std::fs::read(&placeholder).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"), "{} is not a PNG", placeholder.display());
}

#[test]
fn test_retry_time_unit_is_milliseconds() {
    let retry = RetryConfig {
        time_unit_ms: 250,
        ..Default::default()
    };
    assert_eq!(retry.time_unit(), Duration::from_millis(250));
    assert_eq!(RetryConfig::default().time_unit(), Duration::from_secs(1));
}

#[test]
fn test_from_file_fills_missing_sections() {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        temp_file,
        r#"
[retry]
time_unit_ms = 5

[assets]
fallback_path = "static/placeholder.png"
"#
    )
    .unwrap();
    temp_file.flush().unwrap();

    let config = VignetteConfig::from_file(temp_file.path()).unwrap();

    assert_eq!(config.retry.time_unit_ms, 5);
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.assets.fallback_path, "static/placeholder.png");
    assert_eq!(config.assets.mime_type, "image/png");
    assert_eq!(config.gemini.text_model, "gemini-2.5-flash");
}

#[test]
fn test_from_file_rejects_malformed_values() {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        temp_file,
        r#"
[retry]
max_attempts = "three"
"#
    )
    .unwrap();
    temp_file.flush().unwrap();

    let err = VignetteConfig::from_file(temp_file.path()).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_missing_file_is_a_configuration_error() {
    let err = VignetteConfig::from_file("does/not/exist/vignette.toml").unwrap_err();
    assert!(err.is_configuration());
}
