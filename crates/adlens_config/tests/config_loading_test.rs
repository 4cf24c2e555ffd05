//! Tests for layered configuration loading.

use adlens_config::{AnalystConfig, ThresholdsConfig};
use std::io::Write;
use std::path::PathBuf;

#[test]
fn test_load_bundled_defaults() {
    let config = AnalystConfig::load().unwrap();

    assert_eq!(config.api.model, "llama-3.1-8b-instant");
    assert_eq!(config.api.api_key_env, "GROQ_API_KEY");
    assert_eq!(config.thresholds.roas, 2.0);
    assert_eq!(config.thresholds.confidence, 0.6);
    assert_eq!(config.evaluation.max_retries, 1);
    assert_eq!(config.creative.num_suggestions, 5);
    assert_eq!(config.paths.data, PathBuf::from("data/sample_fb_ads.csv"));
}

#[test]
fn test_explicit_file_overrides_defaults() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(
        file,
        "[thresholds]\nroas = 1.25\n\n[creative]\nnum_suggestions = 2\n"
    )?;

    let config = AnalystConfig::load_with(Some(file.path()))?;

    assert_eq!(config.thresholds.roas, 1.25);
    assert_eq!(config.creative.num_suggestions, 2);
    // Untouched keys keep their bundled values
    assert_eq!(config.thresholds.ctr, 0.015);
    assert_eq!(config.creative.max_campaigns, 5);
    Ok(())
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let result = AnalystConfig::load_with(Some(std::path::Path::new(
        "/definitely/not/here/adlens.toml",
    )));
    assert!(result.is_err());
}

#[test]
fn test_from_file_round_trips_serialized_config() -> anyhow::Result<()> {
    let mut config = AnalystConfig::default();
    config.thresholds = ThresholdsConfig {
        roas: 3.0,
        ..ThresholdsConfig::default()
    };
    config.api.temperature = 0.2;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, toml::to_string(&config)?)?;

    let loaded = AnalystConfig::from_file(&path)?;
    assert_eq!(loaded.thresholds.roas, 3.0);
    assert!((loaded.api.temperature - 0.2).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_out_of_range_values_are_rejected() {
    let err = AnalystConfig::from_toml_str("[api]\ntemperature = 3.5\n").unwrap_err();
    assert!(err.to_string().contains("temperature"));

    let err = AnalystConfig::from_toml_str("[thresholds]\nconfidence = 1.5\n").unwrap_err();
    assert!(err.to_string().contains("confidence"));

    let err = AnalystConfig::from_toml_str("[thresholds]\nroas = -1.0\n").unwrap_err();
    assert!(err.to_string().contains("non-negative"));
}

#[test]
fn test_malformed_toml_is_a_config_error() {
    let err = AnalystConfig::from_toml_str("[thresholds\nroas = ").unwrap_err();
    assert!(err.to_string().contains("Configuration Error"));
}
