//! Loading and validation of [`AnalystConfig`].

use crate::{
    AnalysisConfig, ApiConfig, CreativeConfig, EvaluationConfig, PathsConfig, ThresholdsConfig,
};
use adlens_error::{AdlensError, AdlensResult, ConfigError};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../adlens.toml");

/// Top-level adlens configuration.
///
/// Sources in order of precedence (later sources override earlier):
/// 1. Bundled defaults (`adlens.toml` shipped with the crate)
/// 2. `~/.config/adlens/adlens.toml`
/// 3. `./adlens.toml`
/// 4. An explicit file passed to [`AnalystConfig::load_with`]
/// 5. `ADLENS__SECTION__KEY` environment variables
///
/// # Example
///
/// ```
/// use adlens_config::AnalystConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AnalystConfig::from_toml_str("[thresholds]\nroas = 1.5\n")?;
/// assert_eq!(config.thresholds.roas, 1.5);
/// assert_eq!(config.thresholds.ctr, 0.015);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalystConfig {
    /// Chat model parameters
    pub api: ApiConfig,
    /// Decision thresholds
    pub thresholds: ThresholdsConfig,
    /// Statistics knobs
    pub analysis: AnalysisConfig,
    /// Retry policy
    pub evaluation: EvaluationConfig,
    /// Creative generation limits
    pub creative: CreativeConfig,
    /// File locations
    pub paths: PathsConfig,
}

impl AnalystConfig {
    /// Load configuration from the standard locations.
    #[instrument]
    pub fn load() -> AdlensResult<Self> {
        Self::load_with(None)
    }

    /// Load configuration, layering `explicit` above the user files.
    ///
    /// The explicit file is required when given; all other files are optional.
    #[instrument(fields(explicit = ?explicit.map(|p| p.display().to_string())))]
    pub fn load_with(explicit: Option<&Path>) -> AdlensResult<Self> {
        debug!("Loading configuration: env > explicit > current dir > home dir > bundled");

        let mut builder = defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/adlens/adlens.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("adlens").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("ADLENS")
                .separator("__")
                .try_parsing(true),
        );

        finish(builder)
    }

    /// Load configuration from a single file layered over the bundled defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> AdlensResult<Self> {
        debug!("Loading configuration from file");
        finish(defaults().add_source(File::from(path.as_ref()).required(true)))
    }

    /// Parse TOML text layered over the bundled defaults.
    pub fn from_toml_str(text: &str) -> AdlensResult<Self> {
        finish(defaults().add_source(File::from_str(text, FileFormat::Toml)))
    }

    /// Reject values outside their meaningful ranges.
    pub fn validate(&self) -> AdlensResult<()> {
        if !(0.0..=2.0).contains(&self.api.temperature) {
            return Err(invalid(format!(
                "api.temperature must be within [0, 2], got {}",
                self.api.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.thresholds.confidence) {
            return Err(invalid(format!(
                "thresholds.confidence must be within [0, 1], got {}",
                self.thresholds.confidence
            )));
        }
        let fraction = self.analysis.trend_window_fraction;
        if !(fraction > 0.0 && fraction <= 0.5) {
            return Err(invalid(format!(
                "analysis.trend_window_fraction must be within (0, 0.5], got {}",
                fraction
            )));
        }
        if self.creative.num_suggestions == 0 {
            return Err(invalid(
                "creative.num_suggestions must be at least 1".to_string(),
            ));
        }
        if self.thresholds.roas < 0.0 || self.thresholds.ctr < 0.0 {
            return Err(invalid(format!(
                "thresholds.roas and thresholds.ctr must be non-negative, got {} and {}",
                self.thresholds.roas, self.thresholds.ctr
            )));
        }
        Ok(())
    }
}

fn defaults() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

fn finish(builder: ConfigBuilder<DefaultState>) -> AdlensResult<AnalystConfig> {
    let config: AnalystConfig = builder
        .build()
        .map_err(|e| {
            AdlensError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?
        .try_deserialize()
        .map_err(|e| {
            AdlensError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })?;
    config.validate()?;
    Ok(config)
}

#[track_caller]
fn invalid(message: String) -> AdlensError {
    AdlensError::from(ConfigError::new(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_match_section_defaults() {
        let config = AnalystConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalystConfig::default());
    }

    #[test]
    fn validate_rejects_zero_suggestions() {
        let mut config = AnalystConfig::default();
        config.creative.num_suggestions = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("num_suggestions"));
    }

    #[test]
    fn validate_rejects_wide_trend_window() {
        let mut config = AnalystConfig::default();
        config.analysis.trend_window_fraction = 0.6;
        assert!(config.validate().is_err());

        config.analysis.trend_window_fraction = 0.5;
        assert!(config.validate().is_ok());
    }
}
