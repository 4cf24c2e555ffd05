//! Layered configuration for adlens.
//!
//! Values come from the bundled `adlens.toml`, then optional user files, then
//! an explicit file and finally `ADLENS__SECTION__KEY` environment variables.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod sections;

pub use config::AnalystConfig;
pub use sections::{
    AnalysisConfig, ApiConfig, CreativeConfig, EvaluationConfig, PathsConfig, ThresholdsConfig,
};
