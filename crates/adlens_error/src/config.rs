//! Failures assembling the analyst configuration.

/// The layered configuration could not be loaded or holds invalid values.
///
/// Raised when a required file is missing or unparsable, when an
/// `ADLENS__SECTION__KEY` variable has the wrong type, and when validation
/// rejects a value such as a confidence threshold outside `[0, 1]` or a
/// negative ROAS floor.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// The offending key or source, and why it was rejected
    pub message: String,
    /// Line where loading failed
    pub line: u32,
    /// Source file where loading failed
    pub file: &'static str,
}

impl ConfigError {
    /// Record a configuration failure at the caller's location.
    ///
    /// ```
    /// use adlens_error::ConfigError;
    ///
    /// let err = ConfigError::new("thresholds.confidence must be within [0, 1], got 1.5");
    /// assert!(err.to_string().starts_with("Configuration Error: thresholds.confidence"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: caller.line(),
            file: caller.file(),
        }
    }
}
