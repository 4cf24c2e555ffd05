//! Failures inside a model driver after the HTTP exchange itself succeeded.

/// The provider replied, but the reply cannot be turned into text.
///
/// Covers a chat completion with no choices, a request the provider client
/// refused to assemble, and scripted failures from test drivers. Agents treat
/// this like any other driver error and fall back to their canned output.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Backend Error: {} at line {} in {}", message, line, file)]
pub struct BackendError {
    /// Description of the unusable reply
    pub message: String,
    /// Line where the driver gave up
    pub line: u32,
    /// Source file where the driver gave up
    pub file: &'static str,
}

impl BackendError {
    /// Record a driver failure at the caller's location.
    ///
    /// ```
    /// use adlens_error::{AdlensError, BackendError};
    ///
    /// let err: AdlensError = BackendError::new("Response contained no choices").into();
    /// assert!(err.to_string().contains("Backend Error: Response contained no choices"));
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
