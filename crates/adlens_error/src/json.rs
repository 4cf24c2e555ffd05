//! Failures decoding JSON, either a provider response body or the JSON block
//! pulled out of a model reply.

/// A payload that should have been JSON did not decode.
///
/// Raised by the Groq driver when the chat completion body is malformed and by
/// the agents when an extracted reply block does not match the expected shape.
/// The message carries a short preview of the offending text.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// What failed to decode, with a preview of the input
    pub message: String,
    /// Line of the decode call
    pub line: u32,
    /// Source file of the decode call
    pub file: &'static str,
}

impl JsonError {
    /// Record a decode failure at the caller's location.
    ///
    /// ```
    /// use adlens_error::JsonError;
    ///
    /// let err = JsonError::new("Failed to parse JSON: expected `,` (JSON: {\"hypotheses\": [...)");
    /// assert!(err.message.contains("hypotheses"));
    /// assert!(err.line > 0);
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
