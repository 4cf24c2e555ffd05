//! Top-level error wrapper types.

use crate::{
    AgentError, BackendError, ConfigError, DataError, HttpError, JsonError, ReportError,
};

/// Every error condition adlens can surface.
///
/// # Examples
///
/// ```
/// use adlens_error::{AdlensError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: AdlensError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AdlensErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Model backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Dataset error
    #[from(DataError)]
    Data(DataError),
    /// Agent pipeline error
    #[from(AgentError)]
    Agent(AgentError),
    /// Report writing error
    #[from(ReportError)]
    Report(ReportError),
}

/// adlens error with kind discrimination.
///
/// # Examples
///
/// ```
/// use adlens_error::{AdlensResult, ConfigError};
///
/// fn might_fail() -> AdlensResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("adlens Error: {}", _0)]
pub struct AdlensError(Box<AdlensErrorKind>);

impl AdlensError {
    /// Create a new error from a kind.
    pub fn new(kind: AdlensErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AdlensErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to AdlensErrorKind
impl<T> From<T> for AdlensError
where
    T: Into<AdlensErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for adlens operations.
pub type AdlensResult<T> = std::result::Result<T, AdlensError>;
