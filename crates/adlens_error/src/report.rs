//! Report writing error types.

/// Kinds of report writing errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ReportErrorKind {
    /// Failed to create an output directory
    #[display("Failed to create directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write an artifact
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Artifact could not be serialized
    #[display("Serialization error: {}", _0)]
    Serialization(String),
}

/// Report error with location tracking.
///
/// # Examples
///
/// ```
/// use adlens_error::{ReportError, ReportErrorKind};
///
/// let err = ReportError::new(ReportErrorKind::FileWrite("reports/report.md".to_string()));
/// assert!(format!("{}", err).contains("report.md"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Report Error: {} at line {} in {}", kind, line, file)]
pub struct ReportError {
    /// The kind of error that occurred
    pub kind: ReportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ReportError {
    /// Create a new report error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ReportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
