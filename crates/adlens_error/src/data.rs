//! Dataset error types.

/// Kinds of dataset errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DataErrorKind {
    /// Failed to open or read the data file
    #[display("Failed to read data file: {}", _0)]
    FileRead(String),
    /// CSV record could not be decoded
    #[display("Malformed CSV: {}", _0)]
    Csv(String),
    /// Required column is absent from the header
    #[display("Missing required column: {}", _0)]
    MissingColumn(String),
    /// Dataset has no records
    #[display("Dataset contains no records")]
    Empty,
}

/// Dataset error with location tracking.
///
/// # Examples
///
/// ```
/// use adlens_error::{DataError, DataErrorKind};
///
/// let err = DataError::new(DataErrorKind::MissingColumn("roas".to_string()));
/// assert!(format!("{}", err).contains("roas"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Data Error: {} at line {} in {}", kind, line, file)]
pub struct DataError {
    /// The kind of error that occurred
    pub kind: DataErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DataError {
    /// Create a new data error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DataErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
