//! Report artifact error types.

/// Kinds of report-writing errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ReportErrorKind {
    /// Failed to create output directory
    #[display("Failed to create output directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write report file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read an input file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Failed to serialize an artifact
    #[display("Failed to serialize artifact: {}", _0)]
    Serialization(String),
}

/// Report error with location tracking.
///
/// # Examples
///
/// ```
/// use tintoretto_error::{ReportError, ReportErrorKind};
///
/// let err = ReportError::new(ReportErrorKind::FileWrite("/out/story_output.txt: permission denied".to_string()));
/// assert!(format!("{}", err).contains("story_output.txt"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Report Error: {} at line {} in {}", kind, line, file)]
pub struct ReportError {
    /// The specific error condition
    pub kind: ReportErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ReportError {
    /// Create a new ReportError with automatic location tracking.
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
