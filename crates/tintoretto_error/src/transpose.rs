//! Transposition engine error types.

/// Specific error conditions for transposition operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TransposeErrorKind {
    /// Failed to read a source work profile file
    #[display("Failed to read source work file: {}", _0)]
    FileRead(String),
    /// Failed to parse TOML content
    #[display("Failed to parse TOML: {}", _0)]
    TomlParse(String),
    /// Beat catalog has no scenes
    #[display("Beat catalog cannot be empty")]
    EmptyCatalog,
    /// Default scene key missing from the catalog
    #[display("Default scene {}:{} does not exist in the beat catalog", act, scene)]
    MissingDefaultScene {
        /// Act number of the missing default
        act: u32,
        /// Scene number of the missing default
        scene: u32,
    },
    /// A catalog entry has no beats
    #[display("Scene {}:{} has an empty beat list", act, scene)]
    EmptyBeats {
        /// Act number of the offending scene
        act: u32,
        /// Scene number of the offending scene
        scene: u32,
    },
    /// The same scene is catalogued more than once in a profile
    #[display("Scene {}:{} is catalogued more than once", act, scene)]
    DuplicateScene {
        /// Act number of the duplicated scene
        act: u32,
        /// Scene number of the duplicated scene
        scene: u32,
    },
    /// Banned term list is empty
    #[display("Banned term list cannot be empty")]
    EmptyBannedTerms,
    /// Fallback bible is missing required content
    #[display("Fallback bible is incomplete: {} is empty", _0)]
    EmptyFallbackSection(String),
    /// A banned term could not be compiled into a match pattern
    #[display("Banned term '{}' is not matchable: {}", term, message)]
    UnmatchableTerm {
        /// The offending term
        term: String,
        /// Compiler message
        message: String,
    },
    /// Scene generation requested before a world bible was available
    #[display("World bible not initialized: build one or inject it at construction")]
    BibleNotInitialized,
    /// No JSON value found in provider output
    #[display("No JSON found in response: {}", _0)]
    NoJsonFound(String),
    /// Serialization error
    #[display("Serialization error: {}", _0)]
    SerializationError(String),
}

impl TransposeErrorKind {
    /// True for errors raised while loading or validating a source-work
    /// profile, as opposed to errors raised mid-run.
    pub fn is_profile(&self) -> bool {
        matches!(
            self,
            TransposeErrorKind::FileRead(_)
                | TransposeErrorKind::TomlParse(_)
                | TransposeErrorKind::EmptyCatalog
                | TransposeErrorKind::MissingDefaultScene { .. }
                | TransposeErrorKind::EmptyBeats { .. }
                | TransposeErrorKind::DuplicateScene { .. }
                | TransposeErrorKind::EmptyBannedTerms
                | TransposeErrorKind::EmptyFallbackSection(_)
                | TransposeErrorKind::UnmatchableTerm { .. }
        )
    }
}

/// Error type for transposition operations.
///
/// # Examples
///
/// ```
/// use tintoretto_error::{TransposeError, TransposeErrorKind};
///
/// let err = TransposeError::new(TransposeErrorKind::BibleNotInitialized);
/// assert!(format!("{}", err).contains("not initialized"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transpose Error: {} at line {} in {}", kind, line, file)]
pub struct TransposeError {
    /// The specific error condition
    pub kind: TransposeErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl TransposeError {
    /// Create a new TransposeError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TransposeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
