//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, GeminiError, JsonError, ReportError, TransposeError};

/// The foundation error enum. Each workspace crate contributes a variant
/// for its own error domain.
///
/// # Examples
///
/// ```
/// use tintoretto_error::{TintorettoError, ConfigError};
///
/// let cfg_err = ConfigError::new("missing context argument");
/// let err: TintorettoError = cfg_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TintorettoErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Gemini provider error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Transposition engine error
    #[from(TransposeError)]
    Transpose(TransposeError),
    /// Report artifact error
    #[from(ReportError)]
    Report(ReportError),
}

impl TintorettoErrorKind {
    /// True when the error stems from caller setup rather than pipeline execution.
    ///
    /// Missing API keys, malformed selectors, and unreadable profile files
    /// are recoverable before a run starts; provider transport failures are
    /// not, so the CLI reports the two classes differently.
    pub fn is_configuration(&self) -> bool {
        match self {
            TintorettoErrorKind::Config(_) => true,
            TintorettoErrorKind::Gemini(e) => {
                matches!(e.kind, crate::GeminiErrorKind::MissingApiKey)
            }
            TintorettoErrorKind::Transpose(e) => e.kind.is_profile(),
            _ => false,
        }
    }
}

/// Tintoretto error with kind discrimination.
///
/// # Examples
///
/// ```
/// use tintoretto_error::{TintorettoResult, ConfigError};
///
/// fn might_fail() -> TintorettoResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Tintoretto Error: {}", _0)]
pub struct TintorettoError(Box<TintorettoErrorKind>);

impl TintorettoError {
    /// Create a new error from a kind.
    pub fn new(kind: TintorettoErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TintorettoErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to TintorettoErrorKind
impl<T> From<T> for TintorettoError
where
    T: Into<TintorettoErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Tintoretto operations.
///
/// # Examples
///
/// ```
/// use tintoretto_error::{TintorettoResult, JsonError};
///
/// fn parse_bible() -> TintorettoResult<String> {
///     Err(JsonError::new("expected value at line 1 column 1"))?
/// }
/// ```
pub type TintorettoResult<T> = std::result::Result<T, TintorettoError>;
