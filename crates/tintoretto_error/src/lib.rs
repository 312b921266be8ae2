//! Error types for the Tintoretto library.
//!
//! This crate provides the foundation error types used throughout the Tintoretto workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use tintoretto_error::{TintorettoResult, JsonError};
//!
//! fn parse_payload() -> TintorettoResult<String> {
//!     Err(JsonError::new("unexpected end of input"))?
//! }
//!
//! match parse_payload() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod gemini;
mod json;
mod report;
mod transpose;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{TintorettoError, TintorettoErrorKind, TintorettoResult};
pub use gemini::{GeminiError, GeminiErrorKind, RetryableError};
pub use json::JsonError;
pub use report::{ReportError, ReportErrorKind};
pub use transpose::{TransposeError, TransposeErrorKind};
