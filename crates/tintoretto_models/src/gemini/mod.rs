//! Google Gemini API client implementation.
//!
//! This module provides the REST API client the pipeline uses for both
//! world-bible construction and scene generation. The client supports:
//! - Per-request model selection
//! - Client pooling with lazy initialization (one client per model)
//! - Automatic retry with exponential backoff for transient failures
//! - Thread-safe concurrent access

mod client;

pub use client::GeminiClient;

/// Result type for Gemini operations.
pub type GeminiResult<T> = std::result::Result<T, tintoretto_error::GeminiError>;
