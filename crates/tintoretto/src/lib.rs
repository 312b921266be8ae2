//! Tintoretto - Constrained Narrative Transposition
//!
//! Tintoretto rewrites classic drama into a caller-supplied setting while
//! holding the story to hard lexical constraints. A pipeline builds a
//! "world bible" mapping the source work into the target context, generates
//! prose scene by scene from a beat catalog, and validates the result
//! against a banned-term list so no period vocabulary survives.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tintoretto::{GeminiClient, SourceWork, TranspositionPipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiClient::new()?;
//!     let pipeline = TranspositionPipeline::new(client, SourceWork::macbeth())?;
//!
//!     let result = pipeline
//!         .run("A 2030 High-Frequency Trading Firm in Manhattan", &[])
//!         .await?;
//!
//!     println!("{}", result.full_story);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Tintoretto is organized as a workspace with focused crates:
//!
//! - `tintoretto_error` - Error types
//! - `tintoretto_core` - Request and message types
//! - `tintoretto_interface` - TintorettoDriver trait and pipeline records
//! - `tintoretto_models` - LLM provider implementations
//! - `tintoretto_transpose` - Transposition engine
//!
//! This crate (`tintoretto`) re-exports everything for convenience and adds
//! the report renderer the CLI writes artifacts with.

pub use tintoretto_core::*;
pub use tintoretto_error::*;
pub use tintoretto_interface::*;
pub use tintoretto_models::*;
pub use tintoretto_transpose::*;

pub mod report;
