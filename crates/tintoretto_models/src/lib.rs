//! LLM provider integrations for Tintoretto.
//!
//! This crate provides the Gemini REST client the pipeline runs against.
//! Other providers can be added behind the same [`TintorettoDriver`] seam
//! without touching the engine.
//!
//! [`TintorettoDriver`]: tintoretto_interface::TintorettoDriver
//!
//! # Example
//!
//! ```no_run
//! use tintoretto_models::GeminiClient;
//! use tintoretto_interface::TintorettoDriver;
//! use tintoretto_core::{GenerateRequest, Message};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Hello")])
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::{GeminiClient, GeminiResult};
