//! Constrained narrative transposition engine for Tintoretto.
//!
//! This crate turns a classic source work into a retelling set in a
//! caller-supplied target domain, mediated by any [`TintorettoDriver`]
//! implementation:
//!
//! - **World bible building**: a structured JSON mapping of source
//!   characters, objects, themes, and vocabulary into the target domain,
//!   with a fixed fallback when provider output cannot be parsed
//! - **Scene generation**: prose rendered from catalogued story beats,
//!   constrained by the bible and a fixed rule set
//! - **Consistency validation**: word-boundary scanning of the output for
//!   banned source-work terms
//!
//! # Example
//!
//! ```rust,ignore
//! use tintoretto_models::GeminiClient;
//! use tintoretto_transpose::{SourceWork, TranspositionPipeline};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = TranspositionPipeline::new(GeminiClient::new()?, SourceWork::macbeth())?;
//! let result = pipeline
//!     .run("A 2030 High-Frequency Trading Firm in Manhattan", &[])
//!     .await?;
//!
//! assert!(result.validation.passed);
//! # Ok(())
//! # }
//! ```
//!
//! [`TintorettoDriver`]: tintoretto_interface::TintorettoDriver

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod consistency;
mod extraction;
mod pipeline;
mod prompts;
mod work;

pub use catalog::BeatCatalog;
pub use consistency::ConsistencyValidator;
pub use extraction::{extract_json, parse_json, parse_world_bible};
pub use pipeline::{PIPELINE_VERSION, SceneNumbering, TranspositionPipeline};
pub use prompts::{BIBLE_PERSONA, SCENE_PERSONA, bible_prompt, scene_prompt};
pub use work::SourceWork;
