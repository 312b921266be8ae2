//! Trait definitions and shared records for the Tintoretto library.
//!
//! This crate defines the provider seam ([`TintorettoDriver`]) and the data
//! model shared between the transposition engine, the provider crates, and
//! the report layer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bible;
mod run;
mod scene;
mod traits;
mod validation;

pub use bible::{CharacterMapping, ObjectMapping, Setting, WorldBible};
pub use run::{PipelineResult, RunMetadata};
pub use scene::{SceneRef, SceneResult};
pub use traits::TintorettoDriver;
pub use validation::{ConsistencyReport, Violation};
