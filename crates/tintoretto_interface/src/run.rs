//! Pipeline run records.
//!
//! These types are shared between the transposition engine and the report
//! layer: the engine assembles them, the report layer renders them.

use crate::{ConsistencyReport, SceneResult, WorldBible};
use serde::{Deserialize, Serialize};

/// Provenance details for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Version of the pipeline schema that produced the result.
    pub pipeline_version: String,

    /// Provider that generated the prose (e.g., "gemini").
    pub provider: String,

    /// Model identifier the provider reported.
    pub model: String,

    /// Number of banned terms the validator checked against.
    pub banned_terms_checked: usize,
}

/// Complete result of a transposition run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// The caller-supplied target domain description.
    pub context: String,

    /// The world bible used for every scene in the run.
    pub world_bible: WorldBible,

    /// Ordered scene results, mirroring the requested scene order.
    pub scenes: Vec<SceneResult>,

    /// All scene prose joined with scene headers.
    pub full_story: String,

    /// Validation of the full story against the banned-term list.
    pub validation: ConsistencyReport,

    /// Provenance details.
    pub metadata: RunMetadata,
}
