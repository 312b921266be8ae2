//! Lexical validation report types.

use serde::{Deserialize, Serialize};

/// A single banned-term match in generated prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The banned term, as listed (lowercase).
    pub word: String,

    /// A short window of the surrounding text, original casing preserved,
    /// newlines flattened to spaces, wrapped in `...`.
    pub context: String,
}

/// The result of scanning prose against a banned-term list.
///
/// `violation_count` counts every match; `violations` stores at most the
/// first ten so reports stay readable on badly broken output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// True when the text contained no banned terms.
    pub passed: bool,

    /// Total number of matches found.
    pub violation_count: usize,

    /// Stored matches, capped at ten.
    pub violations: Vec<Violation>,

    /// Human-readable summary of the distinct offending terms, present
    /// only when the scan failed.
    pub warning: Option<String>,
}
