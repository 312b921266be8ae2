//! World bible types.
//!
//! The world bible is the structured mapping from the source work into the
//! target domain. Its serde field names are the wire schema: they match the
//! JSON the provider is instructed to emit and the `world_bible.json`
//! artifact written after a run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where and when the transposed story takes place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    /// The source work's setting, kept for reference.
    pub original: String,

    /// The equivalent setting in the target domain.
    pub transformed: String,

    /// Specific year or era of the transposed story.
    pub time_period: String,

    /// Name of the main location in the target domain.
    pub primary_location: String,
}

/// A source character transposed into the target domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterMapping {
    /// Name of the character in the target domain.
    pub new_name: String,

    /// The character's role or title in the target domain.
    pub role: String,

    /// What drives the character.
    pub motivation: String,
}

/// A significant source object transposed into the target domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMapping {
    /// What the object becomes in the target domain.
    pub new_form: String,

    /// Why the mapping works dramatically.
    pub significance: String,
}

/// The complete mapping from the source work into the target domain.
///
/// Maps are ordered (`BTreeMap`) so serialization and report rendering are
/// deterministic across runs. A bible is immutable once built: it either
/// parsed cleanly from provider output or is the fixed fallback instance,
/// never a partial merge of the two.
///
/// # Examples
///
/// ```
/// use tintoretto_interface::{Setting, WorldBible};
/// use std::collections::BTreeMap;
///
/// let bible = WorldBible {
///     setting: Setting {
///         original: "11th century Scotland".to_string(),
///         transformed: "Manhattan's Financial District".to_string(),
///         time_period: "2030".to_string(),
///         primary_location: "Meridian Capital's Quantum Trading Floor".to_string(),
///     },
///     characters: BTreeMap::new(),
///     objects: BTreeMap::new(),
///     themes: BTreeMap::new(),
///     vocabulary_mappings: BTreeMap::new(),
/// };
///
/// assert_eq!(bible.setting.time_period, "2030");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldBible {
    /// The transposed setting.
    pub setting: Setting,

    /// Original character name to transposed character.
    pub characters: BTreeMap<String, CharacterMapping>,

    /// Original object name to transposed object.
    pub objects: BTreeMap<String, ObjectMapping>,

    /// Theme name to a description of how it manifests in the target domain.
    pub themes: BTreeMap<String, String>,

    /// Source-work term to target-domain replacement.
    pub vocabulary_mappings: BTreeMap<String, String>,
}
