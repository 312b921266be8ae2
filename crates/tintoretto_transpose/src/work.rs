//! Source-work profiles.
//!
//! A [`SourceWork`] bundles every constant the engine needs that is specific
//! to one source text: the beat catalog, the bible-prompt mappings, the
//! fallback bible, and the banned-term list. The built-in [`SourceWork::macbeth`]
//! profile ships with the crate; alternate works load from TOML files.

use crate::BeatCatalog;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use tintoretto_error::{TransposeError, TransposeErrorKind};
use tintoretto_interface::{CharacterMapping, ObjectMapping, SceneRef, Setting, WorldBible};

/// A source work and the constants for transposing it.
///
/// # Example TOML Structure
///
/// ```toml
/// [work]
/// title = "ZERO SUM GAME"
/// tagline = "A Modern Retelling of Macbeth"
/// source_title = "Shakespeare's Macbeth"
/// source_setting = "11th century Scotland"
/// required_mappings = ["Macbeth → A quant/trader character"]
/// preserved_themes = "ambition, guilt, prophecy, and downfall"
/// banned_terms = ["sword", "dagger"]
/// default_scene = { act = 1, scene = 3 }
/// default_plan = [{ act = 1, scene = 3 }, { act = 1, scene = 5 }]
///
/// [[scenes]]
/// act = 1
/// scene = 3
/// beats = ["The mysterious figures deliver three prophecies"]
///
/// [fallback_bible.setting]
/// original = "11th century Scotland"
/// transformed = "Manhattan's Financial District"
/// time_period = "2030"
/// primary_location = "Meridian Capital's Quantum Trading Floor"
/// # plus characters, objects, themes, vocabulary_mappings tables
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct SourceWork {
    /// Title of the transposed story, used for report headers.
    title: String,
    /// One-line description of the retelling.
    tagline: String,
    /// Name of the source work as it appears in the bible prompt.
    source_title: String,
    /// The source work's setting, echoed in the bible prompt skeleton.
    source_setting: String,
    /// Minimum entity mappings the provider must cover, one bullet each.
    required_mappings: Vec<String>,
    /// Themes the mappings must preserve, as a prompt-ready phrase.
    preserved_themes: String,
    /// Beats for each catalogued scene.
    catalog: BeatCatalog,
    /// Scenes a run covers when the caller selects none.
    default_plan: Vec<SceneRef>,
    /// Complete bible used when provider output cannot be parsed.
    fallback_bible: WorldBible,
    /// Terms the validator flags in generated prose.
    banned_terms: Vec<String>,
}

impl SourceWork {
    /// Loads a source-work profile from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is invalid,
    /// or validation fails (empty catalog, duplicate or beatless scenes,
    /// missing default scene, empty or blank banned terms, incomplete
    /// fallback bible).
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TransposeError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TransposeError::new(TransposeErrorKind::FileRead(e.to_string())))?;
        content.parse()
    }

    /// Parse a source-work profile from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid TOML or failed validation.
    pub fn from_toml_str(s: &str) -> Result<Self, TransposeError> {
        let raw: TomlSourceWork = toml::from_str(s)
            .map_err(|e| TransposeError::new(TransposeErrorKind::TomlParse(e.to_string())))?;

        let mut scenes = BTreeMap::new();
        for entry in raw.scenes {
            let key = SceneRef::new(entry.act, entry.scene);
            if scenes.insert(key, entry.beats).is_some() {
                return Err(TransposeError::new(TransposeErrorKind::DuplicateScene {
                    act: entry.act,
                    scene: entry.scene,
                }));
            }
        }
        let catalog = BeatCatalog::new(scenes, raw.work.default_scene)?;

        let default_plan = if raw.work.default_plan.is_empty() {
            vec![raw.work.default_scene]
        } else {
            raw.work.default_plan
        };

        let work = Self {
            title: raw.work.title,
            tagline: raw.work.tagline,
            source_title: raw.work.source_title,
            source_setting: raw.work.source_setting,
            required_mappings: raw.work.required_mappings,
            preserved_themes: raw.work.preserved_themes,
            catalog,
            default_plan,
            fallback_bible: raw.fallback_bible,
            banned_terms: raw.work.banned_terms,
        };
        work.validate()?;
        Ok(work)
    }

    /// Validates the profile.
    ///
    /// The catalog is validated at construction; this checks the remaining
    /// invariants: a banned-term list that is non-empty and free of blank
    /// entries, and a fallback bible with content in every section.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    #[tracing::instrument(skip(self), fields(title = %self.title, scene_count = self.catalog.len()))]
    pub fn validate(&self) -> Result<(), TransposeError> {
        if self.banned_terms.is_empty() {
            return Err(TransposeError::new(TransposeErrorKind::EmptyBannedTerms));
        }
        for term in &self.banned_terms {
            if term.trim().is_empty() {
                return Err(TransposeError::new(TransposeErrorKind::UnmatchableTerm {
                    term: term.clone(),
                    message: "empty after trimming whitespace".to_string(),
                }));
            }
        }

        let bible = &self.fallback_bible;
        let sections: [(&str, bool); 4] = [
            ("characters", bible.characters.is_empty()),
            ("objects", bible.objects.is_empty()),
            ("themes", bible.themes.is_empty()),
            ("vocabulary_mappings", bible.vocabulary_mappings.is_empty()),
        ];
        for (name, empty) in sections {
            if empty {
                return Err(TransposeError::new(
                    TransposeErrorKind::EmptyFallbackSection(name.to_string()),
                ));
            }
        }

        Ok(())
    }

    /// The built-in Macbeth profile.
    ///
    /// Carries the full constant set for transposing Macbeth into a
    /// high-frequency-trading domain: Act 1 beats for scenes one through
    /// five, the Meridian Capital fallback bible, and the banned-term list.
    pub fn macbeth() -> Self {
        Self {
            title: "ZERO SUM GAME".to_string(),
            tagline: "A Modern Retelling of Macbeth".to_string(),
            source_title: "Shakespeare's Macbeth".to_string(),
            source_setting: "11th century Scotland".to_string(),
            required_mappings: to_strings(&[
                "Macbeth → A quant/trader character",
                "Lady Macbeth → His ambitious partner",
                "The Witches → A predictive AI system",
                "King Duncan → The current firm leader",
                "Banquo → A trusted colleague",
                "The Dagger → A digital artifact (key/algorithm/access)",
                "The Castle → The firm's infrastructure",
                "The Crown → Control of the firm",
            ]),
            preserved_themes: "ambition, guilt, prophecy, and downfall".to_string(),
            catalog: macbeth_catalog(),
            default_plan: vec![SceneRef::new(1, 3), SceneRef::new(1, 5)],
            fallback_bible: macbeth_fallback_bible(),
            banned_terms: to_strings(&MACBETH_BANNED_TERMS),
        }
    }
}

impl FromStr for SourceWork {
    type Err = TransposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_toml_str(s)
    }
}

/// Anachronisms that must not survive transposition out of Macbeth:
/// period vocabulary, archaic pronouns, proper names, and place names.
const MACBETH_BANNED_TERMS: [&str; 42] = [
    "sword",
    "dagger",
    "witch",
    "witches",
    "castle",
    "king",
    "queen",
    "throne",
    "crown",
    "dungeon",
    "knight",
    "lord",
    "lady",
    "thy",
    "thou",
    "hast",
    "hath",
    "doth",
    "wherefore",
    "methinks",
    "prithee",
    "heath",
    "cauldron",
    "potion",
    "spell",
    "prophecy",
    "apparition",
    "banquo",
    "macbeth",
    "macduff",
    "malcolm",
    "duncan",
    "fleance",
    "scotland",
    "scottish",
    "thane",
    "cawdor",
    "glamis",
    "birnam",
    "dunsinane",
    "fife",
    "inverness",
];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn macbeth_catalog() -> BeatCatalog {
    let mut scenes = BTreeMap::new();
    scenes.insert(
        SceneRef::new(1, 1),
        to_strings(&[
            "Three mysterious figures meet in a desolate place",
            "They speak of chaos and upheaval",
            "They plan to meet the protagonist after a great conflict",
            "They chant cryptically about the nature of truth and deception",
        ]),
    );
    scenes.insert(
        SceneRef::new(1, 2),
        to_strings(&[
            "News arrives of a brutal battle won",
            "The protagonist is praised for exceptional performance",
            "A traitor's downfall is announced",
            "The protagonist is to receive the traitor's position",
        ]),
    );
    scenes.insert(
        SceneRef::new(1, 3),
        to_strings(&[
            "The mysterious figures deliver three prophecies",
            "The first prophecy speaks of the protagonist's current rise",
            "The second prophecy hints at greater power to come",
            "The third prophecy suggests ultimate authority",
            "A companion receives a prophecy about his descendants",
            "The first prophecy immediately proves true",
        ]),
    );
    scenes.insert(
        SceneRef::new(1, 4),
        to_strings(&[
            "The current leader praises the protagonist",
            "The leader announces his succession plan",
            "The protagonist realizes an obstacle stands in his path",
            "Dark ambitions begin to form",
        ]),
    );
    scenes.insert(
        SceneRef::new(1, 5),
        to_strings(&[
            "The protagonist's partner reads of the prophecies",
            "She fears he lacks the ruthlessness to seize power",
            "She resolves to push him toward action",
            "News arrives of an important visitor",
            "She calls upon dark forces for strength",
        ]),
    );
    // The prophecy scene is the fallback for uncatalogued lookups.
    BeatCatalog::from_validated(scenes, SceneRef::new(1, 3))
}

fn macbeth_fallback_bible() -> WorldBible {
    let character = |new_name: &str, role: &str, motivation: &str| CharacterMapping {
        new_name: new_name.to_string(),
        role: role.to_string(),
        motivation: motivation.to_string(),
    };
    let object = |new_form: &str, significance: &str| ObjectMapping {
        new_form: new_form.to_string(),
        significance: significance.to_string(),
    };
    let entry = |k: &str, v: &str| (k.to_string(), v.to_string());

    WorldBible {
        setting: Setting {
            original: "11th century Scotland".to_string(),
            transformed: "Manhattan's Financial District".to_string(),
            time_period: "2030".to_string(),
            primary_location: "Meridian Capital's Quantum Trading Floor".to_string(),
        },
        characters: BTreeMap::from([
            (
                "Macbeth".to_string(),
                character(
                    "Marcus 'Macro' Chen",
                    "Head of Quantitative Strategy",
                    "Absolute control over the firm's trading algorithms",
                ),
            ),
            (
                "Lady Macbeth".to_string(),
                character(
                    "Victoria Chen",
                    "Chief Risk Officer",
                    "Power and legacy through her husband's ascension",
                ),
            ),
            (
                "The Witches".to_string(),
                character(
                    "The Oracle",
                    "Experimental Predictive AI Model (v3.3.3)",
                    "None - a glitching system producing cryptic outputs",
                ),
            ),
            (
                "King Duncan".to_string(),
                character(
                    "David Kessler",
                    "Founding CEO of Meridian Capital",
                    "Maintaining his legacy and grooming a successor",
                ),
            ),
            (
                "Banquo".to_string(),
                character(
                    "Benjamin 'Ben' Okafor",
                    "Co-Head of Quant Strategy",
                    "Ethical trading and protecting his family's future",
                ),
            ),
            (
                "Malcolm".to_string(),
                character(
                    "Michael Kessler",
                    "VP of Operations (CEO's son)",
                    "Proving himself worthy of leadership",
                ),
            ),
            (
                "Macduff".to_string(),
                character(
                    "Director Sarah Martinez",
                    "SEC Lead Investigator",
                    "Exposing corruption in high-frequency trading",
                ),
            ),
        ]),
        objects: BTreeMap::from([
            (
                "Dagger".to_string(),
                object(
                    "Corrupted Admin Key / Root Access Token",
                    "The tool of betrayal - unauthorized system access",
                ),
            ),
            (
                "Crown".to_string(),
                object(
                    "CEO Position / Board Control",
                    "Ultimate power over the firm's direction",
                ),
            ),
            (
                "Castle".to_string(),
                object(
                    "The Server Farm (Primary Data Center)",
                    "The physical manifestation of digital power",
                ),
            ),
            (
                "Blood".to_string(),
                object(
                    "Audit Trails / Transaction Logs",
                    "Evidence that cannot be fully erased",
                ),
            ),
            (
                "Cauldron".to_string(),
                object(
                    "The Oracle's Neural Network Training Cluster",
                    "Where predictions are 'brewed'",
                ),
            ),
        ]),
        themes: BTreeMap::from([
            entry("Ambition", "The drive for alpha and market dominance"),
            entry(
                "Guilt",
                "Paranoia over regulatory investigation and data trails",
            ),
            entry(
                "Prophecy",
                "Algorithmic predictions vs. self-fulfilling prophecies",
            ),
            entry(
                "Nature vs Unnatural",
                "Human intuition vs. AI-driven decisions",
            ),
            entry(
                "Appearances vs Reality",
                "Market manipulation and hidden algorithms",
            ),
        ]),
        vocabulary_mappings: BTreeMap::from([
            entry("throne", "corner office"),
            entry("sword", "trading algorithm"),
            entry("battle", "market competition"),
            entry("army", "trading desk"),
            entry("murder", "hostile takeover / sabotage"),
            entry("ghost", "corrupted data echo"),
            entry("sleep", "system downtime"),
            entry("blood", "transaction logs"),
        ]),
    }
}

#[derive(Debug, serde::Deserialize)]
struct TomlSourceWork {
    work: TomlWorkMeta,
    scenes: Vec<TomlScene>,
    fallback_bible: WorldBible,
}

#[derive(Debug, serde::Deserialize)]
struct TomlWorkMeta {
    title: String,
    tagline: String,
    source_title: String,
    source_setting: String,
    required_mappings: Vec<String>,
    preserved_themes: String,
    banned_terms: Vec<String>,
    default_scene: SceneRef,
    #[serde(default)]
    default_plan: Vec<SceneRef>,
}

#[derive(Debug, serde::Deserialize)]
struct TomlScene {
    act: u32,
    scene: u32,
    beats: Vec<String>,
}
