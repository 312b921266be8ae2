//! Prompt construction for the bible and scene generation calls.
//!
//! Prompt text is the engine's contract with the provider: the bible prompt
//! fixes the JSON schema the parser expects, and the scene prompt fixes the
//! constraint rules the validator later enforces. Change them together.

use crate::SourceWork;
use tintoretto_error::{JsonError, TintorettoResult};
use tintoretto_interface::WorldBible;

/// System persona for the bible-building call.
pub const BIBLE_PERSONA: &str = "You are a narrative architect.";

/// System persona for scene generation calls.
pub const SCENE_PERSONA: &str = "You are a masterful storyteller.";

/// Build the user prompt that requests a world bible for `context`.
///
/// The embedded JSON skeleton mirrors the serde field names of
/// [`WorldBible`], so a compliant response deserializes directly.
pub fn bible_prompt(work: &SourceWork, context: &str) -> String {
    let mappings = work
        .required_mappings()
        .iter()
        .map(|mapping| format!("- {mapping}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Your task is to create a "World Bible" that maps {source_title} to the context of: {context}

Create a JSON object with the following structure:
{{
    "setting": {{
        "original": "{source_setting}",
        "transformed": "<modern equivalent>",
        "time_period": "<specific year/era>",
        "primary_location": "<main setting name>"
    }},
    "characters": {{
        "<original_name>": {{
            "new_name": "<modern name>",
            "role": "<modern role/title>",
            "motivation": "<character's drive>"
        }}
    }},
    "objects": {{
        "<original_object>": {{
            "new_form": "<modern equivalent>",
            "significance": "<why this mapping works>"
        }}
    }},
    "themes": {{
        "<original_theme>": "<modern interpretation>"
    }},
    "vocabulary_mappings": {{
        "<old_term>": "<new_term>"
    }}
}}

Required mappings (minimum):
{mappings}

Ensure the mappings preserve the original themes of {preserved_themes}.
Return ONLY valid JSON, no markdown formatting."#,
        source_title = work.source_title(),
        source_setting = work.source_setting(),
        preserved_themes = work.preserved_themes(),
    )
}

/// Build the user prompt that renders one scene's beats as prose.
///
/// The bible is embedded as pretty-printed JSON and the beats as ordered
/// bullet lines. The rule block is fixed; the validator's banned-term list
/// is the enforcement side of rule 4.
///
/// # Errors
///
/// Returns an error if the bible cannot be serialized.
pub fn scene_prompt(
    bible: &WorldBible,
    beats: &[String],
    scene_number: u32,
) -> TintorettoResult<String> {
    let wb_context =
        serde_json::to_string_pretty(bible).map_err(|e| JsonError::new(e.to_string()))?;
    let beats_formatted = beats
        .iter()
        .map(|beat| format!("  - {beat}"))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!(
        r#"Transform these classical narrative beats into a modern financial thriller using the provided World Bible as your STRICT constraint layer.

=== WORLD BIBLE (YOU MUST USE THESE MAPPINGS) ===
{wb_context}

=== STORY BEATS TO TRANSFORM ===
{beats_formatted}

=== CRITICAL RULES ===
1. Use ONLY the character names from the World Bible (e.g., "Macro" not "Macbeth")
2. Use ONLY the modern settings from the World Bible (e.g., "Server Farm" not "castle")
3. Use ONLY the modern objects from the World Bible (e.g., "Admin Key" not "dagger")
4. NEVER use these words: sword, dagger, witch, witches, castle, king, queen, throne,
   crown, dungeon, knight, thy, thou, hast, hath, heath, cauldron, potion, spell,
   Scotland, Scottish, thane, prophecy (use "prediction" instead)
5. Write in a modern, literary prose style suitable for a tech-thriller
6. Include dialogue that feels authentic to Wall Street / Silicon Valley
7. Maintain the psychological tension and moral complexity of the original
8. Include specific technical details about HFT, algorithms, and trading

=== OUTPUT FORMAT ===
Write Scene {scene_number} as 2-3 paragraphs of polished prose.
Include at least one section of dialogue.
Begin with a scene-setting description of the modern environment.
End with a moment of tension or foreshadowing."#
    ))
}
