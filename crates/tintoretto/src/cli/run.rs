//! Pipeline command handlers.

use std::path::Path;
use tintoretto::report;
use tintoretto::{
    ConfigError, ConsistencyValidator, GeminiClient, SceneRef, SourceWork, TintorettoResult,
    TranspositionPipeline, WorldBible, parse_world_bible,
};

/// Run the full pipeline and write the story artifacts.
///
/// # Arguments
///
/// * `context` - Target context to transpose the source work into
/// * `scenes` - `ACT:SCENE` selectors; empty means the profile's default plan
/// * `model` - Optional model override for both pipeline stages
/// * `bible` - Optional saved bible to reuse, skipping the build call
/// * `work` - Optional custom profile; defaults to the built-in Macbeth profile
/// * `out_dir` - Directory the artifacts are written to
pub async fn run_pipeline(
    context: &str,
    scenes: &[String],
    model: Option<&str>,
    bible: Option<&Path>,
    work: Option<&Path>,
    out_dir: &Path,
) -> TintorettoResult<()> {
    let selectors = parse_selectors(scenes)?;
    let work = load_work(work)?;

    let client = GeminiClient::new()?;
    let mut pipeline = TranspositionPipeline::new(client, work)?;
    if let Some(model) = model {
        pipeline = pipeline.with_model(model);
    }
    if let Some(path) = bible {
        pipeline = pipeline.with_bible(load_bible(path)?);
    }

    tracing::info!(
        context = %context,
        requested_scenes = selectors.len(),
        "Starting transposition pipeline"
    );

    let result = pipeline.run(context, &selectors).await?;
    let paths = report::write_artifacts(&result, pipeline.work(), out_dir)?;

    // Print execution summary
    println!("\nTransposition Summary:");
    println!("======================");
    println!("Context: {}", result.context);
    println!("Scenes generated: {}", result.scenes.len());
    println!();

    for (i, scene) in result.scenes.iter().enumerate() {
        println!(
            "Scene {} (Act {}, Scene {}): {} characters",
            i + 1,
            scene.original_act,
            scene.original_scene,
            scene.generated_text.len()
        );
    }
    println!();

    if result.validation.passed {
        println!("Validation: PASSED - no banned terms detected");
    } else {
        println!(
            "Validation: WARNINGS - {} violation(s) found",
            result.validation.violation_count
        );
    }
    println!("World bible saved to: {}", paths.bible.display());
    println!("Story saved to: {}", paths.story.display());
    println!();

    Ok(())
}

/// Build the world bible for `context` and save it under `out_dir`.
///
/// Provider failures fall back to the profile's curated bible, same as a
/// full run, so this always produces an artifact.
pub async fn write_bible(
    context: &str,
    model: Option<&str>,
    work: Option<&Path>,
    out_dir: &Path,
) -> TintorettoResult<()> {
    let work = load_work(work)?;

    let client = GeminiClient::new()?;
    let mut pipeline = TranspositionPipeline::new(client, work)?;
    if let Some(model) = model {
        pipeline = pipeline.with_model(model);
    }

    let bible = pipeline.build_bible(context).await;
    let path = report::write_bible_json(&bible, out_dir)?;

    println!("\nWorld bible saved to: {}", path.display());
    println!("Characters mapped: {}", bible.characters.len());
    println!("Vocabulary mappings: {}", bible.vocabulary_mappings.len());
    println!();

    Ok(())
}

/// Validate an existing text file against the profile's banned-term list.
///
/// Returns whether the text passed; the caller maps that to the exit code.
pub fn check_story(file: &Path, work: Option<&Path>) -> TintorettoResult<bool> {
    let work = load_work(work)?;

    let text = std::fs::read_to_string(file)
        .map_err(|e| ConfigError::new(format!("Failed to read {}: {}", file.display(), e)))?;

    let validator = ConsistencyValidator::new(work.banned_terms())?;
    let validation = validator.check(&text);

    println!("\n{}", report::render_validation(&validation));
    Ok(validation.passed)
}

/// Load the source-work profile, falling back to the built-in Macbeth profile.
fn load_work(path: Option<&Path>) -> TintorettoResult<SourceWork> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading source work profile");
            Ok(SourceWork::from_file(path)?)
        }
        None => Ok(SourceWork::macbeth()),
    }
}

/// Parse `ACT:SCENE` selectors from the command line.
fn parse_selectors(scenes: &[String]) -> TintorettoResult<Vec<SceneRef>> {
    scenes
        .iter()
        .map(|s| s.parse::<SceneRef>().map_err(Into::into))
        .collect()
}

/// Read a previously saved world bible.
fn load_bible(path: &Path) -> TintorettoResult<WorldBible> {
    tracing::info!(path = %path.display(), "Loading world bible");
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::new(format!(
            "Failed to read bible file {}: {}",
            path.display(),
            e
        ))
    })?;
    parse_world_bible(&raw)
}
