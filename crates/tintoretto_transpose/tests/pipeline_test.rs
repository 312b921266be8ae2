//! End-to-end pipeline tests against a scripted driver.

mod test_utils;

use test_utils::{MockDriver, MockResponse};
use tintoretto_core::Role;
use tintoretto_error::{GeminiErrorKind, TintorettoErrorKind, TransposeErrorKind};
use tintoretto_interface::SceneRef;
use tintoretto_transpose::{
    BIBLE_PERSONA, SCENE_PERSONA, SceneNumbering, SourceWork, TranspositionPipeline,
};

/// A bible the model might plausibly return, fenced the way Gemini fences
/// JSON even when told not to.
fn custom_bible_json() -> String {
    r#"```json
{
  "setting": {
    "original": "11th century Scotland",
    "transformed": "A lunar mining colony",
    "time_period": "2120",
    "primary_location": "Dome One"
  },
  "characters": {
    "Macbeth": {
      "new_name": "Custom Name",
      "role": "Dome Administrator",
      "motivation": "Total control of the oxygen ledger"
    }
  },
  "objects": {
    "Dagger": {
      "new_form": "Override chip",
      "significance": "The instrument of betrayal"
    }
  },
  "themes": {
    "Ambition": "Resource hoarding"
  },
  "vocabulary_mappings": {
    "castle": "dome"
  }
}
```"#
        .to_string()
}

#[tokio::test]
async fn malformed_bible_falls_back_and_run_completes() -> anyhow::Result<()> {
    let driver = MockDriver::new_sequence(vec![
        MockResponse::Success("not json".to_string()),
        MockResponse::Success("The terminal glowed in the empty office.".to_string()),
        MockResponse::Success("She read the model's forecast twice.".to_string()),
    ]);
    let work = SourceWork::macbeth();
    let expected = work.fallback_bible().clone();
    let pipeline = TranspositionPipeline::new(driver, work)?;

    let result = pipeline.run("A 2030 trading firm", &[]).await?;

    assert_eq!(result.world_bible, expected);
    assert_eq!(result.scenes.len(), 2);
    assert!(result.validation.passed);
    Ok(())
}

#[tokio::test]
async fn default_plan_runs_when_no_scenes_requested() -> anyhow::Result<()> {
    let driver = MockDriver::new_success("Clean prose with no flagged language.");
    let pipeline = TranspositionPipeline::new(driver, SourceWork::macbeth())?;

    let result = pipeline.run("A 2030 trading firm", &[]).await?;

    assert_eq!(result.scenes.len(), 2);
    assert_eq!(result.scenes[0].original_act, 1);
    assert_eq!(result.scenes[0].original_scene, 3);
    assert_eq!(result.scenes[1].original_act, 1);
    assert_eq!(result.scenes[1].original_scene, 5);
    assert_eq!(pipeline.driver().call_count(), 3);
    Ok(())
}

#[tokio::test]
async fn banned_terms_in_generated_prose_are_reported() -> anyhow::Result<()> {
    let prose = "Macro eyed the dagger-key. \"Thou shalt rule,\" Victoria said.";
    let driver = MockDriver::new_sequence(vec![
        MockResponse::Success("not json".to_string()),
        MockResponse::Success(prose.to_string()),
    ]);
    let pipeline = TranspositionPipeline::new(driver, SourceWork::macbeth())?;

    let result = pipeline
        .run("A 2030 trading firm", &[SceneRef::new(1, 3)])
        .await?;

    assert!(result.full_story.contains(prose));
    assert!(result.full_story.starts_with("--- SCENE 1 ---"));
    assert!(!result.validation.passed);
    assert_eq!(result.validation.violation_count, 2);

    let words: Vec<&str> = result
        .validation
        .violations
        .iter()
        .map(|v| v.word.as_str())
        .collect();
    // "dagger-key" trips the boundary match; "Thou" is stored lowercased.
    assert!(words.contains(&"dagger"));
    assert!(words.contains(&"thou"));
    assert!(result.validation.warning.is_some());
    Ok(())
}

#[tokio::test]
async fn requested_scene_order_is_mirrored_in_result() -> anyhow::Result<()> {
    let driver = MockDriver::new_sequence(vec![
        MockResponse::Success("not json".to_string()),
        MockResponse::Success("First requested scene.".to_string()),
        MockResponse::Success("Second requested scene.".to_string()),
    ]);
    let work = SourceWork::macbeth();
    let pipeline = TranspositionPipeline::new(driver, work)?;

    let selectors = [SceneRef::new(1, 5), SceneRef::new(1, 3)];
    let result = pipeline.run("A 2030 trading firm", &selectors).await?;

    assert_eq!(result.scenes[0].original_scene, 5);
    assert_eq!(result.scenes[1].original_scene, 3);
    assert_eq!(result.scenes[0].generated_text, "First requested scene.");
    assert_eq!(result.scenes[1].generated_text, "Second requested scene.");

    let first = result.full_story.find("--- SCENE 1 ---").unwrap();
    let second = result.full_story.find("--- SCENE 2 ---").unwrap();
    assert!(first < second);
    Ok(())
}

#[tokio::test]
async fn unknown_scene_uses_default_beats() -> anyhow::Result<()> {
    let driver = MockDriver::new_sequence(vec![
        MockResponse::Success("not json".to_string()),
        MockResponse::Success("Prose for the default beats.".to_string()),
    ]);
    let work = SourceWork::macbeth();
    let default_beats = work.catalog().lookup(SceneRef::new(1, 3)).to_vec();
    let pipeline = TranspositionPipeline::new(driver, work)?;

    let result = pipeline
        .run("A 2030 trading firm", &[SceneRef::new(9, 9)])
        .await?;

    assert_eq!(result.scenes[0].original_act, 9);
    assert_eq!(result.scenes[0].original_scene, 9);
    assert_eq!(result.scenes[0].beats, default_beats);
    Ok(())
}

#[tokio::test]
async fn scene_generation_failure_aborts_the_run() -> anyhow::Result<()> {
    let driver = MockDriver::new_sequence(vec![
        MockResponse::Success("not json".to_string()),
        MockResponse::Error(GeminiErrorKind::HttpError {
            status_code: 500,
            message: "internal error".to_string(),
        }),
    ]);
    let pipeline = TranspositionPipeline::new(driver, SourceWork::macbeth())?;

    let result = pipeline
        .run("A 2030 trading firm", &[SceneRef::new(1, 3), SceneRef::new(1, 5)])
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err.kind(), TintorettoErrorKind::Gemini(_)));
    assert_eq!(pipeline.driver().call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn injected_bible_skips_the_bible_request() -> anyhow::Result<()> {
    let driver = MockDriver::new_success("Prose built from the injected bible.");
    let work = SourceWork::macbeth();
    let bible = work.fallback_bible().clone();
    let pipeline = TranspositionPipeline::new(driver, work)?.with_bible(bible.clone());

    let result = pipeline
        .run("A 2030 trading firm", &[SceneRef::new(1, 1)])
        .await?;

    assert_eq!(pipeline.driver().call_count(), 1);
    assert_eq!(result.world_bible, bible);

    let requests = pipeline.driver().requests();
    assert_eq!(requests[0].messages[0].role, Role::System);
    assert_eq!(requests[0].messages[0].content, SCENE_PERSONA);
    Ok(())
}

#[tokio::test]
async fn parsed_bible_feeds_the_scene_prompt() -> anyhow::Result<()> {
    let driver = MockDriver::new_sequence(vec![
        MockResponse::Success(custom_bible_json()),
        MockResponse::Success("Prose.".to_string()),
    ]);
    let pipeline = TranspositionPipeline::new(driver, SourceWork::macbeth())?;

    let result = pipeline
        .run("A lunar mining colony", &[SceneRef::new(1, 1)])
        .await?;

    assert_eq!(
        result.world_bible.characters["Macbeth"].new_name,
        "Custom Name"
    );

    let requests = pipeline.driver().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].messages[0].content, BIBLE_PERSONA);
    assert!(requests[0].messages[1].content.contains("A lunar mining colony"));
    assert!(requests[0].messages[1].content.contains("11th century Scotland"));
    assert_eq!(requests[1].messages[0].content, SCENE_PERSONA);
    assert!(requests[1].messages[1].content.contains("Custom Name"));
    Ok(())
}

#[tokio::test]
async fn numbering_modes_control_the_prompted_scene_number() -> anyhow::Result<()> {
    let work = SourceWork::macbeth();
    let bible = work.fallback_bible().clone();

    let driver = MockDriver::new_success("Prose.");
    let pipeline = TranspositionPipeline::new(driver, work.clone())?.with_bible(bible.clone());
    pipeline
        .run("A 2030 trading firm", &[SceneRef::new(1, 5)])
        .await?;
    let requests = pipeline.driver().requests();
    assert!(requests[0].messages[1].content.contains("Write Scene 1"));

    let driver = MockDriver::new_success("Prose.");
    let pipeline = TranspositionPipeline::new(driver, work)?
        .with_bible(bible)
        .with_numbering(SceneNumbering::Source);
    pipeline
        .run("A 2030 trading firm", &[SceneRef::new(1, 5)])
        .await?;
    let requests = pipeline.driver().requests();
    assert!(requests[0].messages[1].content.contains("Write Scene 5"));
    Ok(())
}

#[tokio::test]
async fn metadata_reflects_driver_and_validator() -> anyhow::Result<()> {
    let driver = MockDriver::new_success("Prose.");
    let pipeline = TranspositionPipeline::new(driver, SourceWork::macbeth())?;

    let result = pipeline
        .run("A 2030 trading firm", &[SceneRef::new(1, 1)])
        .await?;

    assert_eq!(result.metadata.pipeline_version, "1.0.0");
    assert_eq!(result.metadata.provider, "mock");
    assert_eq!(result.metadata.model, "mock-model");
    assert_eq!(result.metadata.banned_terms_checked, 42);
    Ok(())
}

#[tokio::test]
async fn model_override_lands_in_requests_and_metadata() -> anyhow::Result<()> {
    let driver = MockDriver::new_success("Prose.");
    let pipeline = TranspositionPipeline::new(driver, SourceWork::macbeth())?
        .with_model("gemini-2.0-flash")
        .with_temperature(0.9)
        .with_max_tokens(4096);

    let result = pipeline
        .run("A 2030 trading firm", &[SceneRef::new(1, 1)])
        .await?;

    assert_eq!(result.metadata.model, "gemini-2.0-flash");
    for request in pipeline.driver().requests() {
        assert_eq!(request.model.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(request.temperature, Some(0.9));
        assert_eq!(request.max_tokens, Some(4096));
    }
    Ok(())
}

#[tokio::test]
async fn generate_scene_without_bible_is_an_error() -> anyhow::Result<()> {
    let driver = MockDriver::new_success("Prose.");
    let work = SourceWork::macbeth();
    let beats = work.catalog().lookup(SceneRef::new(1, 3)).to_vec();
    let pipeline = TranspositionPipeline::new(driver, work)?;

    let err = pipeline.generate_scene(&beats, 1).await.unwrap_err();
    match err.kind() {
        TintorettoErrorKind::Transpose(e) => {
            assert!(matches!(e.kind, TransposeErrorKind::BibleNotInitialized));
        }
        other => panic!("expected transpose error, got {other}"),
    }
    assert_eq!(pipeline.driver().call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn bible_failure_is_not_fatal_to_the_run() -> anyhow::Result<()> {
    let driver = MockDriver::new_fail_then_succeed(
        1,
        GeminiErrorKind::EmptyResponse("no candidates".to_string()),
        "Scene prose.",
    );
    let work = SourceWork::macbeth();
    let expected = work.fallback_bible().clone();
    let pipeline = TranspositionPipeline::new(driver, work)?;

    let result = pipeline
        .run("A 2030 trading firm", &[SceneRef::new(1, 3)])
        .await?;

    assert_eq!(result.world_bible, expected);
    assert_eq!(result.scenes[0].generated_text, "Scene prose.");
    assert_eq!(pipeline.driver().call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn build_bible_parses_provider_output() -> anyhow::Result<()> {
    let driver = MockDriver::new_success(&custom_bible_json());
    let pipeline = TranspositionPipeline::new(driver, SourceWork::macbeth())?;

    let bible = pipeline.build_bible("A lunar mining colony").await;
    assert_eq!(bible.setting.transformed, "A lunar mining colony");
    assert_eq!(bible.objects["Dagger"].new_form, "Override chip");
    Ok(())
}

#[tokio::test]
async fn provider_failure_during_bible_build_falls_back() -> anyhow::Result<()> {
    let driver = MockDriver::new_error(GeminiErrorKind::EmptyResponse(
        "no candidates".to_string(),
    ));
    let work = SourceWork::macbeth();
    let expected = work.fallback_bible().clone();
    let pipeline = TranspositionPipeline::new(driver, work)?;

    let bible = pipeline.build_bible("A 2030 trading firm").await;
    assert_eq!(bible, expected);
    Ok(())
}
