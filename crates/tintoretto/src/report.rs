//! Artifact rendering and writing for pipeline runs.
//!
//! A run produces two files: `world_bible.json`, the mapping document as
//! pretty JSON, and `story_output.txt`, a plain-text report containing the
//! bible summary, the generated story, the validation findings, and run
//! metadata.

use std::path::{Path, PathBuf};
use tintoretto_error::{ReportError, ReportErrorKind, TintorettoResult};
use tintoretto_interface::{ConsistencyReport, PipelineResult, WorldBible};
use tintoretto_transpose::SourceWork;

/// Width of the `=` separator rules in the story report.
const SEPARATOR_WIDTH: usize = 80;

/// Locations of the artifacts written by [`write_artifacts`].
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    /// Saved world bible JSON.
    pub bible: PathBuf,
    /// Rendered story report.
    pub story: PathBuf,
}

/// Write both run artifacts under `out_dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a file cannot
/// be written.
pub fn write_artifacts(
    result: &PipelineResult,
    work: &SourceWork,
    out_dir: &Path,
) -> TintorettoResult<ArtifactPaths> {
    let bible = write_bible_json(&result.world_bible, out_dir)?;

    let story = out_dir.join("story_output.txt");
    write_file(&story, &render_story_report(result, work))?;
    tracing::info!(path = %story.display(), "Story report written");

    Ok(ArtifactPaths { bible, story })
}

/// Serialize a world bible to `world_bible.json` under `out_dir`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, serialization
/// fails, or the file cannot be written.
pub fn write_bible_json(bible: &WorldBible, out_dir: &Path) -> TintorettoResult<PathBuf> {
    std::fs::create_dir_all(out_dir).map_err(|e| {
        ReportError::new(ReportErrorKind::DirectoryCreation(format!(
            "{}: {}",
            out_dir.display(),
            e
        )))
    })?;

    let json = serde_json::to_string_pretty(bible)
        .map_err(|e| ReportError::new(ReportErrorKind::Serialization(e.to_string())))?;

    let path = out_dir.join("world_bible.json");
    write_file(&path, &json)?;
    tracing::info!(path = %path.display(), "World bible written");

    Ok(path)
}

/// Render the complete story report.
///
/// The title block comes from the source-work profile; the "Set in" line
/// is derived from the bible's transformed setting so it follows whatever
/// context the run targeted.
pub fn render_story_report(result: &PipelineResult, work: &SourceWork) -> String {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    let setting = &result.world_bible.setting;

    let mut out = format!(
        "{}\n{}\nSet in {}, {}\n\n{}\n\n",
        work.title(),
        work.tagline(),
        setting.transformed,
        setting.time_period,
        separator
    );

    out.push_str(&heading("WORLD BIBLE SUMMARY"));
    out.push_str(&format!(
        "\nSetting: {}\nTime Period: {}\n\nKey Characters:\n",
        setting.transformed, setting.time_period
    ));
    for (original, character) in &result.world_bible.characters {
        out.push_str(&format!(
            "  • {} → {} ({})\n",
            original, character.new_name, character.role
        ));
    }

    out.push_str(&format!("\n{separator}\n\n"));
    out.push_str(&heading("THE STORY"));
    out.push_str(&format!("\n{}\n", result.full_story));

    out.push_str(&format!("\n{separator}\n\n"));
    out.push_str(&render_validation(&result.validation));

    out.push_str(&format!(
        "\n{separator}\nPipeline Metadata:\n  Version: {}\n  Model: {}\n  Forbidden Words Checked: {}\n{separator}\n",
        result.metadata.pipeline_version, result.metadata.model, result.metadata.banned_terms_checked
    ));

    out
}

/// Render the validation section shared by the story report and `check`.
pub fn render_validation(validation: &ConsistencyReport) -> String {
    let status = if validation.passed {
        "✓ PASSED"
    } else {
        "⚠ WARNINGS DETECTED"
    };

    let mut out = format!(
        "{}\nStatus: {}\nViolations Found: {}\n",
        heading("CONSISTENCY VALIDATION REPORT"),
        status,
        validation.violation_count
    );

    if !validation.passed {
        if let Some(warning) = &validation.warning {
            out.push_str(&format!("\nWarning: {warning}\n"));
        }
        out.push_str("\nViolation Details:\n");
        for violation in &validation.violations {
            out.push_str(&format!("  - '{}': {}\n", violation.word, violation.context));
        }
    }

    out
}

fn heading(title: &str) -> String {
    format!("{}\n{}", title, "-".repeat(title.len()))
}

fn write_file(path: &Path, content: &str) -> TintorettoResult<()> {
    std::fs::write(path, content).map_err(|e| {
        ReportError::new(ReportErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
        .into()
    })
}
