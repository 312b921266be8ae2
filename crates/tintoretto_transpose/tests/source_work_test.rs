//! Profile loading tests: TOML parsing and validation failures.

use tintoretto_error::TransposeErrorKind;
use tintoretto_interface::SceneRef;
use tintoretto_transpose::SourceWork;

const TEMPEST_PROFILE: &str = r#"
[work]
title = "STATIC"
tagline = "A Modern Retelling of The Tempest"
source_title = "Shakespeare's The Tempest"
source_setting = "A remote island"
required_mappings = ["Prospero → An exiled engineer"]
preserved_themes = "exile, power, and forgiveness"
banned_terms = ["island", "spirit"]
default_scene = { act = 1, scene = 1 }

[[scenes]]
act = 1
scene = 1
beats = ["A storm cripples the station"]

[[scenes]]
act = 1
scene = 2
beats = ["The exile is recounted", "A caretaker AI chafes at its leash"]

[fallback_bible.setting]
original = "A remote island"
transformed = "A decommissioned orbital station"
time_period = "2120"
primary_location = "Station Ariel"

[fallback_bible.characters.Prospero]
new_name = "Dr. Prosper Okonkwo"
role = "Exiled chief engineer"
motivation = "Regain control of what was taken"

[fallback_bible.objects.Staff]
new_form = "Master control tablet"
significance = "The instrument of authority"

[fallback_bible.themes]
Exile = "Being cut from the network"

[fallback_bible.vocabulary_mappings]
magic = "root access"
"#;

#[test]
fn parses_a_complete_profile() -> anyhow::Result<()> {
    let work = SourceWork::from_toml_str(TEMPEST_PROFILE)?;

    assert_eq!(work.title(), "STATIC");
    assert_eq!(work.source_title(), "Shakespeare's The Tempest");
    assert_eq!(work.catalog().len(), 2);
    assert_eq!(work.catalog().lookup(SceneRef::new(1, 2)).len(), 2);
    assert_eq!(work.banned_terms().len(), 2);
    assert_eq!(work.fallback_bible().characters.len(), 1);

    // No explicit plan in the profile, so the default scene stands in.
    assert_eq!(work.default_plan(), &[SceneRef::new(1, 1)]);
    Ok(())
}

#[test]
fn explicit_default_plan_wins_over_default_scene() -> anyhow::Result<()> {
    let profile = TEMPEST_PROFILE.replace(
        "default_scene = { act = 1, scene = 1 }",
        "default_scene = { act = 1, scene = 1 }\n\
         default_plan = [{ act = 1, scene = 2 }, { act = 1, scene = 1 }]",
    );

    let work = SourceWork::from_toml_str(&profile)?;
    assert_eq!(
        work.default_plan(),
        &[SceneRef::new(1, 2), SceneRef::new(1, 1)]
    );
    Ok(())
}

#[test]
fn parse_via_fromstr_matches_from_toml_str() -> anyhow::Result<()> {
    let parsed: SourceWork = TEMPEST_PROFILE.parse()?;
    assert_eq!(parsed, SourceWork::from_toml_str(TEMPEST_PROFILE)?);
    Ok(())
}

#[test]
fn rejects_invalid_toml() {
    let err = SourceWork::from_toml_str("not toml [[[").unwrap_err();
    assert!(matches!(err.kind, TransposeErrorKind::TomlParse(_)));
}

#[test]
fn rejects_empty_banned_terms() {
    let profile = TEMPEST_PROFILE.replace(
        r#"banned_terms = ["island", "spirit"]"#,
        "banned_terms = []",
    );

    let err = SourceWork::from_toml_str(&profile).unwrap_err();
    assert!(matches!(err.kind, TransposeErrorKind::EmptyBannedTerms));
}

#[test]
fn rejects_a_blank_banned_term() {
    let profile = TEMPEST_PROFILE.replace(
        r#"banned_terms = ["island", "spirit"]"#,
        r#"banned_terms = ["island", ""]"#,
    );

    let err = SourceWork::from_toml_str(&profile).unwrap_err();
    assert!(matches!(err.kind, TransposeErrorKind::UnmatchableTerm { .. }));
}

#[test]
fn rejects_a_scene_catalogued_twice() {
    // Point the second scene entry at the first entry's key.
    let profile = TEMPEST_PROFILE.replace("\nscene = 2\n", "\nscene = 1\n");

    let err = SourceWork::from_toml_str(&profile).unwrap_err();
    assert!(matches!(
        err.kind,
        TransposeErrorKind::DuplicateScene { act: 1, scene: 1 }
    ));
}

#[test]
fn rejects_a_default_scene_missing_from_the_catalog() {
    let profile = TEMPEST_PROFILE.replace(
        "default_scene = { act = 1, scene = 1 }",
        "default_scene = { act = 3, scene = 3 }",
    );

    let err = SourceWork::from_toml_str(&profile).unwrap_err();
    assert!(matches!(
        err.kind,
        TransposeErrorKind::MissingDefaultScene { act: 3, scene: 3 }
    ));
}

#[test]
fn rejects_a_scene_with_no_beats() {
    let profile = TEMPEST_PROFILE.replace(
        r#"beats = ["A storm cripples the station"]"#,
        "beats = []",
    );

    let err = SourceWork::from_toml_str(&profile).unwrap_err();
    assert!(matches!(
        err.kind,
        TransposeErrorKind::EmptyBeats { act: 1, scene: 1 }
    ));
}

#[test]
fn rejects_an_empty_fallback_section() {
    // Dropping the only theme leaves the themes table empty.
    let profile = TEMPEST_PROFILE.replace(r#"Exile = "Being cut from the network""#, "");

    let err = SourceWork::from_toml_str(&profile).unwrap_err();
    match err.kind {
        TransposeErrorKind::EmptyFallbackSection(section) => assert_eq!(section, "themes"),
        other => panic!("expected empty-section error, got {other}"),
    }
}

#[test]
fn rejects_a_profile_without_a_fallback_bible() {
    let profile = TEMPEST_PROFILE
        .split("[fallback_bible.setting]")
        .next()
        .unwrap();

    let err = SourceWork::from_toml_str(profile).unwrap_err();
    assert!(matches!(err.kind, TransposeErrorKind::TomlParse(_)));
}

#[test]
fn reads_a_profile_from_disk() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("tintoretto-profile-{}.toml", std::process::id()));
    std::fs::write(&path, TEMPEST_PROFILE)?;

    let work = SourceWork::from_file(&path);
    std::fs::remove_file(&path)?;

    assert_eq!(work?.title(), "STATIC");
    Ok(())
}

#[test]
fn missing_file_is_a_read_error() {
    let err = SourceWork::from_file("/nonexistent/profile.toml").unwrap_err();
    assert!(matches!(err.kind, TransposeErrorKind::FileRead(_)));
}
