use crate::integration::support::Fixture;
use chrono::{Duration, Utc};
use learnsphere::config::LibraryConfig;
use learnsphere::registry::RegistryDocument;
use learnsphere::tooling::cli::{CliContext, Commands};
use learnsphere::LibraryError;

fn context(fixture: &Fixture) -> CliContext {
    let config = LibraryConfig {
        root_directory: fixture.root.clone(),
        registry_path: Some(fixture.registry_path.clone()),
        ..LibraryConfig::default()
    };
    CliContext::from_config(config).unwrap()
}

#[test]
fn scan_then_show_json() {
    let fixture = Fixture::new();
    let cli = context(&fixture);

    let output = cli.execute(&Commands::Scan { force: false }).unwrap();
    assert!(output.contains("Music Theory"));
    assert!(output.contains("Programming"));

    let output = cli
        .execute(&Commands::Show {
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: RegistryDocument = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.directories.len(), 1);
    assert_eq!(parsed.courses.len(), 1);
    assert_eq!(parsed.metadata.version, "1.0");
}

#[test]
fn show_text_includes_totals() {
    let fixture = Fixture::new();
    let cli = context(&fixture);
    cli.execute(&Commands::Scan { force: false }).unwrap();
    let output = cli
        .execute(&Commands::Show {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("Total: 1 directories, 1 courses"));
    assert!(output.contains("music_theory"));
}

#[test]
fn cleanup_removes_only_stale_entries() {
    let fixture = Fixture::new();
    let cli = context(&fixture);
    cli.execute(&Commands::Scan { force: false }).unwrap();

    let registry = fixture.registry();
    let mut document = registry.load().unwrap();
    for entry in document.courses.values_mut() {
        entry.last_accessed = Utc::now() - Duration::days(45);
    }
    std::fs::write(
        &fixture.registry_path,
        serde_json::to_string_pretty(&document).unwrap(),
    )
    .unwrap();

    let output = cli.execute(&Commands::Cleanup { days: None }).unwrap();
    assert!(output.contains("Removed 1 entries"));
    let document = registry.load().unwrap();
    assert!(document.courses.is_empty());
    assert_eq!(document.directories.len(), 1);

    let output = cli.execute(&Commands::Cleanup { days: Some(30) }).unwrap();
    assert!(output.contains("Removed 0 entries"));
}

#[test]
fn clear_with_yes_empties_the_registry() {
    let fixture = Fixture::new();
    let cli = context(&fixture);
    cli.execute(&Commands::Scan { force: false }).unwrap();
    cli.execute(&Commands::Clear { yes: true }).unwrap();
    assert!(fixture.registry().load().unwrap().is_empty());
}

#[test]
fn resolve_reports_path_or_not_found() {
    let fixture = Fixture::new();
    let cli = context(&fixture);
    cli.execute(&Commands::Scan { force: false }).unwrap();

    let output = cli
        .execute(&Commands::Resolve {
            id: "programming".to_string(),
            directory: true,
        })
        .unwrap();
    assert!(output.ends_with("\tProgramming"));

    let err = cli
        .execute(&Commands::Resolve {
            id: "programming".to_string(),
            directory: false,
        })
        .unwrap_err();
    assert!(matches!(err, LibraryError::NotFound(_)));
}

#[test]
fn course_and_progress_reports() {
    let fixture = Fixture::new();
    let cli = context(&fixture);
    cli.library().home(learnsphere::ScanMode::Cached).unwrap();
    cli.library().open_directory("programming").unwrap();
    cli.library()
        .course_progress("rust-basics")
        .unwrap()
        .mark_completed("welcome.pdf")
        .unwrap();

    let text = cli
        .execute(&Commands::Course {
            id: "rust-basics".to_string(),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(text.contains("Getting Started"));
    assert!(text.contains("Modules: 2  Lessons: 6"));

    let json = cli
        .execute(&Commands::Progress {
            course_id: "rust-basics".to_string(),
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["stats"]["completed"], 1);
    assert_eq!(parsed["progress"]["lessons"]["welcome.pdf"]["completed"], true);
}

#[test]
fn scan_without_root_is_a_config_error() {
    let fixture = Fixture::new();
    let config = LibraryConfig {
        registry_path: Some(fixture.registry_path.clone()),
        ..LibraryConfig::default()
    };
    let cli = CliContext::from_config(config).unwrap();
    assert!(matches!(
        cli.execute(&Commands::Scan { force: false }),
        Err(LibraryError::ConfigError(_))
    ));
}

#[test]
fn config_command_renders_toml() {
    let fixture = Fixture::new();
    let output = context(&fixture).execute(&Commands::Config).unwrap();
    let parsed: toml::Value = toml::from_str(&output).unwrap();
    assert_eq!(parsed["cleanup_threshold_days"].as_integer(), Some(30));
    assert_eq!(parsed["logging"]["level"].as_str(), Some("info"));
}
