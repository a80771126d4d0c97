use crate::integration::support::Fixture;
use learnsphere::metadata::{CourseMetadataStore, METADATA_FILENAME};
use learnsphere::progress::ProgressStore;
use learnsphere::registry::RegistrySection;
use learnsphere::{Library, LibraryError, ScanMode};
use std::fs;

/// Home scan followed by opening `programming`, which registers the course.
fn browsed_library(fixture: &Fixture) -> Library {
    let library = Library::new(&fixture.root, fixture.registry());
    library.home(ScanMode::Cached).unwrap();
    library.open_directory("programming").unwrap();
    library
}

#[test]
fn directory_view_lists_children_with_breadcrumbs() {
    let fixture = Fixture::new();
    let library = Library::new(&fixture.root, fixture.registry());
    library.home(ScanMode::Cached).unwrap();

    let view = library.open_directory("programming").unwrap();
    assert_eq!(view.title, "Programming");
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].id, "rust-basics");
    assert_eq!(view.items[0].title, "Rust Basics");

    let titles: Vec<&str> = view.breadcrumbs.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Home", "Programming"]);
    assert_eq!(view.breadcrumbs[0].url.as_deref(), Some("/"));
    assert_eq!(view.breadcrumbs[1].url, None);
}

#[test]
fn course_breadcrumbs_link_registered_ancestors() {
    let fixture = Fixture::new();
    let library = browsed_library(&fixture);

    let view = library.open_course("rust-basics").unwrap();
    let crumbs: Vec<(&str, Option<&str>)> = view
        .breadcrumbs
        .iter()
        .map(|c| (c.title.as_str(), c.url.as_deref()))
        .collect();
    assert_eq!(
        crumbs,
        vec![
            ("Home", Some("/")),
            ("Programming", Some("/directory/programming")),
            ("Rust Basics", None),
        ]
    );
}

#[test]
fn course_view_overlays_progress_and_refreshes_metadata() {
    let fixture = Fixture::new();
    let library = browsed_library(&fixture);
    let progress = ProgressStore::for_course(&fixture.course_path());
    progress.mark_completed("01 Getting Started/01 intro.mp4").unwrap();
    progress.mark_completed("01 Getting Started/02 setup.mp4").unwrap();
    progress.mark_completed("welcome.pdf").unwrap();
    progress.update_position("02 Ownership/01 moves.mp4", 30.0).unwrap();

    let view = library.open_course("rust-basics").unwrap();
    let structure = &view.structure;
    assert!(structure.modules[0].completed());
    assert!(!structure.modules[1].completed());
    assert!(structure.lessons[0].completed);

    assert_eq!(view.stats.total, 4);
    assert_eq!(view.stats.completed, 3);
    assert_eq!(view.stats.percentage, 75.0);

    assert_eq!(structure.metadata.total_modules, 2);
    assert_eq!(structure.metadata.total_lessons, 6);
    let stored = CourseMetadataStore::for_course(&fixture.course_path())
        .load()
        .unwrap()
        .unwrap();
    assert_eq!(stored.title, "Rust Basics");
    assert_eq!(stored.total_lessons, 6);
    assert_eq!(
        stored.total_media_duration_seconds,
        structure.metadata.total_media_duration_seconds
    );
    assert!(fixture.course_path().join(METADATA_FILENAME).exists());
}

#[test]
fn unknown_or_vanished_course_is_not_found() {
    let fixture = Fixture::new();
    let library = browsed_library(&fixture);
    assert!(matches!(
        library.open_course("nope"),
        Err(LibraryError::NotFound(_))
    ));

    fs::remove_dir_all(fixture.course_path()).unwrap();
    assert!(matches!(
        library.open_course("rust-basics"),
        Err(LibraryError::NotFound(_))
    ));
}

#[test]
fn lesson_view_inside_a_module() {
    let fixture = Fixture::new();
    let library = browsed_library(&fixture);
    ProgressStore::for_course(&fixture.course_path())
        .update_position("02 Ownership/10 borrowing.mp4", 12.5)
        .unwrap();

    let view = library
        .open_lesson("rust-basics", "02 Ownership/10 borrowing.mp4")
        .unwrap();
    assert_eq!(view.title, "borrowing");
    assert_eq!(view.lesson_path, "02 Ownership/10 borrowing.mp4");
    assert_eq!(view.progress.unwrap().last_position_seconds, 12.5);

    let crumbs: Vec<(&str, Option<&str>)> = view
        .breadcrumbs
        .iter()
        .map(|c| (c.title.as_str(), c.url.as_deref()))
        .collect();
    assert_eq!(
        crumbs,
        vec![
            ("Home", Some("/")),
            ("Programming", Some("/directory/programming")),
            ("Rust Basics", Some("/course/rust-basics")),
            ("Ownership", None),
            ("borrowing", None),
        ]
    );
}

#[test]
fn lesson_view_at_course_root_has_no_module_crumb() {
    let fixture = Fixture::new();
    let library = browsed_library(&fixture);
    let view = library.open_lesson("rust-basics", "welcome.pdf").unwrap();
    assert_eq!(view.title, "welcome");
    assert!(view.progress.is_none());
    assert_eq!(view.breadcrumbs.len(), 4);
    assert_eq!(view.breadcrumbs[3].title, "welcome");
}

#[test]
fn lesson_paths_cannot_escape_the_course() {
    let fixture = Fixture::new();
    let library = browsed_library(&fixture);
    fs::write(fixture.root.join("programming").join("secret.mp4"), b"").unwrap();

    assert!(matches!(
        library.open_lesson("rust-basics", "../secret.mp4"),
        Err(LibraryError::InvalidPath(_))
    ));
    assert!(matches!(
        library.open_lesson("rust-basics", "/etc/passwd"),
        Err(LibraryError::InvalidPath(_))
    ));
    assert!(matches!(
        library.open_lesson("rust-basics", "02 Ownership/missing.mp4"),
        Err(LibraryError::NotFound(_))
    ));
}

#[test]
fn media_resolution_stays_inside_the_entry() {
    let fixture = Fixture::new();
    let library = Library::new(&fixture.root, fixture.registry());
    fs::write(fixture.root.join("music_theory/cover.jpg"), b"").unwrap();
    library.home(ScanMode::Cached).unwrap();

    let path = library
        .resolve_media(RegistrySection::Courses, "music_theory", "cover.jpg")
        .unwrap();
    assert!(path.ends_with("music_theory/cover.jpg"));

    assert!(library
        .resolve_media(RegistrySection::Courses, "music_theory", "../programming")
        .is_err());
    assert!(matches!(
        library.resolve_media(RegistrySection::Directories, "music_theory", "cover.jpg"),
        Err(LibraryError::NotFound(_))
    ));
}

#[test]
fn home_requires_an_existing_root() {
    let fixture = Fixture::new();
    let library = Library::new(fixture.root.join("missing"), fixture.registry());
    assert!(matches!(
        library.home(ScanMode::Cached),
        Err(LibraryError::NotFound(_))
    ));
}
