use crate::integration::support::Fixture;
use learnsphere::content::FailureKind;
use learnsphere::listing::DirectoryListing;
use learnsphere::progress::{ProgressStore, PROGRESS_FILENAME};
use learnsphere::registry::RegistrySection;
use learnsphere::{NodeType, ScanMode};
use std::fs;
use std::path::{Path, PathBuf};

#[test]
fn first_scan_classifies_and_registers() {
    let fixture = Fixture::new();
    let registry = fixture.registry();
    let scanned = DirectoryListing::new(&registry)
        .scan(&fixture.root, ScanMode::Cached)
        .unwrap();

    let ids: Vec<&str> = scanned.value.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["music_theory", "programming"]);
    assert!(scanned.value.iter().all(|i| !i.cached));
    assert_eq!(scanned.value[0].title, "Music Theory");
    assert_eq!(scanned.value[0].node_type, NodeType::Module);
    assert_eq!(scanned.value[1].node_type, NodeType::Directory);

    let document = registry.load().unwrap();
    assert_eq!(document.directories.len(), 1);
    assert_eq!(document.courses.len(), 1);
    assert!(fixture.registry_path.exists());
}

#[test]
fn second_scan_uses_registry_until_forced() {
    let fixture = Fixture::new();
    let registry = fixture.registry();
    let listing = DirectoryListing::new(&registry);
    listing.scan(&fixture.root, ScanMode::Cached).unwrap();

    // Turn the directory into a module on disk; the cache still says directory.
    let programming = fixture.root.join("programming");
    fs::remove_dir_all(programming.join("rust-basics")).unwrap();
    fs::write(programming.join("lecture.mp4"), b"").unwrap();

    let cached = listing.scan(&fixture.root, ScanMode::Cached).unwrap();
    let item = cached.value.iter().find(|i| i.id == "programming").unwrap();
    assert!(item.cached);
    assert_eq!(item.node_type, NodeType::Directory);

    let refreshed = listing.scan(&fixture.root, ScanMode::ForceRefresh).unwrap();
    let item = refreshed.value.iter().find(|i| i.id == "programming").unwrap();
    assert!(!item.cached);
    assert_eq!(item.node_type, NodeType::Module);

    let document = registry.load().unwrap();
    assert!(document.directories.is_empty());
    assert_eq!(document.courses.len(), 2);
}

#[test]
fn listing_reports_images_and_progress() {
    let fixture = Fixture::new();
    let music = fixture.root.join("music_theory");
    fs::write(music.join("z-photo.png"), b"").unwrap();
    fs::write(music.join("cover.jpg"), b"").unwrap();
    ProgressStore::for_course(&music)
        .mark_completed("scales.mp3")
        .unwrap();
    ProgressStore::for_course(&music)
        .mark_incomplete("other.mp3")
        .unwrap();

    let registry = fixture.registry();
    let scanned = DirectoryListing::new(&registry)
        .scan(&fixture.root, ScanMode::Cached)
        .unwrap();
    let item = scanned.value.iter().find(|i| i.id == "music_theory").unwrap();
    assert_eq!(
        item.image_url.as_deref(),
        Some("/media/course/music_theory/cover.jpg")
    );
    assert_eq!(item.progress_percent, 50.0);

    let programming = scanned.value.iter().find(|i| i.id == "programming").unwrap();
    assert_eq!(programming.image_url, None);
    assert_eq!(programming.progress_percent, 0.0);
}

#[test]
fn resolve_by_id_after_scan() {
    let fixture = Fixture::new();
    let registry = fixture.registry();
    DirectoryListing::new(&registry)
        .scan(&fixture.root, ScanMode::Cached)
        .unwrap();

    let entry = registry
        .resolve_by_id("programming", RegistrySection::Directories)
        .unwrap()
        .unwrap();
    assert_eq!(entry.title, "Programming");
    assert!(registry
        .resolve_by_id("programming", RegistrySection::Courses)
        .unwrap()
        .is_none());
}

#[test]
fn missing_root_is_a_degraded_empty_listing() {
    let fixture = Fixture::new();
    let registry = fixture.registry();
    let scanned = DirectoryListing::new(&registry)
        .scan(&fixture.root.join("nope"), ScanMode::Cached)
        .unwrap();
    assert!(scanned.value.is_empty());
    assert!(scanned.is_degraded());
}

#[test]
fn relative_root_spellings_register_one_absolute_entry_per_folder() {
    let fixture = Fixture::new();
    let registry = fixture.registry();
    let listing = DirectoryListing::new(&registry);

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(fixture.root.parent().unwrap()).unwrap();
    let first = listing.scan(Path::new("library"), ScanMode::Cached);
    let second = listing.scan(Path::new("./library"), ScanMode::Cached);
    std::env::set_current_dir(previous).unwrap();

    assert!(first.unwrap().value.iter().all(|i| i.path.is_absolute()));
    let second = second.unwrap();
    assert!(second.value.iter().all(|i| i.cached));

    let document = registry.load().unwrap();
    assert_eq!(document.len(), 2);
    assert!(document
        .all_entries()
        .all(|entry| Path::new(&entry.path).is_absolute()));

    let entry = registry
        .require_by_id("programming", RegistrySection::Directories)
        .unwrap();
    assert_eq!(PathBuf::from(&entry.path), fixture.root.join("programming"));
}

#[test]
fn unreadable_progress_is_reported_next_to_the_item() {
    let fixture = Fixture::new();
    let music = fixture.root.join("music_theory");
    // A directory where the progress file should be cannot be read as one.
    fs::create_dir(music.join(PROGRESS_FILENAME)).unwrap();

    let registry = fixture.registry();
    let scanned = DirectoryListing::new(&registry)
        .scan(&fixture.root, ScanMode::Cached)
        .unwrap();
    let item = scanned.value.iter().find(|i| i.id == "music_theory").unwrap();
    assert_eq!(item.progress_percent, 0.0);

    assert_eq!(scanned.failures.len(), 1);
    assert_eq!(scanned.failures[0].path, music.join(PROGRESS_FILENAME));
    assert_eq!(scanned.failures[0].kind, FailureKind::Unreadable);
}
