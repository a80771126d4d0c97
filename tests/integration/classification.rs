use crate::integration::support::{touch, Fixture};
use learnsphere::content::{ContentClassifier, TreeScanner};
use learnsphere::{LessonType, NodeType};
use std::fs;
use tempfile::TempDir;

#[test]
fn fixture_folders_classify_by_shape() {
    let fixture = Fixture::new();
    let classifier = ContentClassifier::new();
    assert_eq!(classifier.classify(&fixture.course_path()), NodeType::Course);
    assert_eq!(
        classifier.classify(&fixture.root.join("programming")),
        NodeType::Directory
    );
    assert_eq!(
        classifier.classify(&fixture.root.join("music_theory")),
        NodeType::Module
    );
    assert_eq!(
        classifier.classify(&fixture.root.join("does-not-exist")),
        NodeType::Directory
    );
}

#[test]
fn one_non_module_subdirectory_demotes_a_course() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("01 Basics/a.mp4"));
    fs::create_dir_all(temp.path().join("resources")).unwrap();
    touch(&temp.path().join("resources/readme.md"));
    assert_eq!(
        ContentClassifier::new().classify(temp.path()),
        NodeType::Directory
    );
}

#[test]
fn hidden_subdirectories_do_not_affect_classification() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("01 Basics/a.mp4"));
    touch(&temp.path().join(".git/config"));
    assert_eq!(ContentClassifier::new().classify(temp.path()), NodeType::Course);
}

#[test]
fn course_tree_is_naturally_ordered() {
    let fixture = Fixture::new();
    let scanner = TreeScanner::new();
    let scanned = scanner.scan_modules(&fixture.course_path());
    assert!(!scanned.is_degraded());

    let modules = scanned.value;
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[0].title, "Getting Started");
    assert_eq!(modules[0].ordinal, 1);
    assert_eq!(modules[1].title, "Ownership");

    let titles: Vec<&str> = modules[1].lessons.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["moves", "slices", "borrowing"]);
    assert_eq!(modules[1].lessons[0].file_path, "02 Ownership/01 moves.mp4");
    assert_eq!(
        modules[1].total_duration_seconds,
        modules[1].lessons.iter().map(|l| l.duration_seconds).sum::<u64>()
    );

    let root_lessons = scanner.scan_root_lessons(&fixture.course_path()).value;
    assert_eq!(root_lessons.len(), 1);
    assert_eq!(root_lessons[0].file_path, "welcome.pdf");
    assert_eq!(root_lessons[0].lesson_type, LessonType::Text);
    assert_eq!(root_lessons[0].duration_seconds, 0);
}
