use learnsphere::Registry;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"").unwrap();
}

/// A library root laid out as:
///
/// ```text
/// root/
///   programming/            directory
///     rust-basics/          course
///       welcome.pdf
///       01 Getting Started/ 01 intro.mp4, 02 setup.mp4
///       02 Ownership/       01 moves.mp4, 10 borrowing.mp4, 2 slices.mp4
///   music_theory/           module-like folder with one lesson
///     scales.mp3
///   .hidden/                skipped
/// ```
pub struct Fixture {
    pub temp: TempDir,
    pub root: PathBuf,
    pub registry_path: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = dunce::canonicalize(temp.path()).unwrap().join("library");
        let course = root.join("programming").join("rust-basics");
        touch(&course.join("welcome.pdf"));
        touch(&course.join("01 Getting Started/01 intro.mp4"));
        touch(&course.join("01 Getting Started/02 setup.mp4"));
        touch(&course.join("02 Ownership/01 moves.mp4"));
        touch(&course.join("02 Ownership/10 borrowing.mp4"));
        touch(&course.join("02 Ownership/2 slices.mp4"));
        touch(&root.join("music_theory/scales.mp3"));
        touch(&root.join(".hidden/secret.mp4"));
        let registry_path = temp.path().join("state").join("registry.json");
        Self {
            temp,
            root,
            registry_path,
        }
    }

    pub fn registry(&self) -> Registry {
        Registry::open(&self.registry_path)
    }

    pub fn course_path(&self) -> PathBuf {
        self.root.join("programming").join("rust-basics")
    }
}
