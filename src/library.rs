//! Library facade
//!
//! The entry points a web layer calls: the home listing, directory pages,
//! course pages, lesson pages and media lookups. Each returns plain data;
//! rendering is left to the caller. Unknown ids and vanished folders surface
//! as [`LibraryError::NotFound`].

use crate::content::naming::{lesson_title, module_title};
use crate::content::{find_representative_image, LessonNode, ModuleNode, ScanFailure, Scanned, TreeScanner};
use crate::error::LibraryError;
use crate::listing::{DirectoryListing, LibraryItem, ScanMode};
use crate::metadata::{CourseMetadata, CourseMetadataStore};
use crate::path_guard;
use crate::progress::{CompletionStats, LessonProgress, ProgressRecord, ProgressStore};
use crate::registry::{url_for, Breadcrumb, Registry, RegistryEntry, RegistrySection};
use crate::types::LessonType;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct DirectoryView {
    pub id: String,
    pub title: String,
    pub items: Vec<LibraryItem>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub failures: Vec<ScanFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseStructure {
    pub metadata: CourseMetadata,
    pub modules: Vec<ModuleNode>,
    pub lessons: Vec<LessonNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseView {
    pub id: String,
    pub title: String,
    pub structure: CourseStructure,
    pub stats: CompletionStats,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub failures: Vec<ScanFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LessonView {
    pub course_id: String,
    pub course_title: String,
    pub title: String,
    /// Progress key of the lesson, relative to the course root.
    pub lesson_path: String,
    pub full_path: PathBuf,
    pub lesson_type: Option<LessonType>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub progress: Option<LessonProgress>,
}

pub struct Library {
    root: PathBuf,
    registry: Registry,
    scanner: TreeScanner,
}

impl Library {
    pub fn new(root: impl Into<PathBuf>, registry: Registry) -> Self {
        Self {
            root: root.into(),
            registry,
            scanner: TreeScanner::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Listing of the configured root directory.
    pub fn home(&self, mode: ScanMode) -> Result<Scanned<Vec<LibraryItem>>, LibraryError> {
        if self.root.as_os_str().is_empty() {
            return Err(LibraryError::ConfigError(
                "root_directory is not configured".to_string(),
            ));
        }
        if !self.root.is_dir() {
            return Err(LibraryError::not_found_path("root directory", &self.root));
        }
        DirectoryListing::new(&self.registry).scan(&self.root, mode)
    }

    pub fn open_directory(&self, id: &str) -> Result<DirectoryView, LibraryError> {
        let entry = self.resolve_existing(id, RegistrySection::Directories)?;
        let path = PathBuf::from(&entry.path);
        self.registry.touch(&entry.title, &path, entry.node_type)?;

        let scanned = DirectoryListing::new(&self.registry).scan(&path, ScanMode::Cached)?;
        let breadcrumbs = self.registry.build_breadcrumbs(&path, &entry.title)?;
        Ok(DirectoryView {
            id: entry.id().to_string(),
            title: entry.title,
            items: scanned.value,
            breadcrumbs,
            failures: scanned.failures,
        })
    }

    /// Course page: modules and root lessons with completion overlaid.
    ///
    /// Refreshes the course metadata totals on disk as a side effect.
    pub fn open_course(&self, id: &str) -> Result<CourseView, LibraryError> {
        let entry = self.resolve_existing(id, RegistrySection::Courses)?;
        let path = PathBuf::from(&entry.path);
        self.registry.touch(&entry.title, &path, entry.node_type)?;

        let metadata_store = CourseMetadataStore::for_course(&path);
        let mut metadata = metadata_store.get_or_create(&entry.title)?;

        let modules = self.scanner.scan_modules(&path);
        let lessons = self.scanner.scan_root_lessons(&path);
        let mut failures = modules.failures;
        failures.extend(lessons.failures);
        let mut modules = modules.value;
        let mut lessons = lessons.value;

        let record = ProgressStore::for_course(&path).get()?;
        apply_progress(&mut modules, &mut lessons, &record);

        metadata.total_modules = modules.len();
        metadata.total_lessons =
            modules.iter().map(|m| m.lessons.len()).sum::<usize>() + lessons.len();
        metadata.total_media_duration_seconds = modules
            .iter()
            .map(|m| m.total_duration_seconds)
            .chain(lessons.iter().map(|l| l.duration_seconds))
            .sum();
        metadata.image_path = find_representative_image(&path)
            .and_then(|p| p.file_name().map(|f| f.to_string_lossy().into_owned()));
        metadata_store.save(&mut metadata)?;

        let breadcrumbs = self.registry.build_breadcrumbs(&path, &entry.title)?;
        Ok(CourseView {
            id: entry.id().to_string(),
            title: entry.title,
            structure: CourseStructure {
                metadata,
                modules,
                lessons,
            },
            stats: record.stats(),
            breadcrumbs,
            failures,
        })
    }

    pub fn open_lesson(&self, course_id: &str, lesson_path: &str) -> Result<LessonView, LibraryError> {
        let entry = self.registry.require_by_id(course_id, RegistrySection::Courses)?;
        let course_path = PathBuf::from(&entry.path);
        let full_path = path_guard::resolve(lesson_path, &course_path)?;
        if !full_path.is_file() {
            return Err(LibraryError::not_found_path("lesson", &full_path));
        }

        let canonical_course = dunce::canonicalize(&course_path)?;
        let relative = full_path
            .strip_prefix(&canonical_course)
            .map_err(|_| LibraryError::InvalidPath(lesson_path.to_string()))?;
        let key = progress_key(relative);

        let file_name = relative
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        let title = lesson_title(&file_name);

        let mut breadcrumbs = self.registry.build_breadcrumbs(&course_path, &entry.title)?;
        if let Some(course_crumb) = breadcrumbs.last_mut() {
            course_crumb.url = Some(url_for(entry.node_type, entry.id()));
        }
        if let Some(module_dir) = relative.parent().filter(|p| !p.as_os_str().is_empty()) {
            breadcrumbs.push(Breadcrumb::text(module_title(&module_dir.to_string_lossy())));
        }
        breadcrumbs.push(Breadcrumb::text(title.clone()));

        let progress = ProgressStore::for_course(&course_path).get_lesson(&key)?;
        Ok(LessonView {
            course_id: entry.id().to_string(),
            course_title: entry.title.clone(),
            title,
            lesson_type: LessonType::from_path(&full_path),
            lesson_path: key,
            full_path,
            breadcrumbs,
            progress,
        })
    }

    /// Progress store of a registered course.
    pub fn course_progress(&self, course_id: &str) -> Result<ProgressStore, LibraryError> {
        let entry = self.resolve_existing(course_id, RegistrySection::Courses)?;
        Ok(ProgressStore::for_course(Path::new(&entry.path)))
    }

    /// Resolve a file served from inside a registered directory or course.
    pub fn resolve_media(
        &self,
        section: RegistrySection,
        id: &str,
        relative: &str,
    ) -> Result<PathBuf, LibraryError> {
        let entry = self.registry.require_by_id(id, section)?;
        let full_path = path_guard::resolve(relative, Path::new(&entry.path))?;
        if !full_path.is_file() {
            return Err(LibraryError::not_found_path("file", &full_path));
        }
        Ok(full_path)
    }

    fn resolve_existing(
        &self,
        id: &str,
        section: RegistrySection,
    ) -> Result<RegistryEntry, LibraryError> {
        let entry = self.registry.require_by_id(id, section)?;
        if !Path::new(&entry.path).is_dir() {
            return Err(LibraryError::NotFound(format!(
                "{} no longer exists",
                entry.path
            )));
        }
        Ok(entry)
    }
}

/// Mark lessons completed according to the stored record.
pub fn apply_progress(modules: &mut [ModuleNode], lessons: &mut [LessonNode], record: &ProgressRecord) {
    for lesson in modules
        .iter_mut()
        .flat_map(|m| m.lessons.iter_mut())
        .chain(lessons.iter_mut())
    {
        lesson.completed = record.is_completed(&lesson.file_path);
    }
}

fn progress_key(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
