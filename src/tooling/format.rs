//! Format registry, listing, course and progress reports as text.

use crate::content::ScanFailure;
use crate::library::CourseView;
use crate::listing::LibraryItem;
use crate::progress::ProgressRecord;
use crate::registry::{RegistryDocument, RegistryEntry, RegistrySection};
use chrono::{DateTime, Utc};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// `1h 05m`, `12m 30s` or `45s`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

fn entries_table(entries: &[&RegistryEntry]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Title", "Id", "Path", "Registered", "Last accessed"]);
    for entry in entries {
        table.add_row(vec![
            entry.title.clone(),
            entry.id().to_string(),
            entry.path.clone(),
            timestamp(&entry.registered_at),
            timestamp(&entry.last_accessed),
        ]);
    }
    table.to_string()
}

/// Both registry sections with a summary line.
pub fn format_registry_text(document: &RegistryDocument, location: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", format_section_heading("Registry")));
    out.push_str(&format!("  Location: {}\n", location));
    if let Some(updated) = &document.metadata.last_updated {
        out.push_str(&format!("  Last updated: {}\n", timestamp(updated)));
    }
    out.push('\n');

    for (section, heading) in [
        (RegistrySection::Directories, "Directories"),
        (RegistrySection::Courses, "Courses"),
    ] {
        let entries: Vec<&RegistryEntry> = document.section(section).values().collect();
        out.push_str(&format!(
            "{} ({})\n",
            format_section_heading(heading),
            entries.len()
        ));
        if entries.is_empty() {
            out.push_str("  (none)\n\n");
        } else {
            out.push_str(&entries_table(&entries));
            out.push_str("\n\n");
        }
    }

    out.push_str(&format!(
        "Total: {} directories, {} courses",
        document.directories.len(),
        document.courses.len()
    ));
    out
}

/// Listing produced by a scan, followed by any skipped folders.
pub fn format_listing_text(items: &[LibraryItem], failures: &[ScanFailure]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", format_section_heading("Library")));
    if items.is_empty() {
        out.push_str("  (no folders found)\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Title", "Id", "Type", "Progress", "Source"]);
        for item in items {
            table.add_row(vec![
                item.title.clone(),
                item.id.clone(),
                item.node_type.to_string(),
                format!("{:.0}%", item.progress_percent),
                if item.cached { "registry" } else { "scanned" }.to_string(),
            ]);
        }
        out.push_str(&table.to_string());
        out.push('\n');
    }
    out.push_str(&format_failures(failures));
    out
}

pub fn format_failures(failures: &[ScanFailure]) -> String {
    let mut out = String::new();
    if failures.is_empty() {
        return out;
    }
    out.push_str(&format!(
        "\n{}\n",
        format_section_heading("Skipped").yellow()
    ));
    for failure in failures {
        out.push_str(&format!("  {}\n", failure));
    }
    out
}

/// Course tree with completion marks.
pub fn format_course_text(view: &CourseView) -> String {
    let structure = &view.structure;
    let mut out = String::new();
    out.push_str(&format!("{}\n", format_section_heading(&view.title)));
    if !structure.metadata.description.is_empty() {
        out.push_str(&format!("  {}\n", structure.metadata.description));
    }
    out.push_str(&format!(
        "  Modules: {}  Lessons: {}  Duration: {}\n",
        structure.metadata.total_modules,
        structure.metadata.total_lessons,
        format_duration(structure.metadata.total_media_duration_seconds)
    ));
    out.push_str(&format!(
        "  Progress: {}/{} ({:.2}%)\n",
        view.stats.completed, view.stats.total, view.stats.percentage
    ));
    let trail: Vec<&str> = view.breadcrumbs.iter().map(|c| c.title.as_str()).collect();
    out.push_str(&format!("  Path: {}\n", trail.join(" / ")));

    let mark = |completed: bool| {
        if completed {
            format!("{}", "✓".green())
        } else {
            " ".to_string()
        }
    };

    if !structure.lessons.is_empty() {
        out.push('\n');
        for lesson in &structure.lessons {
            out.push_str(&format!(
                "  [{}] {} ({})\n",
                mark(lesson.completed),
                lesson.title,
                format_duration(lesson.duration_seconds)
            ));
        }
    }
    for module in &structure.modules {
        out.push_str(&format!(
            "\n{} {}. {} ({})\n",
            mark(module.completed()),
            module.ordinal,
            module.title.bold(),
            format_duration(module.total_duration_seconds)
        ));
        for lesson in &module.lessons {
            out.push_str(&format!(
                "    [{}] {} ({})\n",
                mark(lesson.completed),
                lesson.title,
                format_duration(lesson.duration_seconds)
            ));
        }
    }
    out.push_str(&format_failures(&view.failures));
    out
}

pub fn format_progress_text(course_id: &str, record: &ProgressRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format_section_heading(&format!("Progress: {}", course_id))
    ));
    if record.lessons.is_empty() {
        out.push_str("  No lessons recorded yet.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Lesson", "Completed", "Position", "Last accessed"]);
    for (path, state) in &record.lessons {
        table.add_row(vec![
            path.clone(),
            if state.completed { "yes" } else { "no" }.to_string(),
            format_duration(state.last_position_seconds.max(0.0) as u64),
            state
                .last_accessed_at
                .as_ref()
                .map(timestamp)
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    out.push_str(&table.to_string());
    let stats = record.stats();
    out.push_str(&format!(
        "\n{}/{} completed ({:.2}%)\n",
        stats.completed, stats.total, stats.percentage
    ));
    out
}
