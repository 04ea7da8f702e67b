//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every listed entity (category, group, section, file) leads with its
//! positional index and display name; filenames and paths follow as
//! indented `Source:` context lines. The output reads as a content
//! inventory while still pointing back at the files behind it.
//!
//! # Output Format
//!
//! ## Build progress
//!
//! ```text
//! ✓ Lessons: Markup (Semester 1): 14 files
//! warning: directory not found: ./assets/semester-2/assignments
//! ✓ Assignments: JavaScript (Semester 2): 0 files
//!
//! ✓ Index saved to ./index.json
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 Lessons: Markup (Semester 1) (2 files)
//!     semester1-lessons
//!     001 Lesson 1: Introduction to HTML
//!         Source: assets/semester-1/lessons/lesson_1.md
//!
//! 6 categories, 14 files
//! ```
//!
//! ## Browse
//!
//! ```text
//! 001 Semester 1: Markup
//!     Videos: https://rutube.ru/plst/877516/
//!     001 Lessons (2 files)
//!         001 Lesson 1: Introduction to HTML
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns lines) for testability and
//! a `print_*` wrapper that writes them out. Format functions are pure: no
//! I/O, no side effects. Warnings go to stderr, everything else to stdout.

use crate::browser::{ContentBody, EMPTY_SECTION_NOTICE, Library, View};
use crate::scan::ScanEvent;
use crate::types::Manifest;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

const INDENT: &str = "    ";

/// 1-based position, zero-padded to three digits.
fn ordinal(pos: usize) -> String {
    format!("{pos:03}")
}

fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}

fn link_line(depth: usize, link: &str) -> String {
    format!("{}Videos: {}", indent(depth), link)
}

/// Format an entity header: positional index + name, with optional file count.
///
/// ```text
/// 001 Lessons (14 files)
/// 001 Semester 1: Markup
/// ```
fn entity_header(index: usize, name: &str, count: Option<usize>) -> String {
    match count {
        Some(1) => format!("{} {} (1 file)", ordinal(index), name),
        Some(n) => format!("{} {} ({} files)", ordinal(index), name, n),
        None => format!("{} {}", ordinal(index), name),
    }
}

fn plural_files(n: usize) -> &'static str {
    if n == 1 { "file" } else { "files" }
}

// ============================================================================
// Build progress
// ============================================================================

/// One progress or warning line for a scan event.
pub fn format_scan_event(event: &ScanEvent) -> String {
    match event {
        ScanEvent::CategoryScanned { name, count, .. } => {
            format!("\u{2713} {}: {} {}", name, count, plural_files(*count))
        }
        ScanEvent::DirectoryMissing { dir, .. } => {
            format!("warning: directory not found: {}", dir.display())
        }
    }
}

/// Print a scan event: progress to stdout, warnings to stderr.
pub fn print_scan_event(event: &ScanEvent) {
    let line = format_scan_event(event);
    match event {
        ScanEvent::DirectoryMissing { .. } => eprintln!("{}", line),
        ScanEvent::CategoryScanned { .. } => println!("{}", line),
    }
}

/// Closing lines after the manifest has been written.
pub fn format_saved(path: &Path) -> Vec<String> {
    vec![
        String::new(),
        format!("\u{2713} Index saved to {}", path.display()),
    ]
}

pub fn print_saved(path: &Path) {
    for line in format_saved(path) {
        println!("{}", line);
    }
}

// ============================================================================
// Check: manifest inventory
// ============================================================================

/// Format a built manifest as a category → file inventory.
pub fn format_manifest_summary(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, (id, category)) in manifest.iter().enumerate() {
        lines.push(entity_header(
            i + 1,
            &category.name,
            Some(category.items.len()),
        ));
        lines.push(format!("{}{}", indent(1), id));
        for (j, item) in category.items.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), ordinal(j + 1), item.name));
            lines.push(format!("{}Source: {}", indent(2), item.path));
        }
    }

    let files = manifest.file_count();
    lines.push(String::new());
    lines.push(format!(
        "{} {}, {} {}",
        manifest.len(),
        if manifest.len() == 1 { "category" } else { "categories" },
        files,
        plural_files(files)
    ));
    lines
}

pub fn print_manifest_summary(manifest: &Manifest) {
    for line in format_manifest_summary(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Browse: library tree
// ============================================================================

/// Format the grouped library as group → section → file.
pub fn format_library(library: &Library) -> Vec<String> {
    if library.is_empty() {
        return vec!["No categories.".to_string()];
    }

    let mut lines = Vec::new();
    for (i, group) in library.groups().iter().enumerate() {
        lines.push(entity_header(i + 1, &group.name, None));
        if let Some(link) = &group.link {
            lines.push(link_line(1, link));
        }
        for (j, section) in group.sections.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                indent(1),
                entity_header(j + 1, section.label(), Some(section.items.len()))
            ));
            if section.items.is_empty() {
                lines.push(format!("{}{}", indent(2), EMPTY_SECTION_NOTICE));
            }
            for (k, item) in section.items.iter().enumerate() {
                lines.push(format!("{}{}", indent(2), entity_header(k + 1, &item.name, None)));
            }
        }
    }
    lines
}

pub fn print_library(library: &Library) {
    for line in format_library(library) {
        println!("{}", line);
    }
}

// ============================================================================
// Read: a single screen
// ============================================================================

/// Format a screen view: title, numbered entries, notice, then the body.
pub fn format_view(view: &View) -> Vec<String> {
    let mut lines = vec![view.title.clone()];
    for (i, entry) in view.entries.iter().enumerate() {
        lines.push(format!("{}{}", indent(1), entity_header(i + 1, entry, None)));
    }
    if let Some(link) = &view.link {
        lines.push(link_line(1, link));
    }
    if let Some(notice) = view.notice {
        lines.push(format!("{}{}", indent(1), notice));
    }
    match &view.body {
        Some(ContentBody::Html(html)) => {
            lines.push(String::new());
            lines.extend(html.lines().map(str::to_string));
        }
        Some(ContentBody::Error(message)) => {
            lines.push(String::new());
            lines.push(format!("error: {}", message));
        }
        None => {}
    }
    lines
}

pub fn print_view(view: &View) {
    for line in format_view(view) {
        println!("{}", line);
    }
}
