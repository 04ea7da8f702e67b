//! Directory scanning and manifest generation.
//!
//! Walks each catalog category's directory, keeps the `.md` files, orders
//! and names them, and assembles the [`Manifest`] the browser reads.
//!
//! ## Directory Structure
//!
//! Categories point at flat directories; subdirectories are not descended
//! into and non-markdown files are ignored:
//!
//! ```text
//! assets/
//! ├── semester-1/
//! │   ├── lessons/             # semester1-lessons
//! │   │   ├── lesson_1.md
//! │   │   ├── lesson_2.md
//! │   │   └── lesson_10.md     # numeric order: 1, 2, 10
//! │   └── exam/                # semester1-exam
//! │       └── tickets.md
//! └── semester-2/
//!     └── ...
//! ```
//!
//! ## Failure Isolation
//!
//! A category whose directory does not exist yields an empty item list and
//! a [`ScanEvent::DirectoryMissing`] warning; the build carries on. Every
//! other filesystem error aborts the build.
//!
//! ## Determinism
//!
//! Files are discovered in filename order before the category's sort policy
//! is applied, and categories are emitted in catalog order. An unchanged
//! tree and catalog therefore produce a byte-identical manifest.

use crate::catalog::{Catalog, CategoryConfig};
use crate::naming::{display_name, is_markdown};
use crate::order::sort_files;
use crate::paths::relative_url;
use crate::types::{CategoryManifest, FileEntry, Manifest};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScanError {
    fn io(path: &Path, source: io::Error) -> Self {
        ScanError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Progress reported while building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A category's directory does not exist; it contributes no items.
    DirectoryMissing { id: String, dir: PathBuf },
    /// A category finished scanning.
    CategoryScanned {
        id: String,
        name: String,
        count: usize,
    },
}

/// Scan one category directory into its manifest entry.
///
/// `root` is the project root that both `config.dir` and the resulting
/// entry paths are relative to.
pub fn scan_category(
    root: &Path,
    config: &CategoryConfig,
    on_event: &mut impl FnMut(&ScanEvent),
) -> Result<CategoryManifest, ScanError> {
    let dir = root.join(&config.dir);

    let items = match list_markdown_files(&dir)? {
        Some(mut files) => {
            sort_files(&mut files, config.sort_policy());
            files
                .into_iter()
                .map(|file| file_entry(root, &dir, config, file))
                .collect::<Result<Vec<_>, _>>()?
        }
        None => {
            on_event(&ScanEvent::DirectoryMissing {
                id: config.id.clone(),
                dir,
            });
            Vec::new()
        }
    };

    on_event(&ScanEvent::CategoryScanned {
        id: config.id.clone(),
        name: config.name.clone(),
        count: items.len(),
    });

    Ok(CategoryManifest {
        name: config.name.clone(),
        items,
    })
}

/// Scan every catalog category, in catalog order.
pub fn build_manifest(
    catalog: &Catalog,
    on_event: &mut impl FnMut(&ScanEvent),
) -> Result<Manifest, ScanError> {
    let mut manifest = Manifest::new();
    for category in &catalog.categories {
        let scanned = scan_category(&catalog.root, category, on_event)?;
        manifest.insert(category.id.clone(), scanned);
    }
    Ok(manifest)
}

/// Write `manifest` as pretty-printed JSON, replacing any existing file.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<(), ScanError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ScanError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(path, json).map_err(|e| ScanError::io(path, e))
}

/// Read a manifest written by [`write_manifest`].
pub fn read_manifest(path: &Path) -> Result<Manifest, ScanError> {
    let content = fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

/// Markdown filenames directly inside `dir`, in filename order.
///
/// Returns `Ok(None)` when `dir` does not exist.
fn list_markdown_files(dir: &Path) -> Result<Option<Vec<String>>, ScanError> {
    match fs::metadata(dir) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ScanError::io(dir, e)),
        Ok(meta) if !meta.is_dir() => return Err(ScanError::NotADirectory(dir.to_path_buf())),
        Ok(_) => {}
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        // Non-UTF-8 names can't be written to the manifest
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if is_markdown(name) {
            files.push(name.to_string());
        }
    }
    Ok(Some(files))
}

fn file_entry(
    root: &Path,
    dir: &Path,
    config: &CategoryConfig,
    file: String,
) -> Result<FileEntry, ScanError> {
    let source = dir.join(&file);
    let path = relative_url(root, &source).map_err(|e| ScanError::io(&source, e))?;
    Ok(FileEntry {
        name: display_name(&file, &config.names, config.pattern.as_ref()),
        file,
        path,
    })
}
