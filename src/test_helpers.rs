//! Shared test utilities for the course-index test suite.
//!
//! Provides fixture setup, ad-hoc directory trees, and lookups over the
//! builder's output types.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = build_stock(tmp.path());
//!
//! let exam = find_category(&manifest, "semester2-exam");
//! assert_eq!(item_files(exam), vec!["tickets.md", "final_project.md", "extra.md"]);
//! ```

use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::catalog::Catalog;
use crate::scan::{ScanEvent, build_manifest};
use crate::types::{CategoryManifest, Manifest};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/course/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/course");
    for entry in WalkDir::new(&fixtures).min_depth(1) {
        let entry = entry.unwrap();
        let dst = tmp.path().join(entry.path().strip_prefix(&fixtures).unwrap());
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dst).unwrap();
        } else {
            std::fs::copy(entry.path(), &dst).unwrap();
        }
    }
    tmp
}

/// Create empty-ish files at the given root-relative paths.
pub fn write_files(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, format!("# {file}\n")).unwrap();
    }
}

/// The stock catalog pointed at `root`.
pub fn stock_catalog(root: &Path) -> Catalog {
    let mut catalog = Catalog::stock().unwrap();
    catalog.root = root.to_path_buf();
    catalog
}

/// Build the stock catalog against `root`, discarding events.
pub fn build_stock(root: &Path) -> Manifest {
    build_manifest(&stock_catalog(root), &mut |_: &ScanEvent| {}).unwrap()
}

/// Build `catalog` and return the manifest together with every event emitted.
pub fn build_collecting(catalog: &Catalog) -> (Manifest, Vec<ScanEvent>) {
    let mut events = Vec::new();
    let manifest = build_manifest(catalog, &mut |e: &ScanEvent| events.push(e.clone())).unwrap();
    (manifest, events)
}

// =========================================================================
// Manifest lookups; panic with a clear message on miss
// =========================================================================

/// Find a category by id. Panics if not found.
pub fn find_category<'a>(manifest: &'a Manifest, id: &str) -> &'a CategoryManifest {
    manifest.get(id).unwrap_or_else(|| {
        let ids: Vec<&str> = manifest.ids().collect();
        panic!("category '{id}' not found. Available: {ids:?}")
    })
}

/// Source filenames in manifest order.
pub fn item_files(category: &CategoryManifest) -> Vec<&str> {
    category.items.iter().map(|i| i.file.as_str()).collect()
}

/// Display names in manifest order.
pub fn item_names(category: &CategoryManifest) -> Vec<&str> {
    category.items.iter().map(|i| i.name.as_str()).collect()
}
