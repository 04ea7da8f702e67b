//! # Course Index
//!
//! Builds the file manifest behind a static course-materials site, and
//! navigates it the way the site does.
//!
//! # Architecture: Build Once, Browse Read-Only
//!
//! ```text
//! 1. Build   catalog + assets/  →  index.json   (directory scan → manifest)
//! 2. Browse  index.json         →  screens      (semester → section → file → content)
//! ```
//!
//! The build step walks every category directory named in the catalog,
//! keeps the markdown files, orders and names them, and writes one JSON
//! manifest. The browser loads that manifest at startup and never writes
//! back. The manifest is the only contract between the two, so either side
//! can be replaced as long as the JSON shape in [`types`] is kept.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Category configuration: embedded stock catalog, TOML loading, validation |
//! | [`naming`] | Pure filename helpers: embedded numbers, naming patterns, display-name precedence |
//! | [`order`] | Explicit-list and numeric file ordering |
//! | [`paths`] | Root-relative, `/`-separated manifest paths |
//! | [`types`] | Manifest wire types (`FileEntry`, `CategoryManifest`, `Manifest`) |
//! | [`scan`] | The build step: per-category scans, manifest assembly, manifest I/O |
//! | [`browser`] | Manifest grouping, navigation state machine, document loading |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Missing Directories Degrade, Everything Else Aborts
//!
//! A category whose directory doesn't exist yet (a semester not started,
//! say) yields an empty list and a warning. Any other filesystem error
//! stops the build: a half-readable tree would produce a manifest that
//! silently drops files.
//!
//! ## Deterministic Output
//!
//! Files are discovered in filename order, sorts are stable, and manifest
//! keys follow catalog order. Rebuilding an unchanged tree rewrites the same
//! bytes, so the manifest can be committed and diffed.
//!
//! ## Navigation as a Value
//!
//! The browser's "current semester / current section" selection lives in a
//! [`browser::Screen`] value rather than in mutable globals. A transition is
//! `(screen, action) → screen`, which is what the tests exercise.

pub mod browser;
pub mod catalog;
pub mod naming;
pub mod order;
pub mod output;
pub mod paths;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
