//! Manifest wire types shared by the builder and the browser.
//!
//! The JSON shape is the contract with the browsing client:
//!
//! ```json
//! {
//!   "semester1-lessons": {
//!     "name": "Lessons: Markup (Semester 1)",
//!     "items": [
//!       { "name": "Lesson 1", "file": "lesson_1.md", "path": "assets/semester-1/lessons/lesson_1.md" }
//!     ]
//!   }
//! }
//! ```
//!
//! Keys appear in catalog order, so [`Manifest`] keeps its categories in a
//! `Vec` and (de)serializes it as a JSON object by hand instead of going
//! through a sorted or hashed map.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One markdown file as the browser sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Display name (never empty).
    pub name: String,
    /// Source filename, e.g. `lesson_1.md`.
    pub file: String,
    /// Root-relative, `/`-separated path usable as a URL.
    pub path: String,
}

/// A category's display name and its ordered files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryManifest {
    pub name: String,
    #[serde(default)]
    pub items: Vec<FileEntry>,
}

/// Category identifier → [`CategoryManifest`], in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    categories: Vec<(String, CategoryManifest)>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a category. Replacing keeps the original position.
    pub fn insert(&mut self, id: impl Into<String>, category: CategoryManifest) {
        let id = id.into();
        match self.categories.iter_mut().find(|(k, _)| *k == id) {
            Some((_, existing)) => *existing = category,
            None => self.categories.push((id, category)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&CategoryManifest> {
        self.categories
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, c)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryManifest)> {
        self.categories.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of files across all categories.
    pub fn file_count(&self) -> usize {
        self.categories.iter().map(|(_, c)| c.items.len()).sum()
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (id, category) in &self.categories {
            map.serialize_entry(id, category)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ManifestVisitor;

        impl<'de> Visitor<'de> for ManifestVisitor {
            type Value = Manifest;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category id to category")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Manifest, A::Error> {
                let mut manifest = Manifest::new();
                while let Some((id, category)) = access.next_entry::<String, CategoryManifest>()? {
                    manifest.insert(id, category);
                }
                Ok(manifest)
            }
        }

        deserializer.deserialize_map(ManifestVisitor)
    }
}

impl FromIterator<(String, CategoryManifest)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (String, CategoryManifest)>>(iter: I) -> Self {
        let mut manifest = Manifest::new();
        for (id, category) in iter {
            manifest.insert(id, category);
        }
        manifest
    }
}
