//! Course catalog: which directories become which manifest categories.
//!
//! The stock catalog is compiled into the binary from `static/catalog.toml`,
//! so a bare `course-index` run needs no configuration file. A different
//! catalog can be supplied with `--catalog`; it replaces the stock one
//! wholesale.
//!
//! ## Format
//!
//! ```toml
//! root = "."               # Project root; category dirs and paths are relative to it
//! output = "index.json"    # Manifest location, relative to root
//!
//! [[groups]]
//! id = "semester1"
//! name = "Semester 1: Markup"
//! link = "https://rutube.ru/plst/877516/"   # Optional video playlist
//!
//! [[categories]]
//! id = "semester1-exam"            # `<group>-<section>`
//! name = "Exam: Markup (Semester 1)"
//! dir = "assets/semester-1/exam"
//! order = ["tickets.md"]           # Optional explicit order
//!
//! [categories.names]               # Optional display-name overrides
//! "tickets.md" = "Exam tickets"
//!
//! [categories.pattern]             # Optional prefix-number naming
//! prefix = "ticket"
//! format = "Ticket {n}"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming::{NUMBER_PLACEHOLDER, NamePattern};
use crate::order::SortPolicy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Catalog validation error: {0}")]
    Validation(String),
}

const STOCK_CATALOG: &str = include_str!("../static/catalog.toml");

/// Full build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    /// Project root. Category directories and manifest paths are relative to it.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Manifest file, relative to `root`.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Display names for the group half of category identifiers.
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
    /// Categories in manifest order.
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_output() -> PathBuf {
    PathBuf::from("index.json")
}

/// Display name and video playlist for a group such as `semester1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// One scanned directory and how to order and name its files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    /// Unique identifier, conventionally `<group>-<section>`.
    pub id: String,
    /// Display name written to the manifest.
    pub name: String,
    /// Source directory, relative to the catalog root.
    pub dir: PathBuf,
    /// Explicit file order. When absent, files sort by embedded number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
    /// Filename → display name overrides.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub names: BTreeMap<String, String>,
    /// Prefix-number naming for files without an override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<NamePattern>,
}

impl CategoryConfig {
    /// Minimal category: numeric order, no overrides, no pattern.
    pub fn new(id: impl Into<String>, name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dir: dir.into(),
            order: None,
            names: BTreeMap::new(),
            pattern: None,
        }
    }

    pub fn sort_policy(&self) -> SortPolicy<'_> {
        SortPolicy::from_order(self.order.as_deref())
    }
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn stock() -> Result<Self, CatalogError> {
        Self::from_toml_str(STOCK_CATALOG)
    }

    /// Parse and validate a catalog document.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load and validate a catalog file.
    ///
    /// A relative `root` inside the file is taken relative to the file's
    /// own directory, so a catalog can be run from anywhere.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let mut catalog = Self::from_toml_str(&content)?;
        if catalog.root.is_relative()
            && let Some(parent) = path.parent()
        {
            catalog.root = parent.join(&catalog.root);
        }
        Ok(catalog)
    }

    /// Check identifiers, names, directories and patterns.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.id.trim().is_empty() {
                return Err(CatalogError::Validation(
                    "category id must not be empty".into(),
                ));
            }
            if !seen.insert(category.id.as_str()) {
                return Err(CatalogError::Validation(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
            if category.name.trim().is_empty() {
                return Err(CatalogError::Validation(format!(
                    "category '{}' has an empty name",
                    category.id
                )));
            }
            if category.dir.as_os_str().is_empty() {
                return Err(CatalogError::Validation(format!(
                    "category '{}' has an empty dir",
                    category.id
                )));
            }
            if let Some(pattern) = &category.pattern {
                if pattern.prefix.is_empty() {
                    return Err(CatalogError::Validation(format!(
                        "category '{}': pattern.prefix must not be empty",
                        category.id
                    )));
                }
                if !pattern.format.contains(NUMBER_PLACEHOLDER) {
                    return Err(CatalogError::Validation(format!(
                        "category '{}': pattern.format must contain {NUMBER_PLACEHOLDER}",
                        category.id
                    )));
                }
            }
        }

        let mut groups = HashSet::new();
        for group in &self.groups {
            if !groups.insert(group.id.as_str()) {
                return Err(CatalogError::Validation(format!(
                    "duplicate group id '{}'",
                    group.id
                )));
            }
        }
        Ok(())
    }

    /// Absolute-or-cwd-relative location of the manifest file.
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output)
    }
}

/// The stock catalog source, for the `gen-catalog` command.
pub fn stock_catalog_toml() -> &'static str {
    STOCK_CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn stock_catalog_is_valid() {
        let catalog = Catalog::stock().unwrap();
        assert_eq!(catalog.categories.len(), 6);
        assert_eq!(catalog.root, PathBuf::from("."));
        assert_eq!(catalog.output, PathBuf::from("index.json"));
    }

    #[test]
    fn stock_catalog_ids_follow_group_section_form() {
        let catalog = Catalog::stock().unwrap();
        let ids: Vec<&str> = catalog.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "semester1-lessons",
                "semester1-assignments",
                "semester1-exam",
                "semester2-lessons",
                "semester2-assignments",
                "semester2-exam",
            ]
        );
    }

    #[test]
    fn stock_exam_has_explicit_order() {
        let catalog = Catalog::stock().unwrap();
        let exam = catalog
            .categories
            .iter()
            .find(|c| c.id == "semester2-exam")
            .unwrap();
        assert_eq!(
            exam.order.as_deref(),
            Some(&["tickets.md".to_string(), "final_project.md".to_string()][..])
        );
        assert!(matches!(exam.sort_policy(), SortPolicy::Explicit(_)));
    }

    #[test]
    fn minimal_catalog_uses_defaults() {
        let catalog = Catalog::from_toml_str(
            r#"
[[categories]]
id = "s1-lessons"
name = "Lessons"
dir = "lessons"
"#,
        )
        .unwrap();
        assert_eq!(catalog.root, PathBuf::from("."));
        assert_eq!(catalog.output_path(), PathBuf::from("./index.json"));
        let category = &catalog.categories[0];
        assert_eq!(category.sort_policy(), SortPolicy::Numeric);
        assert!(category.names.is_empty());
        assert!(category.pattern.is_none());
    }

    #[test]
    fn names_and_pattern_parse() {
        let catalog = Catalog::from_toml_str(
            r#"
[[categories]]
id = "s1-lessons"
name = "Lessons"
dir = "lessons"

[categories.names]
"lesson_1.md" = "Intro"

[categories.pattern]
prefix = "lesson"
format = "Lesson {n}"
"#,
        )
        .unwrap();
        let category = &catalog.categories[0];
        assert_eq!(category.names.get("lesson_1.md").unwrap(), "Intro");
        assert_eq!(category.pattern.as_ref().unwrap().prefix, "lesson");
    }

    #[test]
    fn unknown_key_rejected() {
        let result = Catalog::from_toml_str(
            r#"
[[categories]]
id = "s1-lessons"
name = "Lessons"
dir = "lessons"
sort_order = ["a.md"]
"#,
        );
        assert!(matches!(result, Err(CatalogError::Toml(_))));
    }

    #[test]
    fn duplicate_id_rejected() {
        let result = Catalog::from_toml_str(
            r#"
[[categories]]
id = "s1-lessons"
name = "A"
dir = "a"

[[categories]]
id = "s1-lessons"
name = "B"
dir = "b"
"#,
        );
        assert!(matches!(result, Err(CatalogError::Validation(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn empty_name_rejected() {
        let result = Catalog::from_toml_str(
            r#"
[[categories]]
id = "s1-lessons"
name = " "
dir = "a"
"#,
        );
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn pattern_without_placeholder_rejected() {
        let result = Catalog::from_toml_str(
            r#"
[[categories]]
id = "s1-lessons"
name = "Lessons"
dir = "a"

[categories.pattern]
prefix = "lesson"
format = "Lesson"
"#,
        );
        assert!(matches!(result, Err(CatalogError::Validation(msg)) if msg.contains("{n}")));
    }

    #[test]
    fn invalid_toml_is_error() {
        let result = Catalog::from_toml_str("this is not valid toml [[[");
        assert!(matches!(result, Err(CatalogError::Toml(_))));
    }

    #[test]
    fn load_resolves_root_against_catalog_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.toml");
        fs::write(
            &path,
            r#"
root = "site"

[[categories]]
id = "s1-lessons"
name = "Lessons"
dir = "lessons"
"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.root, tmp.path().join("site"));
        assert_eq!(catalog.output_path(), tmp.path().join("site/index.json"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = Catalog::load(&tmp.path().join("nope.toml"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn stock_groups_have_names_and_links() {
        let groups = Catalog::stock().unwrap().groups;
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].name, "Semester 2: JavaScript");
        assert!(groups.iter().all(|g| g.link.is_some()));
    }

    #[test]
    fn group_link_is_optional() {
        let catalog = Catalog::from_toml_str(
            r#"
[[groups]]
id = "s1"
name = "Semester 1"
"#,
        )
        .unwrap();
        assert!(catalog.groups[0].link.is_none());
    }
}
