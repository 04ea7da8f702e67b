//! Content browser: manifest grouping and screen navigation.
//!
//! The browser reads the manifest once and regroups its flat category map
//! into a two-level hierarchy. The first `-`-delimited token of an
//! identifier names the group and the second names the section; any
//! further tokens are ignored:
//!
//! ```text
//! semester1-lessons      →  semester1 / Lessons
//! semester1-exam-retake  →  semester1 / Exam
//! semester2-labs         →  semester2 / Other   (unknown section token)
//! ```
//!
//! Navigation is four screens deep (groups → sections → files → content)
//! and is modelled as an explicit [`Screen`] value. [`Browser::apply`]
//! takes the current screen and an [`Action`] and returns the next screen,
//! so every transition can be tested without a UI. Only [`Action::OpenFile`]
//! does I/O, through a [`DocumentSource`]; a failed read becomes an inline
//! error on the content screen instead of an `Err`.

use crate::catalog::GroupConfig;
use crate::scan::{ScanError, read_manifest};
use crate::types::{FileEntry, Manifest};
use pulldown_cmark::{Options, Parser, html};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Separator between the group and section halves of a category id.
pub const ID_SEPARATOR: char = '-';

/// Shown on a file list with nothing in it.
pub const EMPTY_SECTION_NOTICE: &str = "No files found. Run `course-index` to rebuild the index.";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("cannot read {path}: {source}")]
    Io { path: String, source: io::Error },
}

/// Which bucket a category lands in within its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Lessons,
    Assignments,
    Exam,
    Other,
}

impl SectionKind {
    /// Map the section half of an identifier; anything unrecognized is `Other`.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("lessons") => SectionKind::Lessons,
            Some("assignments") => SectionKind::Assignments,
            Some("exam") => SectionKind::Exam,
            _ => SectionKind::Other,
        }
    }

    /// Identifier token, as used in category ids and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            SectionKind::Lessons => "lessons",
            SectionKind::Assignments => "assignments",
            SectionKind::Exam => "exam",
            SectionKind::Other => "other",
        }
    }

    /// Fixed display label; `None` for `Other`, which shows the category name.
    pub fn label(self) -> Option<&'static str> {
        match self {
            SectionKind::Lessons => Some("Lessons"),
            SectionKind::Assignments => Some("Assignments"),
            SectionKind::Exam => Some("Exam"),
            SectionKind::Other => None,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Split `semester1-lessons` into (`semester1`, `Some("lessons")`).
///
/// Only the second token is the section: `semester1-lessons-extra` is
/// still (`semester1`, `Some("lessons")`).
pub fn split_category_id(id: &str) -> (&str, Option<&str>) {
    let mut tokens = id.split(ID_SEPARATOR);
    let group = tokens.next().unwrap_or(id);
    (group, tokens.next())
}

/// One category as placed in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    /// The category's display name from the manifest.
    pub name: String,
    pub items: Vec<FileEntry>,
}

impl Section {
    /// Button label: the fixed label for known kinds, else the category name.
    pub fn label(&self) -> &str {
        self.kind.label().unwrap_or(self.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
    /// Video playlist for the group, shown on its section screen.
    pub link: Option<String>,
    pub sections: Vec<Section>,
}

impl Group {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// The manifest regrouped as groups → sections, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    groups: Vec<Group>,
}

impl Library {
    /// Group a manifest. `configs` supplies display names and links;
    /// unconfigured groups display their id and have no link.
    ///
    /// Two categories landing in the same (group, section) slot: the later
    /// one replaces the earlier, keeping its position.
    pub fn from_manifest(manifest: &Manifest, configs: &[GroupConfig]) -> Self {
        let mut groups: Vec<Group> = Vec::new();
        for (id, category) in manifest.iter() {
            let (group_id, token) = split_category_id(id);
            let section = Section {
                kind: SectionKind::from_token(token),
                name: category.name.clone(),
                items: category.items.clone(),
            };

            let pos = match groups.iter().position(|g| g.id == group_id) {
                Some(pos) => pos,
                None => {
                    let config = configs.iter().find(|c| c.id == group_id);
                    groups.push(Group {
                        id: group_id.to_string(),
                        name: config.map_or_else(|| group_id.to_string(), |c| c.name.clone()),
                        link: config.and_then(|c| c.link.clone()),
                        sections: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[pos];

            match group.sections.iter_mut().find(|s| s.kind == section.kind) {
                Some(existing) => *existing = section,
                None => group.sections.push(section),
            }
        }
        Self { groups }
    }

    /// Read and group the manifest at `path`.
    pub fn load(path: &Path, configs: &[GroupConfig]) -> Result<Self, ScanError> {
        let manifest = read_manifest(path)?;
        Ok(Self::from_manifest(&manifest, configs))
    }

    /// Like [`Library::load`], but a missing or unreadable manifest yields an
    /// empty library after passing the error to `report`.
    pub fn load_or_empty(
        path: &Path,
        configs: &[GroupConfig],
        report: impl FnOnce(&ScanError),
    ) -> Self {
        Self::load(path, configs).unwrap_or_else(|e| {
            report(&e);
            Self::default()
        })
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn section(&self, group: &str, kind: SectionKind) -> Option<&Section> {
        self.group(group)?.section(kind)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Where rendered documents come from.
pub trait DocumentSource {
    /// Fetch the markdown at a manifest `path`.
    fn fetch(&self, path: &str) -> Result<String, FetchError>;
}

/// Reads manifest paths from disk, relative to the project root.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DocumentSource for FsSource {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let full = path
            .split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment));
        std::fs::read_to_string(&full).map_err(|source| FetchError::Io {
            path: path.to_string(),
            source,
        })
    }
}

/// Render markdown to HTML with the GitHub-flavoured extensions course notes use.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Body of the content screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBody {
    Html(String),
    /// Inline error shown in place of the document.
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Groups,
    Sections {
        group: String,
    },
    Files {
        group: String,
        section: SectionKind,
    },
    Content {
        group: String,
        section: SectionKind,
        title: String,
        body: ContentBody,
    },
}

impl Screen {
    fn group(&self) -> Option<&str> {
        match self {
            Screen::Groups => None,
            Screen::Sections { group }
            | Screen::Files { group, .. }
            | Screen::Content { group, .. } => Some(group),
        }
    }

    fn section(&self) -> Option<SectionKind> {
        match self {
            Screen::Files { section, .. } | Screen::Content { section, .. } => Some(*section),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenGroup(String),
    OpenSection(SectionKind),
    /// Open the file at this 0-based position in the current section.
    OpenFile(usize),
    BackToGroups,
    BackToSections,
    BackToFiles,
}

/// What a screen shows: a title, its buttons, and for content, the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub title: String,
    pub entries: Vec<String>,
    pub notice: Option<&'static str>,
    /// Video playlist link, on a group's section screen.
    pub link: Option<String>,
    pub body: Option<ContentBody>,
}

/// Navigation over a [`Library`], loading documents from `S`.
pub struct Browser<'a, S> {
    library: &'a Library,
    source: S,
}

impl<'a, S: DocumentSource> Browser<'a, S> {
    pub fn new(library: &'a Library, source: S) -> Self {
        Self { library, source }
    }

    pub fn library(&self) -> &Library {
        self.library
    }

    /// Next screen after `action` on `screen`.
    ///
    /// Actions that name something that doesn't exist, or that need a
    /// selection the current screen doesn't have, leave the screen as is.
    pub fn apply(&self, screen: &Screen, action: Action) -> Screen {
        let next = match action {
            Action::BackToGroups => Some(Screen::Groups),
            Action::OpenGroup(id) => self
                .library
                .group(&id)
                .map(|_| Screen::Sections { group: id }),
            Action::BackToSections => screen.group().map(|group| Screen::Sections {
                group: group.to_string(),
            }),
            Action::OpenSection(kind) => screen
                .group()
                .filter(|group| self.library.section(group, kind).is_some())
                .map(|group| Screen::Files {
                    group: group.to_string(),
                    section: kind,
                }),
            Action::BackToFiles => {
                screen
                    .group()
                    .zip(screen.section())
                    .map(|(group, section)| Screen::Files {
                        group: group.to_string(),
                        section,
                    })
            }
            Action::OpenFile(index) => screen.group().zip(screen.section()).and_then(
                |(group, section)| {
                    let item = self.library.section(group, section)?.items.get(index)?;
                    Some(Screen::Content {
                        group: group.to_string(),
                        section,
                        title: item.name.clone(),
                        body: self.load(item),
                    })
                },
            ),
        };
        next.unwrap_or_else(|| screen.clone())
    }

    fn load(&self, item: &FileEntry) -> ContentBody {
        match self.source.fetch(&item.path) {
            Ok(markdown) => ContentBody::Html(render_markdown(&markdown)),
            Err(e) => ContentBody::Error(format!("Failed to load: {e}")),
        }
    }

    /// Describe what `screen` displays.
    pub fn view(&self, screen: &Screen) -> View {
        let mut view = View {
            title: String::new(),
            entries: Vec::new(),
            notice: None,
            link: None,
            body: None,
        };
        match screen {
            Screen::Groups => {
                view.title = "Semesters".to_string();
                view.entries = self.library.groups().iter().map(|g| g.name.clone()).collect();
            }
            Screen::Sections { group } => {
                if let Some(group) = self.library.group(group) {
                    view.title = group.name.clone();
                    view.entries = group.sections.iter().map(|s| s.label().to_string()).collect();
                    view.link = group.link.clone();
                }
            }
            Screen::Files { group, section } => {
                if let Some(group) = self.library.group(group)
                    && let Some(section) = group.section(*section)
                {
                    view.title = format!("{} \u{2192} {}", group.name, section.label());
                    view.entries = section.items.iter().map(|i| i.name.clone()).collect();
                    if view.entries.is_empty() {
                        view.notice = Some(EMPTY_SECTION_NOTICE);
                    }
                }
            }
            Screen::Content { title, body, .. } => {
                view.title = title.clone();
                view.body = Some(body.clone());
            }
        }
        view
    }
}
