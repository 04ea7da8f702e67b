//! Root-relative, forward-slash paths for manifest entries.
//!
//! Manifest paths are fetched by a web client as URLs, so they are always
//! relative to the project root and always joined with `/`, whatever the
//! host's separator is.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Path of `target` relative to `root`, joined with `/`.
///
/// Both paths are made absolute against the working directory and then
/// normalized lexically (`.` dropped, `..` folded into its parent) before
/// comparing, so `root = "."` and `dir = "./assets/../assets/x"` still
/// resolve to `assets/x/...`. Targets outside the root come out with
/// leading `..` segments.
pub fn relative_url(root: &Path, target: &Path) -> io::Result<String> {
    let root = normalize(&std::path::absolute(root)?);
    let target = normalize(&std::path::absolute(target)?);

    let root_parts: Vec<Component<'_>> = root.components().collect();
    let target_parts: Vec<Component<'_>> = target.components().collect();
    let shared = root_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = std::iter::repeat_n("..".to_string(), root_parts.len() - shared);
    let downs = target_parts[shared..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned());
    Ok(ups.chain(downs).collect::<Vec<_>>().join("/"))
}

/// Lexically resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn nested_file_is_forward_slashed() {
        let tmp = TempDir::new().unwrap();
        let target = tmp
            .path()
            .join("assets")
            .join("semester-1")
            .join("lessons")
            .join("lesson_1.md");
        assert_eq!(
            relative_url(tmp.path(), &target).unwrap(),
            "assets/semester-1/lessons/lesson_1.md"
        );
    }

    #[test]
    fn dot_segments_are_folded() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("./assets/../assets/./exam/tickets.md");
        assert_eq!(
            relative_url(tmp.path(), &target).unwrap(),
            "assets/exam/tickets.md"
        );
    }

    #[test]
    fn relative_root_resolves_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let target = cwd.join("docs").join("a.md");
        assert_eq!(relative_url(Path::new("."), &target).unwrap(), "docs/a.md");
    }

    #[test]
    fn target_outside_root_gets_parent_segments() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("site");
        let target = tmp.path().join("shared").join("a.md");
        assert_eq!(relative_url(&root, &target).unwrap(), "../shared/a.md");
    }

    #[test]
    fn normalize_keeps_root_on_excess_parents() {
        assert_eq!(normalize(Path::new("/a/../../b")), PathBuf::from("/b"));
    }
}
