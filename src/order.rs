//! File ordering within a category.
//!
//! Two mutually exclusive policies:
//!
//! - **Explicit**: the catalog lists filenames in display order. Listed
//!   files come first in list order; everything else follows,
//!   lexicographically.
//! - **Numeric** (default): files sort ascending by the first run of digits
//!   in their name (0 when there is none).
//!
//! Both sorts are stable, so ties keep the order files were discovered in.
//! The scanner discovers files in filename order, which makes the result
//! independent of how the filesystem happens to list a directory.

use crate::naming::first_number;

/// How a category orders its files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPolicy<'a> {
    /// Listed filenames first, in list order; the rest lexicographically.
    Explicit(&'a [String]),
    /// Ascending by the first embedded number.
    Numeric,
}

impl<'a> SortPolicy<'a> {
    /// `Explicit` when the catalog provides an order list, `Numeric` otherwise.
    pub fn from_order(order: Option<&'a [String]>) -> Self {
        order.map_or(Self::Numeric, Self::Explicit)
    }
}

/// Sort `files` in place according to `policy`.
pub fn sort_files(files: &mut [String], policy: SortPolicy<'_>) {
    match policy {
        SortPolicy::Explicit(order) => {
            files.sort_by(|a, b| explicit_rank(order, a).cmp(&explicit_rank(order, b)));
        }
        SortPolicy::Numeric => files.sort_by_key(|f| first_number(f)),
    }
}

/// Sort key under an explicit list: position for listed files, and for
/// unlisted ones a shared position past the end plus the name itself.
fn explicit_rank<'f>(order: &[String], file: &'f str) -> (usize, &'f str) {
    match order.iter().position(|o| o == file) {
        Some(pos) => (pos, ""),
        None => (order.len(), file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn explicit_listed_first_then_lexicographic() {
        let order = names(&["tickets.md", "final_project.md"]);
        let mut files = names(&["final_project.md", "extra.md", "tickets.md"]);
        sort_files(&mut files, SortPolicy::Explicit(&order));
        assert_eq!(files, names(&["tickets.md", "final_project.md", "extra.md"]));
    }

    #[test]
    fn explicit_unlisted_sorted_among_themselves() {
        let order = names(&["intro.md"]);
        let mut files = names(&["zeta.md", "alpha.md", "intro.md", "mid.md"]);
        sort_files(&mut files, SortPolicy::Explicit(&order));
        assert_eq!(files, names(&["intro.md", "alpha.md", "mid.md", "zeta.md"]));
    }

    #[test]
    fn explicit_list_may_name_missing_files() {
        let order = names(&["gone.md", "b.md", "a.md"]);
        let mut files = names(&["a.md", "b.md"]);
        sort_files(&mut files, SortPolicy::Explicit(&order));
        assert_eq!(files, names(&["b.md", "a.md"]));
    }

    #[test]
    fn explicit_list_ignores_numbers() {
        let order = names(&["lesson_10.md", "lesson_2.md"]);
        let mut files = names(&["lesson_2.md", "lesson_10.md"]);
        sort_files(&mut files, SortPolicy::Explicit(&order));
        assert_eq!(files, names(&["lesson_10.md", "lesson_2.md"]));
    }

    #[test]
    fn numeric_ascending() {
        let mut files = names(&["lesson_10.md", "lesson_2.md", "lesson_1.md"]);
        sort_files(&mut files, SortPolicy::Numeric);
        assert_eq!(files, names(&["lesson_1.md", "lesson_2.md", "lesson_10.md"]));
    }

    #[test]
    fn numeric_undigited_sorts_as_zero() {
        let mut files = names(&["lesson_1.md", "overview.md", "lesson_3.md"]);
        sort_files(&mut files, SortPolicy::Numeric);
        assert_eq!(files, names(&["overview.md", "lesson_1.md", "lesson_3.md"]));
    }

    #[test]
    fn numeric_ties_keep_discovery_order() {
        let mut files = names(&["b_1.md", "a_1.md", "notes.md", "faq.md"]);
        sort_files(&mut files, SortPolicy::Numeric);
        assert_eq!(files, names(&["notes.md", "faq.md", "b_1.md", "a_1.md"]));
    }

    #[test]
    fn policy_from_order() {
        let order = names(&["a.md"]);
        assert_eq!(SortPolicy::from_order(None), SortPolicy::Numeric);
        assert_eq!(
            SortPolicy::from_order(Some(order.as_slice())),
            SortPolicy::Explicit(&order)
        );
    }
}
