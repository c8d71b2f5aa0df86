//! Filtering of tree entries down to one magazine/format's issues.

use regex::Regex;

use crate::github::models::TreeEntry;
use crate::magazines::{FileType, Magazine};

/// Anchored path filter for one magazine/format pair.
///
/// Accepts exactly the paths of the form `<shelf-prefix>/<anything>.<ext>`;
/// both ends are anchored so a correct prefix with the wrong extension (or
/// the reverse) never slips through.
pub struct IssueFilter {
    pattern: Regex,
}

impl IssueFilter {
    pub fn new(magazine: Magazine, file_type: FileType) -> IssueFilter {
        let pattern = format!(
            r"^{}/.*\.{}$",
            regex::escape(magazine.shelf_prefix()),
            regex::escape(file_type.extension())
        );
        // Prefixes and extensions are compile-time constants; the pattern
        // always compiles.
        let pattern = Regex::new(&pattern).expect("issue filter pattern is valid");
        IssueFilter { pattern }
    }

    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }

    /// Entries whose path matches, in their original listing order.
    pub fn filter<'a>(&self, entries: &'a [TreeEntry]) -> Vec<&'a TreeEntry> {
        entries
            .iter()
            .filter(|entry| self.matches(&entry.path))
            .collect()
    }
}
