//! Descendant-first matching of file names against the group forest.

use crate::classify::group::{GroupForest, GroupId};
use crate::classify::pattern::normalize;
use std::path::Path;

/// Normalized stem of a file name: directory and last extension removed.
pub fn normalized_stem(file_name: &str) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| file_name.into());
    normalize(&stem)
}

/// Read-only classifier over a built forest. Cheap to create, safe to share.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    forest: &'a GroupForest,
}

impl<'a> Classifier<'a> {
    pub fn new(forest: &'a GroupForest) -> Self {
        Self { forest }
    }

    pub fn forest(&self) -> &'a GroupForest {
        self.forest
    }

    /// Every group the file belongs to, in root declaration order.
    ///
    /// Only the name is used; the extension is stripped before matching.
    pub fn match_file(&self, file_name: &str) -> Vec<GroupId> {
        self.match_normalized(&normalized_stem(file_name))
    }

    /// Same as [`match_file`](Self::match_file) for text that is already normalized.
    pub fn match_normalized(&self, normalized: &str) -> Vec<GroupId> {
        let mut matches = Vec::new();
        for root in self.forest.roots() {
            self.collect(*root, normalized, &mut matches);
        }
        matches
    }

    /// Matches within the subtree rooted at `id`.
    pub fn match_group(&self, normalized: &str, id: GroupId) -> Vec<GroupId> {
        let mut matches = Vec::new();
        self.collect(id, normalized, &mut matches);
        matches
    }

    fn collect(&self, id: GroupId, normalized: &str, matches: &mut Vec<GroupId>) {
        let before = matches.len();
        let group = self.forest.get(id);

        for sub in &group.subgroups {
            self.collect(*sub, normalized, matches);
        }

        // A matching descendant always wins over its ancestors.
        if matches.len() == before && group.matches_directly(normalized) {
            matches.push(id);
        }
    }
}
