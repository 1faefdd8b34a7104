//! Primary/secondary selection for a file's matched groups.

use crate::classify::{normalized_stem, Classifier, GroupForest, GroupId};
use serde::Serialize;
use std::cmp::Reverse;
use std::path::{Path, PathBuf};

/// Where one file goes: a real copy in `primary`, links in `secondaries`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub primary: GroupId,
    pub secondaries: Vec<GroupId>,
}

/// Destination paths derived from a [`Placement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementPaths {
    pub primary: PathBuf,
    pub secondaries: Vec<PathBuf>,
}

/// Order matches by descending include priority and split off the primary.
///
/// The sort is stable, so equal priorities keep match order (root declaration
/// order, then child order). Returns `None` when nothing matched.
pub fn plan(forest: &GroupForest, matches: &[GroupId]) -> Option<Placement> {
    let mut ordered = matches.to_vec();
    ordered.sort_by_key(|id| Reverse(forest.get(*id).max_priority()));

    let mut ordered = ordered.into_iter();
    let primary = ordered.next()?;
    Some(Placement {
        primary,
        secondaries: ordered.collect(),
    })
}

impl Placement {
    /// Primary first, then secondaries in link order.
    pub fn groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        std::iter::once(self.primary).chain(self.secondaries.iter().copied())
    }

    /// `<dst_root>/<group full name>/<file_name>` for every placement.
    ///
    /// Groups sharing a full name share a folder; each path appears once.
    pub fn destinations(
        &self,
        forest: &GroupForest,
        dst_root: &Path,
        file_name: &Path,
    ) -> PlacementPaths {
        let destination = |id: GroupId| dst_root.join(forest.full_name(id)).join(file_name);
        let primary = destination(self.primary);

        let mut secondaries: Vec<PathBuf> = Vec::with_capacity(self.secondaries.len());
        for path in self.secondaries.iter().map(|id| destination(*id)) {
            if path != primary && !secondaries.contains(&path) {
                secondaries.push(path);
            }
        }

        PlacementPaths {
            primary,
            secondaries,
        }
    }
}

/// Human-readable classification outcome for one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub file: String,
    pub normalized: String,
    pub matches: Vec<String>,
    pub primary: Option<String>,
    pub secondaries: Vec<String>,
}

/// Classify and plan a single name without touching the filesystem.
pub fn explain(classifier: &Classifier<'_>, file_name: &str) -> Decision {
    let forest = classifier.forest();
    let normalized = normalized_stem(file_name);
    let matches = classifier.match_normalized(&normalized);
    let placement = plan(forest, &matches);

    Decision {
        file: file_name.to_string(),
        normalized,
        matches: matches.iter().map(|id| forest.display_name(*id)).collect(),
        primary: placement.as_ref().map(|p| forest.display_name(p.primary)),
        secondaries: placement
            .map(|p| {
                p.secondaries
                    .iter()
                    .map(|id| forest.display_name(*id))
                    .collect()
            })
            .unwrap_or_default(),
    }
}
