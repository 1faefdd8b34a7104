//! Category groups stored in an arena.
//!
//! The forest owns every [`Group`]; children and parents refer to each other
//! through [`GroupId`] indices, so the tree has no ownership cycles.

use crate::classify::pattern::{Pattern, PatternWarning};
use crate::config::{GroupConfig, GroupNode};
use crate::error::{Result, SortError};
use std::path::PathBuf;

/// Index of a group inside its [`GroupForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

/// A named category node.
#[derive(Debug, Clone)]
pub struct Group {
    pub name: String,
    pub parent: Option<GroupId>,
    pub subgroups: Vec<GroupId>,
    pub include_patterns: Vec<Pattern>,
    pub exclude_patterns: Vec<Pattern>,
}

impl Group {
    /// Highest include-pattern priority, 0 when there are no include patterns.
    pub fn max_priority(&self) -> usize {
        self.include_patterns
            .iter()
            .map(Pattern::priority)
            .max()
            .unwrap_or(0)
    }

    /// Matches on the group's own patterns only; descendants are not considered.
    ///
    /// A group without include patterns never matches by itself, and any
    /// matching exclude pattern overrides the includes.
    pub fn matches_directly(&self, normalized: &str) -> bool {
        if self.include_patterns.is_empty() {
            return false;
        }
        if !self.include_patterns.iter().any(|p| p.matches(normalized)) {
            return false;
        }
        !self.exclude_patterns.iter().any(|p| p.matches(normalized))
    }
}

/// The immutable set of group trees built from configuration.
#[derive(Debug, Clone, Default)]
pub struct GroupForest {
    groups: Vec<Group>,
    roots: Vec<GroupId>,
}

impl GroupForest {
    /// Build the forest from parsed configuration.
    ///
    /// Fails with [`SortError::Configuration`] naming the node position when a
    /// node has no usable name.
    pub fn from_config(config: &GroupConfig) -> Result<Self> {
        let mut forest = GroupForest::default();
        for (index, node) in config.groups.iter().enumerate() {
            let position = format!("groups[{}]", index);
            let id = forest.build_node(node, None, &position)?;
            forest.roots.push(id);
        }
        log::debug!(
            "Built {} groups under {} roots",
            forest.groups.len(),
            forest.roots.len()
        );
        Ok(forest)
    }

    fn build_node(
        &mut self,
        node: &GroupNode,
        parent: Option<GroupId>,
        position: &str,
    ) -> Result<GroupId> {
        let name = validate_name(node.name(), position)?;

        let id = GroupId(self.groups.len());
        self.groups.push(Group {
            name,
            parent,
            subgroups: Vec::new(),
            include_patterns: node.include.iter().map(|raw| Pattern::new(raw)).collect(),
            exclude_patterns: node.exclude.iter().map(|raw| Pattern::new(raw)).collect(),
        });

        for (index, child) in node.groups.iter().enumerate() {
            let child_position = format!("{}.groups[{}]", position, index);
            let child_id = self.build_node(child, Some(id), &child_position)?;
            self.groups[id.0].subgroups.push(child_id);
        }

        Ok(id)
    }

    pub fn get(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }

    pub fn roots(&self) -> &[GroupId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All groups in depth-first declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.groups
            .iter()
            .enumerate()
            .map(|(index, group)| (GroupId(index), group))
    }

    /// Names from the root down to `id`.
    pub fn path_names(&self, id: GroupId) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(group_id) = current {
            let group = self.get(group_id);
            names.push(group.name.as_str());
            current = group.parent;
        }
        names.reverse();
        names
    }

    /// Hierarchical path of the group, computed on each call.
    pub fn full_name(&self, id: GroupId) -> PathBuf {
        self.path_names(id).into_iter().collect()
    }

    /// `/`-joined form of [`full_name`](Self::full_name) for display and reports.
    pub fn display_name(&self, id: GroupId) -> String {
        self.path_names(id).join("/")
    }

    /// Look up a group by its `/`-joined full name.
    pub fn find(&self, display_name: &str) -> Option<GroupId> {
        self.iter()
            .map(|(id, _)| id)
            .find(|id| self.display_name(*id) == display_name)
    }

    /// Invalid regex alternatives across all groups, keyed by group display name.
    pub fn pattern_warnings(&self) -> Vec<(String, PatternWarning)> {
        self.iter()
            .flat_map(|(id, group)| {
                group
                    .include_patterns
                    .iter()
                    .chain(group.exclude_patterns.iter())
                    .flat_map(Pattern::warnings)
                    .map(move |warning| (self.display_name(id), warning))
            })
            .collect()
    }
}

/// A name may span several folders (`C/C++`), but every part must be a
/// plain directory name so the group stays under the destination root.
fn validate_name(name: Option<&str>, position: &str) -> Result<String> {
    let name = name.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(SortError::configuration(position, "group without a name"));
    }
    let bad_part = name
        .split(['/', '\\'])
        .map(str::trim)
        .any(|part| part.is_empty() || part == "." || part == "..");
    if bad_part {
        return Err(SortError::configuration(
            position,
            format!("group name '{}' is not a relative folder path", name),
        ));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, include: &[&str], groups: Vec<GroupNode>) -> GroupNode {
        GroupNode {
            name: Some(name.to_string()),
            include: include.iter().map(|s| s.to_string()).collect(),
            groups,
            ..Default::default()
        }
    }

    #[test]
    fn test_full_name_and_parents() {
        let config = GroupConfig {
            groups: vec![node(
                "IT",
                &[],
                vec![node("Programming", &[], vec![node("Rust", &["Rust"], vec![])])],
            )],
        };
        let forest = GroupForest::from_config(&config).unwrap();

        assert_eq!(forest.len(), 3);
        assert_eq!(forest.roots().len(), 1);

        let rust = forest.find("IT/Programming/Rust").unwrap();
        assert_eq!(
            forest.full_name(rust),
            PathBuf::from("IT").join("Programming").join("Rust")
        );
        let programming = forest.get(rust).parent.unwrap();
        assert_eq!(forest.get(programming).name, "Programming");
        assert_eq!(forest.get(programming).subgroups, vec![rust]);
        assert!(forest.get(forest.roots()[0]).parent.is_none());
    }

    #[test]
    fn test_missing_name_reports_position() {
        let mut nameless = node("x", &["x"], vec![]);
        nameless.name = None;
        let config = GroupConfig {
            groups: vec![
                node("A", &["a"], vec![]),
                node("B", &[], vec![node("C", &["c"], vec![]), nameless]),
            ],
        };

        let err = GroupForest::from_config(&config).unwrap_err();
        match err {
            SortError::Configuration { position, .. } => {
                assert_eq!(position, "groups[1].groups[1]")
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_rejects_names_leaving_the_group_folder() {
        for bad in ["..", "a/../b", "  ", "/etc", "x\\", "C//C++"] {
            let config = GroupConfig {
                groups: vec![node(bad, &["a"], vec![])],
            };
            assert!(
                matches!(
                    GroupForest::from_config(&config),
                    Err(SortError::Configuration { .. })
                ),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_name_with_separator_nests_folders() {
        let config = GroupConfig {
            groups: vec![node("IT", &[], vec![node("C/C++", &["C++"], vec![])])],
        };
        let forest = GroupForest::from_config(&config).unwrap();

        let cpp = forest.find("IT/C/C++").unwrap();
        assert_eq!(forest.full_name(cpp), PathBuf::from("IT").join("C").join("C++"));
        assert_eq!(forest.path_names(cpp), vec!["IT", "C/C++"]);
    }

    #[test]
    fn test_max_priority_and_direct_match() {
        let mut office = node("Office", &["Office", "PowerPoint"], vec![]);
        office.exclude = vec!["Linux".to_string()];
        let config = GroupConfig {
            groups: vec![office, node("Empty", &[], vec![])],
        };
        let forest = GroupForest::from_config(&config).unwrap();

        let office = forest.get(forest.roots()[0]);
        assert_eq!(office.max_priority(), 10);
        assert!(office.matches_directly("office 2019 basics"));
        assert!(!office.matches_directly("office on linux"));

        let empty = forest.get(forest.roots()[1]);
        assert_eq!(empty.max_priority(), 0);
        assert!(!empty.matches_directly("empty"));
    }

    #[test]
    fn test_pattern_warnings() {
        let config = GroupConfig {
            groups: vec![node("Broken", &["regex:(", "fine"], vec![])],
        };
        let forest = GroupForest::from_config(&config).unwrap();
        let warnings = forest.pattern_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].0, "Broken");
        assert_eq!(warnings[0].1.alternative, "regex:(");
    }
}
