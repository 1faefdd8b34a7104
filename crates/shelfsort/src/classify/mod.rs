pub mod classifier;
pub mod group;
pub mod pattern;

pub use classifier::{normalized_stem, Classifier};
pub use group::{Group, GroupForest, GroupId};
pub use pattern::{normalize, Alternative, Pattern, PatternWarning, REGEX_PREFIX};
