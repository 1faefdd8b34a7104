pub mod classify;
pub mod config;
pub mod error;
pub mod index;
pub mod place;
pub mod sort;
pub mod util;

pub use classify::{
    normalize, normalized_stem, Classifier, Group, GroupForest, GroupId, Pattern, PatternWarning,
};
pub use config::{write_demo_config, Config, GroupConfig, GroupNode};
pub use error::{Result, SortError};
pub use index::{scan_directory, ScanOptions, ScanStats, SourceFile};
pub use place::{
    check_same_volume, explain, plan, Decision, DistributionStats, Distributor,
    DistributorOptions, Placement, PlacementPaths,
};
pub use sort::{sort_directory, FileOutcome, SortOptions, SortReport, Sorter};
