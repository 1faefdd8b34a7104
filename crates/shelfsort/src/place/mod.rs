pub mod device;
pub mod executor;
pub mod hash;
pub mod planner;

pub use device::check_same_volume;
pub use executor::{DistributionStats, Distributor, DistributorOptions, SecondaryOutcome};
pub use hash::{compute_blake3_hash, verify_copy};
pub use planner::{explain, plan, Decision, Placement, PlacementPaths};
