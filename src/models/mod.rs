pub mod asset;
pub mod holding;
pub mod snapshot;
pub mod swp;
pub mod valuation;

pub use asset::AssetKind;
pub use holding::{FundHolding, Holding, HoldingError, HoldingRecord, PortfolioFile, ReitHolding};
pub use snapshot::{Snapshot, SnapshotCache};
pub use swp::{SwpInput, SwpOutcome};
pub use valuation::ValuationRow;
