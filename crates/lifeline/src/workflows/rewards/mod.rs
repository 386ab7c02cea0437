//! Donor progression: reward tiers, the progression engine and ledger counting.
//!
//! The engine is a pure function of a donation count and a catalog. The service layer only
//! fetches the inputs from the registry repositories.

mod catalog;
mod engine;
mod import;
mod ledger;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, RewardCatalog, RewardTier, TierId};
pub use engine::{
    EligibilityResult, ProgressionEngine, ProgressionError, TierProgress,
    DEFAULT_REDEMPTION_THRESHOLD,
};
pub use import::{LedgerImportError, LedgerImporter};
pub use ledger::{count_donations, tally_donations};
pub use router::rewards_router;
pub use service::{DonorProgress, DonorSummary, RewardsService, RewardsServiceError};
