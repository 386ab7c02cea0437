use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::catalog::RewardCatalog;
use super::engine::{EligibilityResult, ProgressionEngine, ProgressionError};
use super::ledger::{count_donations, tally_donations};
use crate::workflows::registry::{
    BloodType, DonationLedger, Donor, DonorDirectory, DonorId, RepositoryError,
};

/// Public slice of a donor shown next to their rewards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonorSummary {
    pub id: DonorId,
    pub name: String,
    pub email: String,
    pub blood_type: BloodType,
}

impl From<&Donor> for DonorSummary {
    fn from(donor: &Donor) -> Self {
        Self {
            id: donor.id.clone(),
            name: donor.name.clone(),
            email: donor.email.clone(),
            blood_type: donor.blood_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonorProgress {
    pub donor: DonorSummary,
    pub total_tiers: usize,
    #[serde(flatten)]
    pub result: EligibilityResult,
}

/// Service pairing the donor directory and ledger with the progression engine.
pub struct RewardsService<D, L> {
    donors: Arc<D>,
    ledger: Arc<L>,
    catalog: RewardCatalog,
    engine: ProgressionEngine,
}

impl<D, L> RewardsService<D, L>
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
{
    pub fn new(
        donors: Arc<D>,
        ledger: Arc<L>,
        catalog: RewardCatalog,
        engine: ProgressionEngine,
    ) -> Self {
        Self {
            donors,
            ledger,
            catalog,
            engine,
        }
    }

    pub fn catalog(&self) -> &RewardCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> ProgressionEngine {
        self.engine
    }

    /// Evaluate a raw donation count against the active catalog.
    pub fn evaluate_count(
        &self,
        donation_count: i64,
    ) -> Result<EligibilityResult, RewardsServiceError> {
        Ok(self
            .engine
            .evaluate(donation_count, self.catalog.list_tiers())?)
    }

    pub fn donor_progress(&self, donor_id: &DonorId) -> Result<DonorProgress, RewardsServiceError> {
        let donor = self
            .donors
            .fetch(donor_id)?
            .ok_or(RepositoryError::NotFound)?;
        let ledger = self.ledger.list()?;
        let count = count_donations(&donor.id, &ledger);

        debug!(donor_id = %donor.id, count, "evaluating donor progression");
        self.progress_for(&donor, count)
    }

    /// Every donor's progression, most donations first, ties broken by name.
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<DonorProgress>, RewardsServiceError> {
        let donors = self.donors.list()?;
        let counts = tally_donations(&self.ledger.list()?);

        let mut board = donors
            .iter()
            .map(|donor| {
                let count = counts.get(&donor.id).copied().unwrap_or(0);
                self.progress_for(donor, count)
            })
            .collect::<Result<Vec<_>, _>>()?;

        board.sort_by(|left, right| {
            right
                .result
                .donation_count
                .cmp(&left.result.donation_count)
                .then_with(|| left.donor.name.cmp(&right.donor.name))
        });
        board.truncate(limit);
        Ok(board)
    }

    fn progress_for(&self, donor: &Donor, count: u32) -> Result<DonorProgress, RewardsServiceError> {
        let result = self
            .engine
            .evaluate(i64::from(count), self.catalog.list_tiers())?;
        Ok(DonorProgress {
            donor: DonorSummary::from(donor),
            total_tiers: self.catalog.len(),
            result,
        })
    }
}

/// Error raised by the rewards service.
#[derive(Debug, thiserror::Error)]
pub enum RewardsServiceError {
    #[error(transparent)]
    Progression(#[from] ProgressionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
