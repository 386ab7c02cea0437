use serde::Serialize;

use super::catalog::{RewardTier, TierId};
use crate::config::RewardsConfig;
use crate::workflows::registry::LIVES_PER_DONATION;

/// Program-wide minimum donation count for reward redemption.
///
/// Independent of the catalog thresholds.
pub const DEFAULT_REDEMPTION_THRESHOLD: u32 = 2;

/// Malformed engine input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

/// How far a donor is from one locked tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierProgress {
    pub tier_id: TierId,
    pub required_donations: u32,
    pub remaining: u32,
    /// Whole percent towards the threshold, capped at 100.
    pub percent: u8,
}

/// Classification of a catalog against one donation count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityResult {
    pub donation_count: u32,
    pub earned_tiers: Vec<RewardTier>,
    pub upcoming_tiers: Vec<RewardTier>,
    pub next_tier: Option<RewardTier>,
    pub remaining_to_next: Option<u32>,
    pub is_eligible: bool,
    pub upcoming_progress: Vec<TierProgress>,
    pub lives_saved: u64,
}

/// Stateless evaluator partitioning reward tiers by donation count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressionEngine {
    redemption_threshold: u32,
}

impl Default for ProgressionEngine {
    fn default() -> Self {
        Self::with_redemption_threshold(DEFAULT_REDEMPTION_THRESHOLD)
    }
}

impl ProgressionEngine {
    pub fn new(config: RewardsConfig) -> Self {
        Self::with_redemption_threshold(config.redemption_threshold)
    }

    pub const fn with_redemption_threshold(redemption_threshold: u32) -> Self {
        Self {
            redemption_threshold,
        }
    }

    pub const fn redemption_threshold(&self) -> u32 {
        self.redemption_threshold
    }

    /// Partition `catalog` into earned and upcoming tiers for `donation_count`.
    ///
    /// The catalog is treated as unordered. `next_tier` is the upcoming tier with the
    /// lowest threshold, and the earliest such tier in catalog order on ties.
    pub fn evaluate(
        &self,
        donation_count: i64,
        catalog: &[RewardTier],
    ) -> Result<EligibilityResult, ProgressionError> {
        let count = u32::try_from(donation_count).map_err(|_| ProgressionError::InvalidInput {
            reason: if donation_count < 0 {
                format!("donation count must not be negative (got {donation_count})")
            } else {
                format!("donation count {donation_count} exceeds the supported range")
            },
        })?;

        let mut earned_tiers = Vec::new();
        let mut upcoming_tiers: Vec<RewardTier> = Vec::new();
        let mut next_index: Option<usize> = None;

        for tier in catalog {
            if tier.required_donations == 0 {
                return Err(ProgressionError::InvalidInput {
                    reason: format!(
                        "reward tier '{}' must require at least one donation",
                        tier.id.0
                    ),
                });
            }

            if tier.required_donations <= count {
                earned_tiers.push(tier.clone());
                continue;
            }

            let lower = match next_index {
                Some(index) => tier.required_donations < upcoming_tiers[index].required_donations,
                None => true,
            };
            if lower {
                next_index = Some(upcoming_tiers.len());
            }
            upcoming_tiers.push(tier.clone());
        }

        let next_tier = next_index.map(|index| upcoming_tiers[index].clone());
        let remaining_to_next = next_tier
            .as_ref()
            .map(|tier| tier.required_donations.saturating_sub(count));
        let upcoming_progress = upcoming_tiers
            .iter()
            .map(|tier| progress_towards(tier, count))
            .collect();

        Ok(EligibilityResult {
            donation_count: count,
            earned_tiers,
            upcoming_tiers,
            next_tier,
            remaining_to_next,
            is_eligible: count >= self.redemption_threshold,
            upcoming_progress,
            lives_saved: u64::from(count) * LIVES_PER_DONATION,
        })
    }
}

fn progress_towards(tier: &RewardTier, count: u32) -> TierProgress {
    let required = u64::from(tier.required_donations);
    let percent = (u64::from(count) * 100 / required).min(100) as u8;

    TierProgress {
        tier_id: tier.id.clone(),
        required_donations: tier.required_donations,
        remaining: tier.required_donations.saturating_sub(count),
        percent,
    }
}
