use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::registry::{
    BloodType, Donation, DonationId, DonationLedger, Donor, DonorDirectory, DonorId,
    InMemoryDonationLedger, InMemoryDonorDirectory, RepositoryError,
};
use crate::workflows::rewards::{ProgressionEngine, RewardCatalog, RewardTier, RewardsService};

/// Three-tier catalog used throughout the progression scenarios.
pub(super) fn scenario_catalog() -> Vec<RewardTier> {
    vec![
        RewardTier::new("badge", 1, "Badge", "First donation", "Badge", "Profile badge"),
        RewardTier::new("double", 2, "Double", "Second donation", "Achievement", "$10"),
        RewardTier::new("golden", 10, "Golden", "Tenth donation", "VIP Status", "$100"),
    ]
}

/// Unsorted catalog with repeated thresholds.
pub(super) fn shuffled_catalog() -> Vec<RewardTier> {
    vec![
        RewardTier::new("gold", 10, "Gold", "", "VIP Status", ""),
        RewardTier::new("gallon-a", 8, "Gallon A", "", "Elite", ""),
        RewardTier::new("first", 1, "First", "", "Badge", ""),
        RewardTier::new("gallon-b", 8, "Gallon B", "", "Elite", ""),
        RewardTier::new("legend", 20, "Legend", "", "Elite", ""),
        RewardTier::new("triple", 3, "Triple", "", "Achievement", ""),
    ]
}

pub(super) fn names(tiers: &[RewardTier]) -> Vec<&str> {
    tiers.iter().map(|tier| tier.name.as_str()).collect()
}

pub(super) fn donor(id: &str, name: &str) -> Donor {
    Donor {
        id: DonorId(id.to_string()),
        name: name.to_string(),
        email: format!("{id}@donors.test"),
        phone: "555-0142".to_string(),
        blood_type: BloodType::OPositive,
        date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 1).expect("valid date"),
        gender: "female".to_string(),
        location: "Des Moines".to_string(),
        last_donation_date: None,
        is_available: true,
        created_at: Utc
            .with_ymd_and_hms(2025, 1, 2, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn donation(id: &str, donor_id: &str) -> Donation {
    Donation {
        id: DonationId(id.to_string()),
        donor_id: DonorId(donor_id.to_string()),
        request_id: None,
        donation_date: NaiveDate::from_ymd_opt(2025, 2, 3).expect("valid date"),
        units_donated: 1,
        location: "Mercy Blood Center".to_string(),
        notes: None,
    }
}

/// Ada has 3 donations, Grace 1, Linus none.
pub(super) fn seeded_service(
) -> RewardsService<InMemoryDonorDirectory, InMemoryDonationLedger> {
    let donors = Arc::new(InMemoryDonorDirectory::default());
    for (id, name) in [("donor-1", "Linus"), ("donor-2", "Ada"), ("donor-3", "Grace")] {
        donors.insert(donor(id, name)).expect("insert donor");
    }

    let ledger = Arc::new(InMemoryDonationLedger::with_entries(vec![
        donation("d-1", "donor-2"),
        donation("d-2", "donor-3"),
        donation("d-3", "donor-2"),
        donation("d-4", "donor-2"),
    ]));

    RewardsService::new(
        donors,
        ledger,
        RewardCatalog::standard(),
        ProgressionEngine::default(),
    )
}

pub(super) struct OfflineLedger;

impl DonationLedger for OfflineLedger {
    fn append(&self, _donation: Donation) -> Result<Donation, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Donation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
