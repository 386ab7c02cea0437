use std::collections::HashMap;

use crate::workflows::registry::{Donation, DonorId};

/// Number of ledger entries attributed to `donor_id`.
pub fn count_donations(donor_id: &DonorId, ledger: &[Donation]) -> u32 {
    ledger
        .iter()
        .filter(|donation| &donation.donor_id == donor_id)
        .count() as u32
}

/// Donation counts for every donor that appears in the ledger, in one pass.
pub fn tally_donations(ledger: &[Donation]) -> HashMap<DonorId, u32> {
    let mut counts: HashMap<DonorId, u32> = HashMap::new();
    for donation in ledger {
        *counts.entry(donation.donor_id.clone()).or_insert(0) += 1;
    }
    counts
}
