use std::collections::HashMap;

use serde::Serialize;

use super::domain::{BloodRequest, BloodType, Donation, Donor, RequestStatus};
use super::search::newest_first;

/// Each whole-blood donation is counted as helping up to three patients.
pub const LIVES_PER_DONATION: u64 = 3;

const RECENT_REQUEST_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BloodTypeCount {
    pub blood_type: BloodType,
    pub count: usize,
}

/// Aggregate figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_donors: usize,
    pub available_donors: usize,
    pub active_requests: usize,
    pub total_donations: usize,
    pub donors_by_blood_type: Vec<BloodTypeCount>,
    pub recent_requests: Vec<BloodRequest>,
    pub lives_saved: u64,
    /// Share of registered donors currently available, as a rounded percentage.
    pub availability_rate: u8,
}

impl DashboardStats {
    /// `donors` and `requests` must be in insertion order.
    pub fn compute(donors: &[Donor], donations: &[Donation], requests: &[BloodRequest]) -> Self {
        let total_donors = donors.len();
        let available_donors = donors.iter().filter(|donor| donor.is_available).count();

        let mut open: Vec<BloodRequest> = requests
            .iter()
            .filter(|request| request.status == RequestStatus::Open)
            .cloned()
            .collect();
        let active_requests = open.len();
        newest_first(&mut open, |request| request.created_at);
        open.truncate(RECENT_REQUEST_LIMIT);

        let total_donations = donations.len();

        Self {
            total_donors,
            available_donors,
            active_requests,
            total_donations,
            donors_by_blood_type: donors_by_blood_type(donors),
            recent_requests: open,
            lives_saved: total_donations as u64 * LIVES_PER_DONATION,
            availability_rate: availability_rate(available_donors, total_donors),
        }
    }
}

/// Counts per blood type, largest group first. Equal counts fall back to the
/// canonical blood type order.
pub fn donors_by_blood_type(donors: &[Donor]) -> Vec<BloodTypeCount> {
    let mut counts: HashMap<BloodType, usize> = HashMap::new();
    for donor in donors {
        *counts.entry(donor.blood_type).or_insert(0) += 1;
    }

    let mut grouped: Vec<BloodTypeCount> = counts
        .into_iter()
        .map(|(blood_type, count)| BloodTypeCount { blood_type, count })
        .collect();
    grouped.sort_by(|left, right| {
        right
            .count
            .cmp(&left.count)
            .then(left.blood_type.cmp(&right.blood_type))
    });
    grouped
}

fn availability_rate(available: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((available as f64 / total as f64) * 100.0).round() as u8
}
