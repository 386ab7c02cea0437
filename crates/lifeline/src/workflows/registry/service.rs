use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::dashboard::DashboardStats;
use super::domain::{
    BloodRequest, Donation, DonationId, Donor, DonorId, DonorRegistration, NewBloodRequest,
    NewDonation, RequestId, RequestStatus,
};
use super::repository::{DonationLedger, DonorDirectory, RepositoryError, RequestBoard};
use super::search::{newest_first, search_donors, DonorQuery};
use super::validation::{
    validate_donation, validate_registration, validate_request, ValidationError,
};

/// Service composing the donor directory, donation ledger and request board.
pub struct RegistryService<D, L, B> {
    donors: Arc<D>,
    ledger: Arc<L>,
    board: Arc<B>,
    donor_sequence: AtomicU64,
    donation_sequence: AtomicU64,
    request_sequence: AtomicU64,
}

impl<D, L, B> RegistryService<D, L, B>
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
    B: RequestBoard + 'static,
{
    pub fn new(donors: Arc<D>, ledger: Arc<L>, board: Arc<B>) -> Self {
        Self {
            donors,
            ledger,
            board,
            donor_sequence: AtomicU64::new(1),
            donation_sequence: AtomicU64::new(1),
            request_sequence: AtomicU64::new(1),
        }
    }

    fn next_id(sequence: &AtomicU64, prefix: &str) -> String {
        let id = sequence.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{id:06}")
    }

    /// Register a new donor; they start out available.
    pub fn register_donor(&self, registration: DonorRegistration) -> Result<Donor, RegistryError> {
        validate_registration(&registration)?;

        let donor = Donor {
            id: DonorId(Self::next_id(&self.donor_sequence, "donor")),
            name: registration.name.trim().to_string(),
            email: registration.email.trim().to_string(),
            phone: registration.phone.trim().to_string(),
            blood_type: registration.blood_type,
            date_of_birth: registration.date_of_birth,
            gender: registration.gender.trim().to_string(),
            location: registration.location.trim().to_string(),
            last_donation_date: None,
            is_available: true,
            created_at: Utc::now(),
        };

        let stored = self.donors.insert(donor)?;
        info!(donor_id = %stored.id, blood_type = %stored.blood_type, "donor registered");
        Ok(stored)
    }

    pub fn donor(&self, donor_id: &DonorId) -> Result<Donor, RegistryError> {
        let donor = self
            .donors
            .fetch(donor_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(donor)
    }

    /// Available donors matching the query, newest first.
    pub fn find_donors(&self, query: &DonorQuery) -> Result<Vec<Donor>, RegistryError> {
        let donors = self.donors.list()?;
        let matched = search_donors(donors, query);
        debug!(matches = matched.len(), "donor search");
        Ok(matched)
    }

    /// Append a donation to the ledger and bump the donor's last donation date.
    ///
    /// Once the ledger append succeeds the donation is reported as recorded, even if the
    /// donor's last donation date could not be refreshed.
    pub fn record_donation(
        &self,
        donor_id: &DonorId,
        donation: NewDonation,
    ) -> Result<Donation, RegistryError> {
        validate_donation(&donation)?;
        let donor = self.donor(donor_id)?;

        let entry = Donation {
            id: DonationId(Self::next_id(&self.donation_sequence, "donation")),
            donor_id: donor.id,
            request_id: donation.request_id,
            donation_date: donation.donation_date,
            units_donated: donation.units_donated,
            location: donation.location.trim().to_string(),
            notes: donation.notes.filter(|notes| !notes.trim().is_empty()),
        };
        let stored = self.ledger.append(entry)?;

        if let Err(error) = self
            .donors
            .note_donation(&stored.donor_id, stored.donation_date)
        {
            warn!(
                donor_id = %stored.donor_id,
                donation_id = %stored.id.0,
                %error,
                "donation recorded without refreshing last donation date"
            );
        }

        info!(donor_id = %stored.donor_id, units = stored.units_donated, "donation recorded");
        Ok(stored)
    }

    pub fn donations(&self) -> Result<Vec<Donation>, RegistryError> {
        Ok(self.ledger.list()?)
    }

    /// Post a new open blood request.
    pub fn post_request(&self, request: NewBloodRequest) -> Result<BloodRequest, RegistryError> {
        validate_request(&request)?;

        let posted = BloodRequest {
            id: RequestId(Self::next_id(&self.request_sequence, "request")),
            patient_name: request.patient_name.trim().to_string(),
            blood_type: request.blood_type,
            units_needed: request.units_needed,
            urgency: request.urgency,
            hospital_name: request.hospital_name.trim().to_string(),
            hospital_location: request.hospital_location.trim().to_string(),
            contact_name: request.contact_name.trim().to_string(),
            contact_phone: request.contact_phone.trim().to_string(),
            contact_email: request.contact_email.trim().to_string(),
            details: request.details.filter(|details| !details.trim().is_empty()),
            status: RequestStatus::Open,
            created_at: Utc::now(),
            fulfilled_at: None,
        };

        let stored = self.board.insert(posted)?;
        info!(
            request_id = %stored.id,
            urgency = stored.urgency.label(),
            blood_type = %stored.blood_type,
            "blood request posted"
        );
        Ok(stored)
    }

    /// Open requests, newest first.
    pub fn open_requests(&self) -> Result<Vec<BloodRequest>, RegistryError> {
        let mut open: Vec<BloodRequest> = self
            .board
            .list()?
            .into_iter()
            .filter(|request| request.status == RequestStatus::Open)
            .collect();
        newest_first(&mut open, |request| request.created_at);
        Ok(open)
    }

    pub fn update_request_status(
        &self,
        request_id: &RequestId,
        status: RequestStatus,
    ) -> Result<BloodRequest, RegistryError> {
        let mut request = self
            .board
            .fetch(request_id)?
            .ok_or(RepositoryError::NotFound)?;

        request.status = status;
        request.fulfilled_at = match status {
            RequestStatus::Fulfilled => Some(request.fulfilled_at.unwrap_or_else(Utc::now)),
            RequestStatus::Open | RequestStatus::Cancelled => None,
        };
        self.board.update(request.clone())?;

        info!(request_id = %request.id, status = status.label(), "request status changed");
        Ok(request)
    }

    pub fn dashboard(&self) -> Result<DashboardStats, RegistryError> {
        let donors = self.donors.list()?;
        let donations = self.ledger.list()?;
        let requests = self.board.list()?;
        Ok(DashboardStats::compute(&donors, &donations, &requests))
    }
}

/// Error raised by the registry service.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
