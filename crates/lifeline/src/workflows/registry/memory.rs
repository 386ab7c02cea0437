//! Process-local adapters for the registry repositories.
//!
//! These back the HTTP service and CLI demo until a hosted database adapter is wired in.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use super::domain::{BloodRequest, Donation, Donor, DonorId, RequestId};
use super::repository::{DonationLedger, DonorDirectory, RepositoryError, RequestBoard};

#[derive(Default, Clone)]
pub struct InMemoryDonorDirectory {
    donors: Arc<Mutex<Vec<Donor>>>,
}

impl DonorDirectory for InMemoryDonorDirectory {
    fn insert(&self, donor: Donor) -> Result<Donor, RepositoryError> {
        let mut guard = self.donors.lock().expect("donor mutex poisoned");
        if guard.iter().any(|existing| existing.id == donor.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(donor.clone());
        Ok(donor)
    }

    fn note_donation(
        &self,
        id: &DonorId,
        donation_date: NaiveDate,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.donors.lock().expect("donor mutex poisoned");
        let donor = guard
            .iter_mut()
            .find(|existing| &existing.id == id)
            .ok_or(RepositoryError::NotFound)?;
        if donor
            .last_donation_date
            .map_or(true, |last| donation_date > last)
        {
            donor.last_donation_date = Some(donation_date);
        }
        Ok(())
    }

    fn fetch(&self, id: &DonorId) -> Result<Option<Donor>, RepositoryError> {
        let guard = self.donors.lock().expect("donor mutex poisoned");
        Ok(guard.iter().find(|donor| &donor.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Donor>, RepositoryError> {
        Ok(self.donors.lock().expect("donor mutex poisoned").clone())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryDonationLedger {
    entries: Arc<Mutex<Vec<Donation>>>,
}

impl InMemoryDonationLedger {
    /// Seed the ledger from an imported export.
    pub fn with_entries(entries: Vec<Donation>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }
}

impl DonationLedger for InMemoryDonationLedger {
    fn append(&self, donation: Donation) -> Result<Donation, RepositoryError> {
        let mut guard = self.entries.lock().expect("ledger mutex poisoned");
        if guard.iter().any(|existing| existing.id == donation.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(donation.clone());
        Ok(donation)
    }

    fn list(&self) -> Result<Vec<Donation>, RepositoryError> {
        Ok(self.entries.lock().expect("ledger mutex poisoned").clone())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryRequestBoard {
    requests: Arc<Mutex<Vec<BloodRequest>>>,
}

impl RequestBoard for InMemoryRequestBoard {
    fn insert(&self, request: BloodRequest) -> Result<BloodRequest, RepositoryError> {
        let mut guard = self.requests.lock().expect("request mutex poisoned");
        if guard.iter().any(|existing| existing.id == request.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(request.clone());
        Ok(request)
    }

    fn update(&self, request: BloodRequest) -> Result<(), RepositoryError> {
        let mut guard = self.requests.lock().expect("request mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == request.id) {
            Some(slot) => {
                *slot = request;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &RequestId) -> Result<Option<BloodRequest>, RepositoryError> {
        let guard = self.requests.lock().expect("request mutex poisoned");
        Ok(guard.iter().find(|request| &request.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<BloodRequest>, RepositoryError> {
        Ok(self.requests.lock().expect("request mutex poisoned").clone())
    }
}
