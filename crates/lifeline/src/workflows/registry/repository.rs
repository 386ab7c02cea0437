use chrono::NaiveDate;

use super::domain::{BloodRequest, Donation, Donor, DonorId, RequestId};

/// Storage abstraction over the donor table so services can be exercised in isolation.
///
/// `list` returns donors in insertion order.
pub trait DonorDirectory: Send + Sync {
    fn insert(&self, donor: Donor) -> Result<Donor, RepositoryError>;
    /// Move `last_donation_date` forward to `donation_date` unless a later date is already
    /// recorded. Compare and write happen atomically.
    fn note_donation(&self, id: &DonorId, donation_date: NaiveDate) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &DonorId) -> Result<Option<Donor>, RepositoryError>;
    fn list(&self) -> Result<Vec<Donor>, RepositoryError>;
}

/// Append-only donation ledger.
pub trait DonationLedger: Send + Sync {
    fn append(&self, donation: Donation) -> Result<Donation, RepositoryError>;
    fn list(&self) -> Result<Vec<Donation>, RepositoryError>;
}

/// Blood request board. `list` returns requests in insertion order.
pub trait RequestBoard: Send + Sync {
    fn insert(&self, request: BloodRequest) -> Result<BloodRequest, RepositoryError>;
    fn update(&self, request: BloodRequest) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RequestId) -> Result<Option<BloodRequest>, RepositoryError>;
    fn list(&self) -> Result<Vec<BloodRequest>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
