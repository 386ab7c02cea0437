//! Donor directory, donation ledger and blood request board.
//!
//! Storage sits behind the repository traits so the hosted database can be swapped for the
//! in-memory adapters in tests and demos.

mod dashboard;
pub mod domain;
pub mod memory;
pub mod repository;
pub mod router;
mod search;
pub mod service;
mod validation;

#[cfg(test)]
mod tests;

pub use dashboard::{donors_by_blood_type, BloodTypeCount, DashboardStats, LIVES_PER_DONATION};
pub use domain::{
    BloodRequest, BloodType, Donation, DonationId, Donor, DonorId, DonorRegistration,
    NewBloodRequest, NewDonation, RequestId, RequestStatus, UnknownBloodType, Urgency,
};
pub use memory::{InMemoryDonationLedger, InMemoryDonorDirectory, InMemoryRequestBoard};
pub use repository::{DonationLedger, DonorDirectory, RepositoryError, RequestBoard};
pub use router::registry_router;
pub use search::DonorQuery;
pub use service::{RegistryError, RegistryService};
pub use validation::ValidationError;
