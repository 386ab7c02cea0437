use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::registry::{
    BloodRequest, BloodType, Donor, DonorDirectory, DonorId, DonorRegistration,
    InMemoryDonationLedger, InMemoryDonorDirectory, InMemoryRequestBoard, NewBloodRequest,
    NewDonation, RegistryService, RepositoryError, RequestBoard, RequestId, Urgency,
};

pub(super) type MemoryRegistry =
    RegistryService<InMemoryDonorDirectory, InMemoryDonationLedger, InMemoryRequestBoard>;

pub(super) fn build_service() -> MemoryRegistry {
    RegistryService::new(
        Arc::new(InMemoryDonorDirectory::default()),
        Arc::new(InMemoryDonationLedger::default()),
        Arc::new(InMemoryRequestBoard::default()),
    )
}

pub(super) fn registration(name: &str, blood_type: BloodType, location: &str) -> DonorRegistration {
    DonorRegistration {
        name: name.to_string(),
        email: format!("{}@donors.test", name.to_lowercase().replace(' ', ".")),
        phone: "555-0199".to_string(),
        blood_type,
        date_of_birth: NaiveDate::from_ymd_opt(1988, 11, 23).expect("valid date"),
        gender: "male".to_string(),
        location: location.to_string(),
    }
}

pub(super) fn donation_on(year: i32, month: u32, day: u32) -> NewDonation {
    NewDonation {
        request_id: None,
        donation_date: NaiveDate::from_ymd_opt(year, month, day).expect("valid date"),
        units_donated: 1,
        location: "Mercy Blood Center".to_string(),
        notes: None,
    }
}

pub(super) fn blood_request(patient: &str, urgency: Urgency) -> NewBloodRequest {
    NewBloodRequest {
        patient_name: patient.to_string(),
        blood_type: BloodType::ONegative,
        units_needed: 2,
        urgency,
        hospital_name: "St. Luke's".to_string(),
        hospital_location: "Cedar Rapids".to_string(),
        contact_name: "Ward 4".to_string(),
        contact_phone: "555-0100".to_string(),
        contact_email: "ward4@stlukes.test".to_string(),
        details: Some("  ".to_string()),
    }
}

pub(super) struct OfflineBoard;

impl RequestBoard for OfflineBoard {
    fn insert(&self, _request: BloodRequest) -> Result<BloodRequest, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _request: BloodRequest) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &RequestId) -> Result<Option<BloodRequest>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<BloodRequest>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Directory whose reads never reflect a recorded donation, as if every fetch raced ahead of
/// the previous writer.
#[derive(Default)]
pub(super) struct StaleReadDirectory {
    pub(super) inner: InMemoryDonorDirectory,
}

impl DonorDirectory for StaleReadDirectory {
    fn insert(&self, donor: Donor) -> Result<Donor, RepositoryError> {
        self.inner.insert(donor)
    }

    fn note_donation(
        &self,
        id: &DonorId,
        donation_date: NaiveDate,
    ) -> Result<(), RepositoryError> {
        self.inner.note_donation(id, donation_date)
    }

    fn fetch(&self, id: &DonorId) -> Result<Option<Donor>, RepositoryError> {
        Ok(self.inner.fetch(id)?.map(|mut donor| {
            donor.last_donation_date = None;
            donor
        }))
    }

    fn list(&self) -> Result<Vec<Donor>, RepositoryError> {
        self.inner.list()
    }
}

/// Directory that serves reads but cannot record donation dates.
#[derive(Default)]
pub(super) struct ReadOnlyDirectory {
    pub(super) inner: InMemoryDonorDirectory,
}

impl DonorDirectory for ReadOnlyDirectory {
    fn insert(&self, donor: Donor) -> Result<Donor, RepositoryError> {
        self.inner.insert(donor)
    }

    fn note_donation(&self, _id: &DonorId, _date: NaiveDate) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("replica is read-only".to_string()))
    }

    fn fetch(&self, id: &DonorId) -> Result<Option<Donor>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn list(&self) -> Result<Vec<Donor>, RepositoryError> {
        self.inner.list()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
