use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier wrapper for registered donors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DonorId(pub String);

/// Identifier wrapper for ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DonationId(pub String);

/// Identifier wrapper for posted blood requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl fmt::Display for DonorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ABO/Rh blood groups accepted by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BloodType {
    APositive,
    ANegative,
    BPositive,
    BNegative,
    AbPositive,
    AbNegative,
    OPositive,
    ONegative,
}

impl BloodType {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::APositive,
            Self::ANegative,
            Self::BPositive,
            Self::BNegative,
            Self::AbPositive,
            Self::AbNegative,
            Self::OPositive,
            Self::ONegative,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blood type '{0}'")]
pub struct UnknownBloodType(pub String);

impl FromStr for BloodType {
    type Err = UnknownBloodType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        Self::ordered()
            .into_iter()
            .find(|blood_type| blood_type.label() == normalized)
            .ok_or_else(|| UnknownBloodType(raw.to_string()))
    }
}

impl Serialize for BloodType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for BloodType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Registered donor as stored in the donor directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donor {
    pub id: DonorId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub blood_type: BloodType,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub location: String,
    pub last_donation_date: Option<NaiveDate>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// Sign-up form payload. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub blood_type: BloodType,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub location: String,
}

/// A single completed donation attributed to one donor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub id: DonationId,
    pub donor_id: DonorId,
    #[serde(default)]
    pub request_id: Option<RequestId>,
    pub donation_date: NaiveDate,
    pub units_donated: u32,
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDonation {
    #[serde(default)]
    pub request_id: Option<RequestId>,
    pub donation_date: NaiveDate,
    pub units_donated: u32,
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Critical,
    Urgent,
    #[default]
    Normal,
}

impl Urgency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Urgent => "urgent",
            Self::Normal => "normal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Open,
    Fulfilled,
    Cancelled,
}

impl RequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Fulfilled => "fulfilled",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Blood request posted on behalf of a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: RequestId,
    pub patient_name: String,
    pub blood_type: BloodType,
    pub units_needed: u32,
    pub urgency: Urgency,
    pub hospital_name: String,
    pub hospital_location: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub details: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub fulfilled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBloodRequest {
    pub patient_name: String,
    pub blood_type: BloodType,
    pub units_needed: u32,
    #[serde(default)]
    pub urgency: Urgency,
    pub hospital_name: String,
    pub hospital_location: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
    #[serde(default)]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blood_type_parses_loosely_and_serializes_canonically() {
        assert_eq!("ab+".parse::<BloodType>(), Ok(BloodType::AbPositive));
        assert_eq!(" O - ".parse::<BloodType>(), Ok(BloodType::ONegative));
        assert!("C+".parse::<BloodType>().is_err());

        let json = serde_json::to_string(&BloodType::BNegative).expect("serialize");
        assert_eq!(json, "\"B-\"");
        let parsed: BloodType = serde_json::from_str("\"a+\"").expect("deserialize");
        assert_eq!(parsed, BloodType::APositive);
    }

    #[test]
    fn new_request_defaults_to_normal_urgency() {
        let payload = serde_json::json!({
            "patient_name": "R. Osei",
            "blood_type": "O-",
            "units_needed": 2,
            "hospital_name": "St. Luke's",
            "hospital_location": "Cedar Rapids",
            "contact_name": "Ward 4",
            "contact_phone": "555-0100",
            "contact_email": "ward4@stlukes.test"
        });
        let request: NewBloodRequest = serde_json::from_value(payload).expect("valid payload");
        assert_eq!(request.urgency, Urgency::Normal);
        assert!(request.details.is_none());
    }
}
