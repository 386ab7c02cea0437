use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

use crate::workflows::registry::{Donation, DonationId, DonorId, RequestId};

#[derive(Debug)]
pub enum LedgerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDate { row: usize, value: String },
    InvalidUnits { row: usize },
}

impl std::fmt::Display for LedgerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerImportError::Io(err) => write!(f, "failed to read ledger export: {}", err),
            LedgerImportError::Csv(err) => write!(f, "invalid ledger CSV data: {}", err),
            LedgerImportError::InvalidDate { row, value } => write!(
                f,
                "row {}: '{}' is not a YYYY-MM-DD or RFC 3339 donation date",
                row, value
            ),
            LedgerImportError::InvalidUnits { row } => {
                write!(f, "row {}: units donated must be at least 1", row)
            }
        }
    }
}

impl std::error::Error for LedgerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerImportError::Io(err) => Some(err),
            LedgerImportError::Csv(err) => Some(err),
            LedgerImportError::InvalidDate { .. } | LedgerImportError::InvalidUnits { .. } => None,
        }
    }
}

impl From<std::io::Error> for LedgerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LedgerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads a CSV export of the hosted `donations` table.
pub struct LedgerImporter;

impl LedgerImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Donation>, LedgerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Donation>, LedgerImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut donations = Vec::new();

        for (index, record) in csv_reader.deserialize::<LedgerRow>().enumerate() {
            let row = record?;
            // Header is line 1.
            let line = index + 2;
            let donation_date =
                parse_date(&row.donation_date).ok_or_else(|| LedgerImportError::InvalidDate {
                    row: line,
                    value: row.donation_date.clone(),
                })?;
            let units_donated = match row.units_donated {
                Some(0) => return Err(LedgerImportError::InvalidUnits { row: line }),
                Some(units) => units,
                None => 1,
            };

            donations.push(Donation {
                id: DonationId(row.id),
                donor_id: DonorId(row.donor_id),
                request_id: row.request_id.map(RequestId),
                donation_date,
                units_donated,
                location: row.location.unwrap_or_default(),
                notes: row.notes,
            });
        }

        Ok(donations)
    }
}

#[derive(Debug, Deserialize)]
struct LedgerRow {
    id: String,
    donor_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    request_id: Option<String>,
    donation_date: String,
    #[serde(default)]
    units_donated: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc().date())
}
