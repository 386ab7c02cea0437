use super::domain::{DonorRegistration, NewBloodRequest, NewDonation};

/// Input rejected at the registry boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("please fill in {field}")]
    MissingField { field: &'static str },
    #[error("'{value}' is not a valid email address")]
    InvalidEmail { value: String },
    #[error("{field} must be at least 1")]
    ZeroQuantity { field: &'static str },
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}

fn require_email(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidEmail {
            value: trimmed.to_string(),
        }),
    }
}

pub(crate) fn validate_registration(registration: &DonorRegistration) -> Result<(), ValidationError> {
    require("name", &registration.name)?;
    require("email", &registration.email)?;
    require("phone", &registration.phone)?;
    require("gender", &registration.gender)?;
    require("location", &registration.location)?;
    require_email(&registration.email)
}

pub(crate) fn validate_donation(donation: &NewDonation) -> Result<(), ValidationError> {
    require("location", &donation.location)?;
    if donation.units_donated == 0 {
        return Err(ValidationError::ZeroQuantity {
            field: "units donated",
        });
    }
    Ok(())
}

pub(crate) fn validate_request(request: &NewBloodRequest) -> Result<(), ValidationError> {
    require("patient name", &request.patient_name)?;
    require("hospital name", &request.hospital_name)?;
    require("hospital location", &request.hospital_location)?;
    require("contact name", &request.contact_name)?;
    require("contact phone", &request.contact_phone)?;
    require("contact email", &request.contact_email)?;
    require_email(&request.contact_email)?;
    if request.units_needed == 0 {
        return Err(ValidationError::ZeroQuantity {
            field: "units needed",
        });
    }
    Ok(())
}
