use serde::{Deserialize, Deserializer};

use super::domain::{BloodType, Donor};

/// Filters accepted by the donor search page.
///
/// In query strings the `+` of a blood type must be percent-encoded (`A%2B`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DonorQuery {
    #[serde(default, deserialize_with = "blood_type_filter")]
    pub blood_type: Option<BloodType>,
    #[serde(default)]
    pub search: Option<String>,
}

impl DonorQuery {
    pub fn matches(&self, donor: &Donor) -> bool {
        if let Some(blood_type) = self.blood_type {
            if donor.blood_type != blood_type {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                donor.name.to_lowercase().contains(&needle)
                    || donor.location.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }
}

/// Blank and `all` mean no blood type filter.
fn blood_type_filter<'de, D>(deserializer: D) -> Result<Option<BloodType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Available donors matching `query`, newest registration first.
pub(crate) fn search_donors(mut donors: Vec<Donor>, query: &DonorQuery) -> Vec<Donor> {
    donors.retain(|donor| donor.is_available && query.matches(donor));
    newest_first(&mut donors, |donor| donor.created_at);
    donors
}

/// Sorts by descending timestamp. Ties keep the later-inserted record first, so callers
/// must pass records in insertion order.
pub(crate) fn newest_first<T, K, F>(records: &mut [T], key: F)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    records.reverse();
    records.sort_by(|left, right| key(right).cmp(&key(left)));
}
