use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for reward tiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TierId(pub String);

/// Named achievement unlocked once a donor reaches `required_donations`.
///
/// Everything except `required_donations` is display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTier {
    pub id: TierId,
    pub required_donations: u32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub value: String,
    #[serde(default)]
    pub icon: String,
}

impl RewardTier {
    pub fn new(
        id: &str,
        required_donations: u32,
        name: &str,
        description: &str,
        category: &str,
        value: &str,
    ) -> Self {
        Self {
            id: TierId(id.to_string()),
            required_donations,
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            value: value.to_string(),
            icon: String::new(),
        }
    }

    fn with_icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("reward catalog must contain at least one tier")]
    Empty,
    #[error("duplicate reward tier id '{0}'")]
    DuplicateId(String),
    #[error("reward tier '{0}' must require at least one donation")]
    ZeroThreshold(String),
}

/// Fixed list of reward tiers in display order.
///
/// Display order is not threshold order; the progression engine never relies on sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardCatalog {
    tiers: Vec<RewardTier>,
}

impl RewardCatalog {
    pub fn new(tiers: Vec<RewardTier>) -> Result<Self, CatalogError> {
        if tiers.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for tier in &tiers {
            if !seen.insert(tier.id.0.as_str()) {
                return Err(CatalogError::DuplicateId(tier.id.0.clone()));
            }
            if tier.required_donations == 0 {
                return Err(CatalogError::ZeroThreshold(tier.id.0.clone()));
            }
        }

        Ok(Self { tiers })
    }

    /// The donor program's published tiers.
    pub fn standard() -> Self {
        let tiers = vec![
            RewardTier::new(
                "1",
                1,
                "Blood Donor Badge",
                "Recognized as an official blood donor",
                "Badge",
                "Digital badge for your profile",
            )
            .with_icon("🎖️"),
            RewardTier::new(
                "2",
                1,
                "First Time Hero",
                "Completed your first blood donation",
                "Certificate",
                "Digital certificate",
            )
            .with_icon("⭐"),
            RewardTier::new(
                "3",
                2,
                "Double Donor",
                "Donated blood twice - You have saved up to 6 lives",
                "Achievement",
                "$10 Gift Card",
            )
            .with_icon("🏆"),
            RewardTier::new(
                "4",
                3,
                "Triple Threat",
                "Completed three donations in your lifetime",
                "Achievement",
                "$25 Gift Card",
            )
            .with_icon("💎"),
            RewardTier::new(
                "5",
                5,
                "Platinum Donor",
                "Reached 5 donations - Exceptional commitment",
                "VIP Status",
                "Premium membership benefits",
            )
            .with_icon("👑"),
            RewardTier::new(
                "6",
                10,
                "Golden Heart",
                "Reached 10 donations - You are a true hero",
                "VIP Status",
                "Exclusive merchandise + $100 Gift Card",
            )
            .with_icon("🌟"),
            RewardTier::new(
                "7",
                8,
                "Gallon Club",
                "Donated 1 gallon of blood in your lifetime",
                "Elite",
                "Special recognition",
            )
            .with_icon("❤️"),
            RewardTier::new(
                "8",
                20,
                "Lifesaver Legend",
                "Reached 20 donations - You are a legend",
                "Elite",
                "Exclusive event invitation + $200 Gift Card",
            )
            .with_icon("✨"),
        ];

        Self { tiers }
    }

    pub fn list_tiers(&self) -> &[RewardTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl Default for RewardCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_keeps_display_order() {
        let catalog = RewardCatalog::standard();
        let names: Vec<&str> = catalog
            .list_tiers()
            .iter()
            .map(|tier| tier.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Blood Donor Badge",
                "First Time Hero",
                "Double Donor",
                "Triple Threat",
                "Platinum Donor",
                "Golden Heart",
                "Gallon Club",
                "Lifesaver Legend",
            ]
        );
        assert!(RewardCatalog::new(catalog.list_tiers().to_vec()).is_ok());
    }

    #[test]
    fn new_rejects_malformed_catalogs() {
        assert_eq!(RewardCatalog::new(Vec::new()), Err(CatalogError::Empty));

        let duplicate = vec![
            RewardTier::new("a", 1, "One", "", "Badge", ""),
            RewardTier::new("a", 2, "Two", "", "Badge", ""),
        ];
        assert_eq!(
            RewardCatalog::new(duplicate),
            Err(CatalogError::DuplicateId("a".to_string()))
        );

        let zero = vec![RewardTier::new("z", 0, "Zero", "", "Badge", "")];
        assert_eq!(
            RewardCatalog::new(zero),
            Err(CatalogError::ZeroThreshold("z".to_string()))
        );
    }
}
