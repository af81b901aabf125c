use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A purchasable tour package. Loaded once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TourOffer {
    pub id: i64,
    pub title: String,
    pub agency: String,
    /// Currency-agnostic integer units
    pub price: i64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TourOffer {
    /// Rating used for ordering; missing counts as zero.
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(&needle)
            || self.agency.to_lowercase().contains(&needle)
            || self.features.iter().any(|f| f.to_lowercase().contains(&needle))
    }
}

/// The fixed, validated offer collection.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    offers: Vec<TourOffer>,
}

impl Catalog {
    pub fn new(offers: Vec<TourOffer>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();

        for offer in &offers {
            if !seen.insert(offer.id) {
                return Err(CatalogError::DuplicateId(offer.id));
            }
            if offer.price <= 0 {
                return Err(CatalogError::InvalidOffer {
                    id: offer.id,
                    reason: format!("price must be positive, got {}", offer.price),
                });
            }
            if let Some(rating) = offer.rating {
                if !(0.0..=5.0).contains(&rating) {
                    return Err(CatalogError::InvalidOffer {
                        id: offer.id,
                        reason: format!("rating must be within 0-5, got {}", rating),
                    });
                }
            }
        }

        Ok(Self { offers })
    }

    /// Offers in source order.
    pub fn offers(&self) -> &[TourOffer] {
        &self.offers
    }

    pub fn get(&self, id: i64) -> Option<&TourOffer> {
        self.offers.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate tour id: {0}")]
    DuplicateId(i64),

    #[error("Invalid tour {id}: {reason}")]
    InvalidOffer { id: i64, reason: String },

    #[error("Tour not found: {0}")]
    NotFound(i64),

    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
