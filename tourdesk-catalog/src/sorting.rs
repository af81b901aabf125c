use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use crate::tour::TourOffer;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Default,
    PriceLow,
    PriceHigh,
    Rating,
    Newest,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Default,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Rating,
        SortKey::Newest,
    ];

    /// Absent or unrecognised keys fall back to `Default`.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some("price-low") => SortKey::PriceLow,
            Some("price-high") => SortKey::PriceHigh,
            Some("rating") => SortKey::Rating,
            Some("newest") => SortKey::Newest,
            _ => SortKey::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
        }
    }

    fn compare(&self, a: &TourOffer, b: &TourOffer) -> Ordering {
        match self {
            SortKey::Default => a.id.cmp(&b.id),
            SortKey::PriceLow => a.price.cmp(&b.price),
            SortKey::PriceHigh => b.price.cmp(&a.price),
            SortKey::Rating => b.rating_or_zero().total_cmp(&a.rating_or_zero()),
            SortKey::Newest => b.id.cmp(&a.id),
        }
    }
}

/// Stable sort over a copy; the source slice is left untouched.
pub fn sort_offers(offers: &[TourOffer], key: SortKey) -> Vec<TourOffer> {
    let mut sorted = offers.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    tracing::debug!("Sorted {} offers by {}", sorted.len(), key.as_str());
    sorted
}

/// Listing request: optional free-text filter plus sort order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogQuery {
    pub text: Option<String>,
    pub sort: SortKey,
}

impl CatalogQuery {
    pub fn apply(&self, offers: &[TourOffer]) -> Vec<TourOffer> {
        let filtered: Vec<TourOffer> = match self.text.as_deref() {
            Some(text) => offers.iter().filter(|o| o.matches_text(text)).cloned().collect(),
            None => offers.to_vec(),
        };
        sort_offers(&filtered, self.sort)
    }
}
