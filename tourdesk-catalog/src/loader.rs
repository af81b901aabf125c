use std::path::Path;
use crate::tour::{Catalog, CatalogError, TourOffer};

/// Read a JSON array of offers and validate it into a `Catalog`.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let catalog = parse_catalog(&raw)?;
    tracing::info!("Loaded {} tours from {}", catalog.len(), path.display());
    Ok(catalog)
}

pub fn parse_catalog(raw: &str) -> Result<Catalog, CatalogError> {
    let offers: Vec<TourOffer> = serde_json::from_str(raw)?;
    Catalog::new(offers)
}
