pub mod tour;
pub mod sorting;
pub mod loader;
pub mod controller;

pub use tour::{Catalog, CatalogError, TourOffer};
pub use sorting::{sort_offers, CatalogQuery, SortKey};
pub use loader::load_catalog;
pub use controller::{ActiveModal, BookRequest, TourListController};
