use std::sync::Arc;
use tourdesk_core::layout::{nearest_card_rect, ElementNode, PlacementRect};
use tourdesk_core::{AuthGate, Session};
use crate::sorting::{CatalogQuery, SortKey};
use crate::tour::{Catalog, CatalogError, TourOffer};

/// Which modal the listing currently has open, with the card bounds
/// captured when it was opened.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActiveModal {
    #[default]
    Closed,
    Details {
        offer_id: i64,
        anchor: Option<PlacementRect>,
    },
    Booking {
        offer_id: i64,
        anchor: Option<PlacementRect>,
    },
}

/// Request to open the booking form for an offer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookRequest {
    pub offer_id: i64,
    pub anchor: Option<PlacementRect>,
}

/// Owns the listing: query state, modal state and the booking gate.
pub struct TourListController {
    catalog: Arc<Catalog>,
    query: CatalogQuery,
    gate: AuthGate,
    active: ActiveModal,
}

impl TourListController {
    pub fn new(catalog: Arc<Catalog>, gate: AuthGate) -> Self {
        Self {
            catalog,
            query: CatalogQuery::default(),
            gate,
            active: ActiveModal::Closed,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &Session {
        self.gate.session()
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.query.sort = key;
    }

    pub fn set_search(&mut self, text: Option<String>) {
        self.query.text = text.filter(|t| !t.trim().is_empty());
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Offers in display order for the current query.
    pub fn visible(&self) -> Vec<TourOffer> {
        self.query.apply(self.catalog.offers())
    }

    pub fn active_modal(&self) -> ActiveModal {
        self.active
    }

    /// Open the details modal. Never gated.
    pub fn view_details(
        &mut self,
        offer_id: i64,
        path: &[ElementNode],
    ) -> Result<ActiveModal, CatalogError> {
        self.require(offer_id)?;

        self.active = ActiveModal::Details {
            offer_id,
            anchor: nearest_card_rect(path),
        };
        tracing::info!("Opened details for tour {}", offer_id);
        Ok(self.active)
    }

    /// "Book Now" on a card. Anonymous sessions trigger the auth prompt and
    /// leave the modal state untouched.
    pub fn book(
        &mut self,
        offer_id: i64,
        path: &[ElementNode],
    ) -> Result<Option<BookRequest>, CatalogError> {
        self.require(offer_id)?;

        if !self.gate.allow("book") {
            return Ok(None);
        }

        let request = BookRequest {
            offer_id,
            anchor: nearest_card_rect(path),
        };
        self.open_booking(request);
        Ok(Some(request))
    }

    /// Switch to the booking form after the details modal approved a
    /// "Book Now" (it runs its own auth check).
    pub fn book_from_details(&mut self, request: BookRequest) -> Result<ActiveModal, CatalogError> {
        self.require(request.offer_id)?;
        self.open_booking(request);
        Ok(self.active)
    }

    pub fn close_modal(&mut self) {
        self.active = ActiveModal::Closed;
    }

    fn open_booking(&mut self, request: BookRequest) {
        self.active = ActiveModal::Booking {
            offer_id: request.offer_id,
            anchor: request.anchor,
        };
        tracing::info!("Opened booking form for tour {}", request.offer_id);
    }

    fn require(&self, offer_id: i64) -> Result<&TourOffer, CatalogError> {
        self.catalog.get(offer_id).ok_or(CatalogError::NotFound(offer_id))
    }
}
