use serde::Serialize;
use std::sync::Arc;
use tourdesk_catalog::{BookRequest, TourOffer};
use tourdesk_core::app_config::LayoutConfig;
use tourdesk_core::layout::{place_modal, Placement, PlacementRect, Viewport};
use tourdesk_core::AuthGate;
use crate::advisor::TravelAdvisor;

/// Shown when an offer has no itinerary of its own.
pub const GENERIC_ITINERARY: [&str; 5] = [
    "Day 1: Departure and arrival at the destination",
    "Day 2: Guided sightseeing of the main attractions",
    "Day 3: Free time for adventure activities",
    "Day 4: Local culture and cuisine experience",
    "Day 5: Return journey",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "src", rename_all = "snake_case")]
pub enum ImageRef {
    Url(String),
    Placeholder,
}

/// Everything the details modal renders for one offer, fallbacks applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailsView {
    pub id: i64,
    pub title: String,
    pub agency: String,
    pub price: i64,
    pub rating: f64,
    pub review_count: u32,
    pub features: Vec<String>,
    pub itinerary: Vec<String>,
    pub description: String,
    pub image: ImageRef,
}

impl DetailsView {
    pub fn from_offer(offer: &TourOffer) -> Self {
        let itinerary = if offer.itinerary.is_empty() {
            GENERIC_ITINERARY.iter().map(|s| s.to_string()).collect()
        } else {
            offer.itinerary.clone()
        };

        let description = match offer.description.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => generic_description(&offer.agency),
        };

        let image = match &offer.image {
            Some(src) if !src.is_empty() => ImageRef::Url(src.clone()),
            _ => ImageRef::Placeholder,
        };

        Self {
            id: offer.id,
            title: offer.title.clone(),
            agency: offer.agency.clone(),
            price: offer.price,
            rating: offer.rating_or_zero(),
            review_count: offer.review_count,
            features: offer.features.clone(),
            itinerary,
            description,
            image,
        }
    }
}

fn generic_description(agency: &str) -> String {
    format!(
        "Experience an unforgettable journey organised by {}. Comfortable travel and \
         experienced local guides are part of every departure.",
        agency
    )
}

/// Details modal for a single offer. Open/closed state belongs to the parent.
pub struct DetailsPresenter {
    offer: TourOffer,
    anchor: Option<PlacementRect>,
    gate: AuthGate,
    advisor: Arc<dyn TravelAdvisor>,
}

impl DetailsPresenter {
    pub fn new(
        offer: TourOffer,
        anchor: Option<PlacementRect>,
        gate: AuthGate,
        advisor: Arc<dyn TravelAdvisor>,
    ) -> Self {
        Self { offer, anchor, gate, advisor }
    }

    pub fn offer(&self) -> &TourOffer {
        &self.offer
    }

    pub fn view(&self) -> DetailsView {
        DetailsView::from_offer(&self.offer)
    }

    pub fn placement(&self, viewport: Viewport, layout: &LayoutConfig) -> Placement {
        place_modal(self.anchor, viewport, &layout.details, layout.inset_px)
    }

    /// The presenter can be opened without going through the list, so it
    /// checks authentication itself.
    pub fn book_now(&self) -> Option<BookRequest> {
        if !self.gate.allow("book") {
            return None;
        }

        tracing::info!("Book requested from details for tour {}", self.offer.id);
        Some(BookRequest {
            offer_id: self.offer.id,
            anchor: self.anchor,
        })
    }

    pub fn ask_ai(&self) {
        tracing::info!("Forwarding tour {} to advisor", self.offer.id);
        self.advisor.ask_about(&self.offer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tourdesk_core::Session;

    fn offer() -> TourOffer {
        TourOffer {
            id: 11,
            title: "Skardu & Deosai".to_string(),
            agency: "Karakoram Explorers".to_string(),
            price: 54000,
            rating: Some(4.9),
            review_count: 210,
            features: vec!["Jeep Safari".to_string()],
            itinerary: Vec::new(),
            image: None,
            description: None,
        }
    }

    fn gate(session: Session, prompts: Arc<AtomicUsize>) -> AuthGate {
        AuthGate::new(session, Arc::new(move || {
            prompts.fetch_add(1, Ordering::SeqCst);
        }))
    }

    fn presenter(
        session: Session,
        prompts: Arc<AtomicUsize>,
        asked: Arc<Mutex<Vec<i64>>>,
    ) -> DetailsPresenter {
        let anchor = Some(PlacementRect::new(100.0, 100.0, 300.0, 400.0));
        let advisor = move |offer: &TourOffer| asked.lock().unwrap().push(offer.id);
        DetailsPresenter::new(offer(), anchor, gate(session, prompts), Arc::new(advisor))
    }

    #[test]
    fn test_view_falls_back_to_generic_content() {
        let view = DetailsView::from_offer(&offer());

        assert_eq!(view.itinerary.len(), 5);
        assert_eq!(view.itinerary[0], GENERIC_ITINERARY[0]);
        assert!(view.description.contains("Karakoram Explorers"));
        assert_eq!(view.image, ImageRef::Placeholder);
    }

    #[test]
    fn test_view_keeps_explicit_content() {
        let mut tour = offer();
        tour.itinerary = vec!["Fly to Skardu".to_string(), "Deosai plains".to_string()];
        tour.description = Some("High-altitude plateau trip.".to_string());
        tour.image = Some("/img/deosai.jpg".to_string());

        let view = DetailsView::from_offer(&tour);
        assert_eq!(view.itinerary, tour.itinerary);
        assert_eq!(view.description, "High-altitude plateau trip.");
        assert_eq!(view.image, ImageRef::Url("/img/deosai.jpg".to_string()));
    }

    #[test]
    fn test_anonymous_book_now_prompts_once() {
        let prompts = Arc::new(AtomicUsize::new(0));
        let details = presenter(Session::anonymous(), prompts.clone(), Arc::default());

        assert!(details.book_now().is_none());
        assert_eq!(prompts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_signed_in_book_now_carries_anchor() {
        let prompts = Arc::new(AtomicUsize::new(0));
        let details = presenter(Session::signed_in("user-9"), prompts.clone(), Arc::default());

        let request = details.book_now().unwrap();
        assert_eq!(request.offer_id, 11);
        assert!(request.anchor.is_some());
        assert_eq!(prompts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_ask_ai_is_not_gated() {
        let asked = Arc::new(Mutex::new(Vec::new()));
        let prompts = Arc::new(AtomicUsize::new(0));
        let details = presenter(Session::anonymous(), prompts.clone(), asked.clone());

        details.ask_ai();

        assert_eq!(*asked.lock().unwrap(), vec![11]);
        assert_eq!(prompts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_placement_uses_details_size() {
        let details = presenter(Session::anonymous(), Arc::default(), Arc::default());
        let placement = details.placement(Viewport::new(1440.0, 900.0), &LayoutConfig::default());

        assert_eq!(placement.width(), 672.0);
        assert_eq!(placement.max_height(), 810.0);
    }
}
