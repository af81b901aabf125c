use tourdesk_catalog::TourOffer;

/// Advisory collaborator behind the "Ask AI" button.
pub trait TravelAdvisor: Send + Sync {
    fn ask_about(&self, offer: &TourOffer);
}

impl<F> TravelAdvisor for F
where
    F: Fn(&TourOffer) + Send + Sync,
{
    fn ask_about(&self, offer: &TourOffer) {
        self(offer)
    }
}

/// Question text a host can hand to its assistant for an offer.
pub struct AdvisorPrompt;

impl AdvisorPrompt {
    pub fn for_offer(offer: &TourOffer) -> String {
        let mut prompt = format!(
            "Tell me about the \"{}\" tour by {} priced at {}.",
            offer.title, offer.agency, offer.price
        );

        if let Some(rating) = offer.rating {
            prompt.push_str(&format!(
                " It is rated {:.1}/5 from {} reviews.",
                rating, offer.review_count
            ));
        }
        if !offer.features.is_empty() {
            prompt.push_str(&format!(" Included: {}.", offer.features.join(", ")));
        }
        prompt.push_str(" Is it a good choice and what should I prepare?");
        prompt
    }
}
