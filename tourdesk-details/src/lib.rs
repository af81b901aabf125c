pub mod advisor;
pub mod presenter;

pub use advisor::{AdvisorPrompt, TravelAdvisor};
pub use presenter::{DetailsPresenter, DetailsView, ImageRef, GENERIC_ITINERARY};
