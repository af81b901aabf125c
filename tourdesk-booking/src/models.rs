use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tourdesk_catalog::TourOffer;
use tourdesk_shared::Masked;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
}

/// Canonical record that gets encoded into the scannable code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub booking_id: String,
    pub tour_id: i64,
    pub tour_title: String,
    pub agency: String,
    pub customer_name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub number_of_people: u32,
    pub pickup_location: String,
    pub special_requests: String,
    pub created_at: DateTime<Utc>,
}

impl BookingPayload {
    /// Booking ids are derived from the creation time.
    pub fn booking_id(prefix: &str, created_at: DateTime<Utc>) -> String {
        format!("{}-{}", prefix, created_at.timestamp_millis())
    }

    pub fn to_code_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The finalized booking handed to the host. Never modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedBooking {
    pub id: String,
    pub tour_id: i64,
    pub tour_title: String,
    pub agency: String,
    pub price: i64,
    pub full_name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub number_of_people: u32,
    pub pickup_location: String,
    pub special_requests: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl ConfirmedBooking {
    pub fn new(payload: &BookingPayload, offer: &TourOffer) -> Self {
        Self {
            id: payload.booking_id.clone(),
            tour_id: offer.id,
            tour_title: offer.title.clone(),
            agency: offer.agency.clone(),
            price: offer.price,
            full_name: payload.customer_name.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
            number_of_people: payload.number_of_people,
            pickup_location: payload.pickup_location.clone(),
            special_requests: payload.special_requests.clone(),
            status: BookingStatus::Confirmed,
            created_at: payload.created_at,
        }
    }

    /// Price for the whole party; `None` when it does not fit in an `i64`.
    pub fn total_price(&self) -> Option<i64> {
        self.price.checked_mul(i64::from(self.number_of_people))
    }
}
