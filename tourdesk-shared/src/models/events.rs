use chrono::Utc;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingConfirmedEvent {
    pub booking_id: String,
    pub tour_id: i64,
    pub number_of_people: u32,
    /// Absent when price times party size overflows
    pub total_price: Option<i64>,
    pub has_code: bool,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct AuthRequiredEvent {
    pub tour_id: i64,
    pub source: String, // "list" or "details"
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct AdvisorRequestedEvent {
    pub tour_id: i64,
    pub prompt: String,
    pub timestamp: i64,
}

impl AuthRequiredEvent {
    pub fn now(tour_id: i64, source: &str) -> Self {
        Self {
            tour_id,
            source: source.to_string(),
            timestamp: Utc::now().timestamp(),
        }
    }
}

impl AdvisorRequestedEvent {
    pub fn now(tour_id: i64, prompt: String) -> Self {
        Self {
            tour_id,
            prompt,
            timestamp: Utc::now().timestamp(),
        }
    }
}
