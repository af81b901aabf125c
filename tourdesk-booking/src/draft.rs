use serde::{Deserialize, Serialize};
use tourdesk_shared::Masked;

/// Form fields, named as the form reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingField {
    FullName,
    Email,
    Phone,
    PartySize,
    PickupLocation,
    SpecialRequests,
}

impl BookingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingField::FullName => "fullName",
            BookingField::Email => "email",
            BookingField::Phone => "phone",
            BookingField::PartySize => "partySize",
            BookingField::PickupLocation => "pickupLocation",
            BookingField::SpecialRequests => "specialRequests",
        }
    }
}

impl std::fmt::Display for BookingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinates passed through from the host. Never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn pickup_text(&self) -> String {
        format!("Lat: {}, Lng: {}", self.latitude, self.longitude)
    }
}

/// Raw form values as typed. Updates go through `with_field`, which returns
/// a new draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub full_name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    /// Kept as typed; parsed on validation.
    pub party_size: String,
    pub pickup_location: String,
    pub special_requests: String,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: Masked::default(),
            phone: Masked::default(),
            party_size: "1".to_string(),
            pickup_location: String::new(),
            special_requests: String::new(),
        }
    }
}

impl BookingDraft {
    #[must_use]
    pub fn with_field(self, field: BookingField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            BookingField::FullName => Self { full_name: value, ..self },
            BookingField::Email => Self { email: Masked(value), ..self },
            BookingField::Phone => Self { phone: Masked(value), ..self },
            BookingField::PartySize => Self { party_size: value, ..self },
            BookingField::PickupLocation => Self { pickup_location: value, ..self },
            BookingField::SpecialRequests => Self { special_requests: value, ..self },
        }
    }

    pub fn value(&self, field: BookingField) -> &str {
        match field {
            BookingField::FullName => &self.full_name,
            BookingField::Email => self.email.expose(),
            BookingField::Phone => self.phone.expose(),
            BookingField::PartySize => &self.party_size,
            BookingField::PickupLocation => &self.pickup_location,
            BookingField::SpecialRequests => &self.special_requests,
        }
    }

    pub fn parsed_party_size(&self) -> Option<u32> {
        self.party_size.trim().parse::<u32>().ok().filter(|n| *n >= 1)
    }

    /// Typed pickup wins; a blank one falls back to the coordinates, if any.
    pub fn resolve_pickup(&self, geolocation: Option<GeoPoint>) -> String {
        let typed = self.pickup_location.trim();
        if !typed.is_empty() {
            return typed.to_string();
        }
        geolocation.map(|g| g.pickup_text()).unwrap_or_default()
    }
}
