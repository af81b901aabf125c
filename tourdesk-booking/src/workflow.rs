use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tourdesk_catalog::TourOffer;
use tourdesk_core::app_config::{BookingConfig, LayoutConfig};
use tourdesk_core::layout::{place_modal, Placement, PlacementRect, Viewport};
use tourdesk_shared::models::events::BookingConfirmedEvent;
use crate::draft::{BookingDraft, BookingField, GeoPoint};
use crate::encoder::{CodeEncoder, EncodedImage};
use crate::models::{BookingPayload, ConfirmedBooking};
use crate::validation::{validate, ValidationErrors};

/// Host callback receiving each confirmed booking.
pub trait BookingListener: Send + Sync {
    fn booking_confirmed(&self, booking: ConfirmedBooking);
}

impl<F> BookingListener for F
where
    F: Fn(ConfirmedBooking) + Send + Sync,
{
    fn booking_confirmed(&self, booking: ConfirmedBooking) {
        self(booking)
    }
}

/// Collaborators injected by the host.
#[derive(Clone)]
pub struct BookingServices {
    pub encoder: Arc<dyn CodeEncoder>,
    pub listener: Arc<dyn BookingListener>,
}

/// What the confirmation screen shows in place of the code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "image", rename_all = "snake_case")]
pub enum CodeDisplay {
    Ready(EncodedImage),
    /// Encoding failed; the placeholder stays up.
    Generating,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confirmation {
    pub booking: ConfirmedBooking,
    pub code: CodeDisplay,
}

impl Confirmation {
    pub fn to_event(&self) -> BookingConfirmedEvent {
        BookingConfirmedEvent {
            booking_id: self.booking.id.clone(),
            tour_id: self.booking.tour_id,
            number_of_people: self.booking.number_of_people,
            total_price: self.booking.total_price(),
            has_code: matches!(self.code, CodeDisplay::Ready(_)),
            timestamp: self.booking.created_at.timestamp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Form,
    Confirmation(Confirmation),
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Booking form has errors: {0}")]
    Invalid(ValidationErrors),

    #[error("Booking already confirmed: {0}")]
    AlreadyConfirmed(String),
}

/// One open booking modal. `Form → Confirmation` only; reopening means
/// building a new workflow.
pub struct BookingWorkflow {
    offer: TourOffer,
    anchor: Option<PlacementRect>,
    geolocation: Option<GeoPoint>,
    draft: BookingDraft,
    errors: ValidationErrors,
    stage: Stage,
    settings: BookingConfig,
    services: BookingServices,
}

impl BookingWorkflow {
    pub fn open(
        offer: TourOffer,
        anchor: Option<PlacementRect>,
        geolocation: Option<GeoPoint>,
        settings: BookingConfig,
        services: BookingServices,
    ) -> Self {
        tracing::debug!("Booking form opened for tour {}", offer.id);
        Self {
            offer,
            anchor,
            geolocation,
            draft: BookingDraft::default(),
            errors: ValidationErrors::default(),
            stage: Stage::Form,
            settings,
            services,
        }
    }

    pub fn offer(&self) -> &TourOffer {
        &self.offer
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        match &self.stage {
            Stage::Confirmation(c) => Some(c),
            Stage::Form => None,
        }
    }

    /// Placeholder for the pickup field when geolocation is known.
    pub fn pickup_hint(&self) -> Option<String> {
        self.geolocation.map(|g| g.pickup_text())
    }

    pub fn placement(&self, viewport: Viewport, layout: &LayoutConfig) -> Placement {
        place_modal(self.anchor, viewport, &layout.booking, layout.inset_px)
    }

    /// Apply a keystroke. Clears that field's error only; nothing else is
    /// re-validated.
    pub fn edit(&mut self, field: BookingField, value: impl Into<String>) {
        if matches!(self.stage, Stage::Confirmation(_)) {
            return;
        }

        self.draft = std::mem::take(&mut self.draft).with_field(field, value);
        if self.errors.contains(field) {
            self.errors = std::mem::take(&mut self.errors).without(field);
        }
    }

    /// Validate, encode and confirm. The listener fires exactly once, after
    /// the encode attempt has resolved, whatever its outcome.
    pub async fn submit(&mut self) -> Result<ConfirmedBooking, WorkflowError> {
        if let Stage::Confirmation(c) = &self.stage {
            return Err(WorkflowError::AlreadyConfirmed(c.booking.id.clone()));
        }

        let report = validate(&self.draft);
        self.errors = report.errors();
        if !report.is_valid() {
            tracing::info!(
                "Booking for tour {} blocked on fields: {}",
                self.offer.id,
                self.errors.fields().map(|f| f.as_str()).collect::<Vec<_>>().join(",")
            );
            return Err(WorkflowError::Invalid(self.errors.clone()));
        }

        let number_of_people = self
            .draft
            .parsed_party_size()
            .ok_or_else(|| WorkflowError::Invalid(self.errors.clone()))?;

        let created_at = Utc::now();
        let payload = BookingPayload {
            booking_id: BookingPayload::booking_id(&self.settings.booking_id_prefix, created_at),
            tour_id: self.offer.id,
            tour_title: self.offer.title.clone(),
            agency: self.offer.agency.clone(),
            customer_name: self.draft.full_name.trim().to_string(),
            email: self.draft.email.expose().trim().to_string().into(),
            phone: self.draft.phone.expose().trim().to_string().into(),
            number_of_people,
            pickup_location: self.draft.resolve_pickup(self.geolocation),
            special_requests: self.draft.special_requests.trim().to_string(),
            created_at,
        };

        let code = self.encode(&payload).await;
        let booking = ConfirmedBooking::new(&payload, &self.offer);

        tracing::info!(
            booking_id = %booking.id,
            tour_id = booking.tour_id,
            email = ?booking.email,
            people = booking.number_of_people,
            "Booking confirmed"
        );

        self.stage = Stage::Confirmation(Confirmation {
            booking: booking.clone(),
            code,
        });
        self.draft = BookingDraft::default();
        self.services.listener.booking_confirmed(booking.clone());

        Ok(booking)
    }

    async fn encode(&self, payload: &BookingPayload) -> CodeDisplay {
        let data = match payload.to_code_string() {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Failed to serialize booking {}: {}", payload.booking_id, e);
                return CodeDisplay::Generating;
            }
        };

        match self.services.encoder.encode(&data, self.settings.qr_size_px).await {
            Ok(image) => CodeDisplay::Ready(image),
            Err(e) => {
                tracing::error!(
                    "Failed to generate code for booking {}: {}",
                    payload.booking_id,
                    e
                );
                CodeDisplay::Generating
            }
        }
    }
}
