pub mod models;
pub mod draft;
pub mod validation;
pub mod encoder;
pub mod workflow;

pub use models::{BookingPayload, BookingStatus, ConfirmedBooking};
pub use draft::{BookingDraft, BookingField, GeoPoint};
pub use validation::{validate, FieldStatus, ValidationErrors, ValidationReport};
pub use encoder::{CodeEncoder, EncodeError, EncodedImage, QrSvgEncoder};
pub use workflow::{
    BookingListener, BookingServices, BookingWorkflow, CodeDisplay, Confirmation, Stage,
    WorkflowError,
};
