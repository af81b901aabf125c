pub mod app_config;
pub mod identity;
pub mod layout;

pub use identity::{AuthGate, AuthPrompt, CurrentUser, Session};
pub use layout::{ElementNode, ModalSize, Placement, PlacementRect, Viewport};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
