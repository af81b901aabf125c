use serde::Deserialize;
use std::env;
use crate::layout::{ModalSize, DEFAULT_INSET_PX};
use crate::CoreResult;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub booking: BookingConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LayoutConfig {
    pub inset_px: f64,
    pub details: ModalSize,
    pub booking: ModalSize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            inset_px: DEFAULT_INSET_PX,
            details: ModalSize::details(),
            booking: ModalSize::booking(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BookingConfig {
    /// Edge length of the rendered QR code
    pub qr_size_px: u32,
    pub booking_id_prefix: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            qr_size_px: 200,
            booking_id_prefix: "TOUR".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "config/catalog.json".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> CoreResult<Self> {
        let dir = env::var("TOURDESK_CONFIG_DIR").unwrap_or_else(|_| "config".into());
        Self::load_from(&dir)
    }

    pub fn load_from(dir: &str) -> CoreResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Every file is optional, built-in defaults fill the gaps
            .add_source(config::File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // Eg. `TOURDESK_BOOKING__QR_SIZE_PX=256`
            .add_source(
                config::Environment::with_prefix("TOURDESK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        self.layout.details.validate()?;
        self.layout.booking.validate()?;
        Ok(())
    }
}
