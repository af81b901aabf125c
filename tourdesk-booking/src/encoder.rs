use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use qrcode::render::svg;
use qrcode::QrCode;
use serde::Serialize;

/// Displayable image reference (a data URI for the built-in encoder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EncodedImage(pub String);

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("QR encoding failed: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("Encoder unavailable: {0}")]
    Unavailable(String),
}

/// Turns the serialized booking into a scannable image.
#[async_trait]
pub trait CodeEncoder: Send + Sync {
    async fn encode(&self, data: &str, size_px: u32) -> Result<EncodedImage, EncodeError>;
}

/// Renders an SVG QR code and returns it as a base64 data URI.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrSvgEncoder;

#[async_trait]
impl CodeEncoder for QrSvgEncoder {
    async fn encode(&self, data: &str, size_px: u32) -> Result<EncodedImage, EncodeError> {
        let code = QrCode::new(data.as_bytes())?;
        let image = code
            .render()
            .min_dimensions(size_px, size_px)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();

        Ok(EncodedImage(format!("data:image/svg+xml;base64,{}", STANDARD.encode(image))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_encodes_svg_data_uri() {
        let image = QrSvgEncoder.encode(r#"{"bookingId":"TOUR-1"}"#, 200).await.unwrap();

        let encoded = image.0.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let svg = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[tokio::test]
    async fn test_oversized_payload_fails() {
        let data = "x".repeat(8000);
        let result = QrSvgEncoder.encode(&data, 200).await;

        assert!(matches!(result, Err(EncodeError::Qr(_))));
    }
}
