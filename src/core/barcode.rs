use crate::core::think::strip_think_blocks;
use crate::domain::model::ChatMessage;
use crate::domain::ports::ChatModel;
use crate::utils::error::{RecapError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::sync::Arc;

pub const DEFAULT_VISION_MODEL: &str = "llama3.2-vision";

/// UPC/EAN supplemental barcodes carry either 2 or 5 digits.
pub const ADDON_LENGTHS: [usize; 2] = [2, 5];

pub const VISION_PROMPT: &str = "This image shows the barcode on the cover of a comic book. \
Read the small supplemental barcode printed to the right of the main barcode. \
Reply with its digits only, with no spaces and no other text.";

/// Reads the add-on digits of a cover barcode through a vision model.
pub struct BarcodeReader {
    model: Arc<dyn ChatModel>,
    model_name: String,
}

impl BarcodeReader {
    pub fn new(model: Arc<dyn ChatModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    pub async fn read_addon(&self, image: &[u8]) -> Result<String> {
        if image.is_empty() {
            return Err(RecapError::MissingInput {
                field: "image".to_string(),
            });
        }

        tracing::debug!(
            "Decoding barcode add-on with {} ({} image bytes)",
            self.model_name,
            image.len()
        );
        let messages = [ChatMessage::user(VISION_PROMPT).with_image(BASE64.encode(image))];
        let raw = self.model.chat(&self.model_name, &messages).await?;

        parse_addon(&raw)
    }
}

/// Normalises a vision model reply into add-on digits.
pub fn parse_addon(raw: &str) -> Result<String> {
    let digits: String = strip_think_blocks(raw)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(RecapError::InvalidBarcode {
            value: digits,
            reason: "expected digits only".to_string(),
        });
    }

    if !ADDON_LENGTHS.contains(&digits.len()) {
        let reason = format!("expected 2 or 5 digits, got {}", digits.len());
        return Err(RecapError::InvalidBarcode {
            value: digits,
            reason,
        });
    }

    Ok(digits)
}

/// Checks the scanned main code and returns it trimmed.
pub fn validate_primary(primary: &str) -> Result<&str> {
    let primary = primary.trim();
    if primary.is_empty() {
        return Err(RecapError::MissingInput {
            field: "upc".to_string(),
        });
    }
    if !primary.chars().all(|c| c.is_ascii_digit()) {
        return Err(RecapError::InvalidBarcode {
            value: primary.to_string(),
            reason: "expected digits only".to_string(),
        });
    }

    Ok(primary)
}

/// Joins the scanned main code with the decoded add-on.
pub fn combine_code(primary: &str, addon: &str) -> Result<String> {
    let primary = validate_primary(primary)?;
    Ok(format!("{}{}", primary, addon))
}
