//! Canonical icon codes: a camelCase JSON object in URL-safe base64.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use super::CodeFormat;
use crate::error::DecodeError;
use crate::icon::IconDescription;

const URL_SAFE_ANY_PAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const STANDARD_ANY_PAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The current code format.
///
/// Encoding writes unpadded base64url. Decoding also takes the standard
/// alphabet and padded input, since codes get copied around by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonical;

impl Canonical {
    pub fn encode(&self, icon: &IconDescription) -> String {
        URL_SAFE_NO_PAD.encode(self.payload(icon))
    }

    /// The JSON payload before the base64 transform.
    pub fn payload(&self, icon: &IconDescription) -> String {
        // Plain structs, string keys and integers: serialization cannot fail.
        serde_json::to_string(icon).unwrap_or_default()
    }
}

impl CodeFormat for Canonical {
    fn name(&self) -> &'static str {
        "canonical"
    }

    fn decode(&self, code: &str) -> Result<IconDescription, DecodeError> {
        let bytes = match URL_SAFE_ANY_PAD.decode(code) {
            Ok(bytes) => bytes,
            Err(url_err) => STANDARD_ANY_PAD.decode(code).map_err(|_| url_err)?,
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
