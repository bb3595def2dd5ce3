//! Serializable export settings.
//!
//! [`ExportSettings`] controls how an icon leaves the editor as SVG or PNG.
//! It round-trips through JSON so a frontend or the CLI can keep it in a
//! file.
//!
//! # Example
//!
//! ```
//! use bauhaus_icon::ExportSettings;
//!
//! let settings = ExportSettings::new().with_png_size(256).with_transparent(true);
//! let json = settings.to_json().unwrap();
//! let restored = ExportSettings::from_json(&json).unwrap();
//! assert_eq!(restored.png_size, 256);
//! ```
//!
//! Keys that are missing from the JSON take their defaults:
//!
//! ```json
//! {
//!   "size": 128,
//!   "pngSize": 500,
//!   "transparent": false,
//!   "background": "white"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::icon::Color;

/// Side length of exported PNGs when nothing else is configured.
pub const DEFAULT_PNG_SIZE: u32 = 500;

fn default_png_size() -> u32 {
    DEFAULT_PNG_SIZE
}

/// Settings for SVG and PNG export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    /// `width`/`height` of exported SVG documents in px. `None` omits them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    /// Side length of exported PNGs in px.
    #[serde(default = "default_png_size")]
    pub png_size: u32,

    /// Leave the PNG background transparent instead of filling it.
    #[serde(default)]
    pub transparent: bool,

    /// PNG background colour when not transparent.
    #[serde(default = "Color::white")]
    pub background: Color,
}

impl ExportSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_png_size(mut self, png_size: u32) -> Self {
        self.png_size = png_size;
        self
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn with_background(mut self, background: impl Into<Color>) -> Self {
        self.background = background.into();
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            size: None,
            png_size: DEFAULT_PNG_SIZE,
            transparent: false,
            background: Color::white(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
