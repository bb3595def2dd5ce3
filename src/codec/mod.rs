//! Icon code encoding and decoding.
//!
//! [`encode`] always writes the canonical format. [`decode`] tries every known
//! format in order and returns the first success: the canonical format, then
//! the positional ones from strictest to most lenient.
//!
//! | format | example |
//! |---|---|
//! | [`Canonical`] | base64url of a camelCase JSON object |
//! | [`PlainDelimited`] | `square:20:0\|circle:50:50:30:30:0:0` |
//! | [`Delimited`] | `square:0:0:red:black:2:1\|dot:50:50:20:20:0:0:black:black:2:0` |
//!
//! Element ids are never read from a code; decoded elements are numbered
//! `0..n` in code order.
//!
//! # Example
//!
//! ```
//! use bauhaus_icon::{codec, BaseShape, ElementKind, IconDescription, InnerElement};
//!
//! let icon = IconDescription::new(BaseShape::Hexagon)
//!     .with_element(InnerElement::new(0, ElementKind::Dot));
//!
//! let code = codec::encode(&icon);
//! assert_eq!(codec::decode(&code).unwrap(), icon);
//! ```

pub mod canonical;
pub mod legacy;

pub use canonical::Canonical;
pub use legacy::{Delimited, PlainDelimited};

use crate::error::DecodeError;
use crate::icon::IconDescription;
use crate::log::debug;

/// One version of the icon code format.
pub trait CodeFormat {
    /// Short name used in logs and error reports.
    fn name(&self) -> &'static str;

    /// Parses `code` as this format.
    fn decode(&self, code: &str) -> Result<IconDescription, DecodeError>;
}

/// Every format [`decode`] accepts, in the order they are tried.
pub const FORMATS: &[&dyn CodeFormat] = &[&Canonical, &PlainDelimited, &Delimited];

/// Encodes `icon` in the canonical format.
///
/// The result is deterministic and safe for single-line text fields and URLs.
pub fn encode(icon: &IconDescription) -> String {
    Canonical.encode(icon)
}

/// Decodes a code in any supported format.
pub fn decode(code: &str) -> Result<IconDescription, DecodeError> {
    decode_with(code, FORMATS)
}

/// Decodes `code` with the first of `formats` that accepts it.
///
/// Element ids of the result are renumbered from 0.
pub fn decode_with(code: &str, formats: &[&dyn CodeFormat]) -> Result<IconDescription, DecodeError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut attempts = Vec::with_capacity(formats.len());
    for format in formats {
        match format.decode(code) {
            Ok(mut icon) => {
                debug!(format = format.name(), elements = icon.elements.len(), "decoded icon code");
                icon.renumber();
                return Ok(icon);
            }
            Err(err) => {
                debug!(format = format.name(), %err, "icon code rejected");
                attempts.push((format.name(), err));
            }
        }
    }
    Err(DecodeError::Unrecognized { attempts })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::{BaseShape, Color, ElementKind, InnerElement};

    fn sample_icon() -> IconDescription {
        let mut icon = IconDescription::new(BaseShape::Star)
            .with_roundness(35)
            .with_rotation(270)
            .with_element(
                InnerElement::new(0, ElementKind::Triangle)
                    .with_position(25, 75)
                    .with_size(40, 20)
                    .with_rotation(15)
                    .with_roundness(10)
                    .with_color("red"),
            )
            .with_element(InnerElement::new(1, ElementKind::Arc).with_size(60, 60))
            .with_element(InnerElement::new(2, ElementKind::CircleOutline));
        icon.base_color = Color::new("yellow");
        icon.stroke_color = Color::new("blue");
        icon.stroke_width = 4;
        icon.has_stroke = false;
        icon.elements[2].has_stroke = true;
        icon.elements[2].stroke_width = 5;
        icon
    }

    #[test]
    fn round_trip_preserves_everything() {
        let icon = sample_icon();
        let decoded = decode(&encode(&icon)).unwrap();
        assert_eq!(decoded, icon);
    }

    #[test]
    fn round_trip_renumbers_ids_in_order() {
        let mut icon = sample_icon();
        for (element, id) in icon.elements.iter_mut().zip([9, 4, 12]) {
            element.id = id;
        }
        let decoded = decode(&encode(&icon)).unwrap();
        let ids: Vec<_> = decoded.elements.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        let kinds: Vec<_> = decoded.elements.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![ElementKind::Triangle, ElementKind::Arc, ElementKind::CircleOutline]
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let icon = sample_icon();
        assert_eq!(encode(&icon), encode(&icon.clone()));
    }

    #[test]
    fn code_is_url_and_line_safe() {
        let code = encode(&sample_icon());
        assert!(
            code.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn unknown_tokens_survive_round_trip() {
        let icon = IconDescription::new(BaseShape::Unknown("octagon".into()))
            .with_element(InnerElement::new(0, ElementKind::Unknown("spiral".into())));
        let decoded = decode(&encode(&icon)).unwrap();
        assert_eq!(decoded, icon);
    }

    #[test]
    fn legacy_plain_code_gets_defaults() {
        let icon = decode("square:20:0|circle:50:50:30:30:0:0").unwrap();
        assert_eq!(icon.base_shape, BaseShape::Square);
        assert_eq!(icon.base_roundness, 20);
        assert_eq!(icon.base_color, Color::black());
        assert_eq!(icon.stroke_color, Color::black());
        assert_eq!(icon.stroke_width, 2);
        assert!(icon.has_stroke);

        assert_eq!(icon.elements.len(), 1);
        let element = &icon.elements[0];
        assert_eq!(element.id, 0);
        assert_eq!(element.kind, ElementKind::Circle);
        assert_eq!(element.color, Color::black());
        assert!(!element.has_stroke);
    }

    #[test]
    fn legacy_delimited_code_decodes() {
        let icon =
            decode("triangle:10:90:red:blue:3:0|square:20:30:40:50:45:5:yellow:black:1:1").unwrap();
        assert_eq!(icon.base_shape, BaseShape::Triangle);
        assert_eq!(icon.base_color, Color::new("red"));
        assert_eq!(icon.stroke_width, 3);
        assert!(!icon.has_stroke);
        let element = &icon.elements[0];
        assert_eq!((element.x, element.y, element.width, element.height), (20, 30, 40, 50));
        assert_eq!(element.rotation, 45);
        assert_eq!(element.color, Color::new("yellow"));
        assert!(element.has_stroke);
    }

    #[test]
    fn colourless_base_with_coloured_element_decodes() {
        let icon = decode("square:20:0|circle:50:50:30:30:0:0:red").unwrap();
        assert_eq!(icon.base_color, Color::black());
        assert_eq!(icon.elements[0].color, Color::new("red"));
        assert_eq!(icon.elements[0].id, 0);
    }

    #[test]
    fn empty_code_is_rejected() {
        assert!(matches!(decode("   "), Err(DecodeError::Empty)));
    }

    #[test]
    fn garbage_reports_every_attempt() {
        match decode("not-valid") {
            Err(DecodeError::Unrecognized { attempts }) => {
                let names: Vec<_> = attempts.iter().map(|(name, _)| *name).collect();
                assert_eq!(names, vec!["canonical", "plain-delimited", "delimited"]);
            }
            other => panic!("expected unrecognized, got {other:?}"),
        }
    }

    #[test]
    fn decode_with_respects_format_list() {
        let code = "square:20:0";
        assert!(decode_with(code, &[&Canonical]).is_err());
        assert!(decode_with(code, &[&PlainDelimited]).is_ok());
    }
}
