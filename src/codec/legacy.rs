//! Delimited positional codes written by earlier versions of the editor.
//!
//! Records are separated by `|`, fields within a record by `:`. The first
//! record is the base shape, every following record one element. Later
//! versions appended fields, so a short record simply means the missing
//! fields take their defaults.

use super::CodeFormat;
use crate::error::DecodeError;
use crate::icon::{BaseShape, Color, ElementKind, IconDescription, InnerElement};

const RECORD_SEPARATOR: char = '|';
const FIELD_SEPARATOR: char = ':';

/// Positional codes with colour and stroke fields.
///
/// ```text
/// shape:roundness[:rotation[:color[:strokeColor:strokeWidth:hasStroke]]]
/// |type:x:y:width:height[:rotation[:roundness[:color[:strokeColor:strokeWidth:hasStroke]]]]
/// ```
///
/// Each record carries as many trailing fields as it likes, so a colourless
/// base can sit next to coloured elements. The three stroke fields only
/// count when all of them are present.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delimited;

/// The oldest positional codes: no colours, rotation optional.
///
/// ```text
/// shape:roundness[:rotation]|type:x:y:width:height[:rotation[:roundness]]
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDelimited;

impl CodeFormat for Delimited {
    fn name(&self) -> &'static str {
        "delimited"
    }

    fn decode(&self, code: &str) -> Result<IconDescription, DecodeError> {
        decode_records(code, self.name(), 2..=7, 5..=11)
    }
}

impl CodeFormat for PlainDelimited {
    fn name(&self) -> &'static str {
        "plain-delimited"
    }

    fn decode(&self, code: &str) -> Result<IconDescription, DecodeError> {
        decode_records(code, self.name(), 2..=3, 5..=7)
    }
}

type FieldRange = std::ops::RangeInclusive<usize>;

fn decode_records(
    code: &str,
    format: &'static str,
    base_fields: FieldRange,
    element_fields: FieldRange,
) -> Result<IconDescription, DecodeError> {
    let mut records = code.split(RECORD_SEPARATOR);
    let base = records.next().unwrap_or_default();
    let base = Record::split(base, format, 0, &base_fields)?;
    let mut icon = base.into_base()?;

    for (index, record) in records.enumerate() {
        // Tolerate a trailing separator.
        if record.trim().is_empty() {
            continue;
        }
        let record = Record::split(record, format, index + 1, &element_fields)?;
        icon.elements.push(record.into_element(index as u32)?);
    }
    Ok(icon)
}

/// The fields of one record.
struct Record<'a> {
    fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    fn split(
        record: &'a str,
        format: &'static str,
        index: usize,
        accepted: &FieldRange,
    ) -> Result<Self, DecodeError> {
        let fields: Vec<_> = record.split(FIELD_SEPARATOR).map(str::trim).collect();
        if !accepted.contains(&fields.len()) {
            return Err(DecodeError::FieldCount {
                format,
                record: index,
                found: fields.len(),
            });
        }
        Ok(Self { fields })
    }

    fn token(&self, index: usize, field: &'static str) -> Result<&'a str, DecodeError> {
        match self.fields.get(index) {
            Some(token) if !token.is_empty() => Ok(*token),
            _ => Err(DecodeError::MissingField(field)),
        }
    }

    fn int(&self, index: usize, field: &'static str) -> Result<i32, DecodeError> {
        parse_int(self.token(index, field)?, field)
    }

    fn int_or(&self, index: usize, field: &'static str, default: i32) -> Result<i32, DecodeError> {
        match self.fields.get(index) {
            Some(token) => parse_int(token, field),
            None => Ok(default),
        }
    }

    fn color_or_black(&self, index: usize) -> Color {
        self.fields.get(index).map_or_else(Color::black, |t| Color::new(*t))
    }

    /// Reads `strokeColor:strokeWidth:hasStroke` starting at `index`, if the
    /// record is long enough to hold all three.
    fn stroke_group(&self, index: usize) -> Result<Option<(Color, i32, bool)>, DecodeError> {
        if self.fields.len() < index + 3 {
            return Ok(None);
        }
        Ok(Some((
            Color::new(self.fields[index]),
            parse_int(self.fields[index + 1], "strokeWidth")?,
            self.fields[index + 2] == "1",
        )))
    }

    fn into_base(self) -> Result<IconDescription, DecodeError> {
        let mut icon = IconDescription::new(BaseShape::from_token(self.token(0, "baseShape")?));
        icon.base_roundness = self.int(1, "baseRoundness")?;
        icon.base_rotation = self.int_or(2, "baseRotation", 0)?;
        icon.base_color = self.color_or_black(3);
        if let Some((color, width, has_stroke)) = self.stroke_group(4)? {
            icon.stroke_color = color;
            icon.stroke_width = width;
            icon.has_stroke = has_stroke;
        }
        Ok(icon)
    }

    fn into_element(self, id: u32) -> Result<InnerElement, DecodeError> {
        let kind = ElementKind::from_token(self.token(0, "type")?);
        let mut element = InnerElement::new(id, kind)
            .with_position(self.int(1, "x")?, self.int(2, "y")?)
            .with_size(self.int(3, "width")?, self.int(4, "height")?)
            .with_rotation(self.int_or(5, "rotation", 0)?)
            .with_roundness(self.int_or(6, "roundness", 0)?);
        element.color = self.color_or_black(7);
        if let Some((color, width, has_stroke)) = self.stroke_group(8)? {
            element.stroke_color = color;
            element.stroke_width = width;
            element.has_stroke = has_stroke;
        }
        Ok(element)
    }
}

/// Reads the leading decimal integer of `token`, like JavaScript's
/// `parseInt(token, 10)`: `"12.9"` and `"12px"` are 12, `"1e3"` is 1.
/// Values beyond `i32` saturate.
fn parse_int(token: &str, field: &'static str) -> Result<i32, DecodeError> {
    let trimmed = token.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return Err(DecodeError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        });
    }

    let magnitude = digits[..end].bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    let value = if negative { -magnitude } else { magnitude };
    Ok(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

// ============================================================================
// Tests
// ============================================================================
