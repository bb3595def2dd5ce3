//! SVG materialization of rendered primitives.
//!
//! [`SvgDocument`] is a [`Surface`] that records primitives and serializes
//! them as a standalone SVG document with a `0 0 100 100` viewBox. The output
//! has no external references, so it can be saved as a file or handed to the
//! rasterizer unchanged.

use std::fmt::{self, Write};

use super::{render_icon, Paint, Primitive, RenderReport, Rotation, Surface};
use crate::geometry::{fmt_num, fmt_point, fmt_points};
use crate::icon::IconDescription;

/// An SVG document under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgDocument {
    /// Rendered width and height in px. `None` leaves sizing to the viewer.
    size: Option<u32>,
    primitives: Vec<Primitive>,
}

impl SvgDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `width`/`height` attributes of the root element.
    pub fn with_size(mut self, size: Option<u32>) -> Self {
        self.size = size;
        self
    }

    /// Renders `icon` into a fresh document.
    pub fn from_icon(icon: &IconDescription) -> (Self, RenderReport) {
        let mut doc = Self::new();
        let report = render_icon(icon, &mut doc);
        (doc, report)
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Serializes the document.
    pub fn to_svg_string(&self) -> String {
        self.to_string()
    }
}

impl Surface for SvgDocument {
    fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100""#)?;
        if let Some(size) = self.size {
            write!(f, r#" width="{size}" height="{size}""#)?;
        }
        f.write_char('>')?;
        for primitive in &self.primitives {
            write_primitive(f, primitive)?;
        }
        f.write_str("</svg>")
    }
}

// ============================================================================
// Element writers
// ============================================================================

fn write_primitive(out: &mut impl Write, primitive: &Primitive) -> fmt::Result {
    match primitive {
        Primitive::Circle {
            center,
            radius,
            paint,
        } => {
            write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                fmt_num(center.x),
                fmt_num(center.y),
                fmt_num(*radius)
            )?;
            write_paint(out, paint)?;
            out.write_str("/>")
        }
        Primitive::Rect {
            origin,
            width,
            height,
            corner,
            paint,
        } => {
            write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                fmt_num(origin.x),
                fmt_num(origin.y),
                fmt_num(*width),
                fmt_num(*height)
            )?;
            if let Some(r) = corner {
                let r = fmt_num(*r);
                write!(out, r#" rx="{r}" ry="{r}""#)?;
            }
            write_paint(out, paint)?;
            out.write_str("/>")
        }
        Primitive::Polygon { points, paint } => {
            write!(out, r#"<polygon points="{}""#, fmt_points(points))?;
            write_paint(out, paint)?;
            out.write_str("/>")
        }
        Primitive::Polyline { points, paint } => {
            write!(out, r#"<polyline points="{}""#, fmt_points(points))?;
            write_paint(out, paint)?;
            out.write_str("/>")
        }
        Primitive::Path { data, paint } => {
            write!(out, r#"<path d="{}""#, escape_attr(data))?;
            write_paint(out, paint)?;
            out.write_str("/>")
        }
        Primitive::Group { rotation, children } => {
            out.write_str("<g")?;
            if let Some(rotation) = rotation {
                write_rotation(out, rotation)?;
            }
            out.write_char('>')?;
            for child in children {
                write_primitive(out, child)?;
            }
            out.write_str("</g>")
        }
    }
}

fn write_rotation(out: &mut impl Write, rotation: &Rotation) -> fmt::Result {
    let center = fmt_point(rotation.center).replace(',', " ");
    write!(
        out,
        r#" transform="rotate({} {center})""#,
        fmt_num(rotation.degrees)
    )
}

fn write_paint(out: &mut impl Write, paint: &Paint) -> fmt::Result {
    match &paint.fill {
        Some(color) => write!(out, r#" fill="{}""#, escape_attr(color.as_str()))?,
        None => out.write_str(r#" fill="none""#)?,
    }
    if let Some(stroke) = &paint.stroke {
        write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            escape_attr(stroke.color.as_str()),
            fmt_num(stroke.width)
        )?;
    }
    Ok(())
}

/// Escapes a value for use inside a double-quoted XML attribute.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

// ============================================================================
// Tests
// ============================================================================
