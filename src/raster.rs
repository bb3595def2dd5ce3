//! PNG export using resvg.
//!
//! The icon is rendered to SVG first, then rasterized. Opaque exports are
//! composited over a solid background.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::ExportError;
use crate::icon::{Color, IconDescription};
use crate::log::{debug, warn};
use crate::render::SvgDocument;
use crate::settings::ExportSettings;

// ============================================================================
// Rasterization
// ============================================================================

/// Largest PNG side length accepted by [`rasterize`].
pub const MAX_PNG_SIZE: u32 = 8192;

/// Rasterizes an SVG document into a `size` x `size` image.
///
/// The document is scaled so its larger side fills `size`. Sizes of zero or
/// above [`MAX_PNG_SIZE`] are rejected.
pub fn rasterize(svg_data: &str, size: u32) -> Result<RgbaImage, ExportError> {
    if size == 0 || size > MAX_PNG_SIZE {
        return Err(ExportError::Pixmap(size));
    }
    let opts = Options::default();
    let tree = Tree::from_str(svg_data, &opts)?;

    let svg_size = tree.size();
    let scale = size as f32 / svg_size.width().max(svg_size.height());

    let mut pixmap = Pixmap::new(size, size).ok_or(ExportError::Pixmap(size))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Renders `icon` to PNG bytes according to `settings`.
pub fn render_png(icon: &IconDescription, settings: &ExportSettings) -> Result<Vec<u8>, ExportError> {
    let (doc, _) = SvgDocument::from_icon(icon);
    let mut image = rasterize(&doc.to_svg_string(), settings.png_size)?;

    if !settings.transparent {
        fill_background(&mut image, solid(&settings.background));
    }

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    debug!(size = settings.png_size, bytes = bytes.len(), "encoded png");
    Ok(bytes)
}

/// Opaque pixel for a colour token, white if the token does not resolve.
fn solid(color: &Color) -> Rgba<u8> {
    match color.to_srgb() {
        Some(rgb) => Rgba([rgb.red, rgb.green, rgb.blue, 255]),
        None => {
            warn!(color = color.as_str(), "unknown background colour, using white");
            Rgba([255, 255, 255, 255])
        }
    }
}

/// Converts a tiny_skia pixmap to an `RgbaImage`.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (pixel, out) in pixmap.pixels().iter().zip(img.pixels_mut()) {
        // tiny_skia stores premultiplied alpha.
        let color = pixel.demultiply();
        *out = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    img
}

/// Puts an opaque `background` behind every pixel of `image`.
fn fill_background(image: &mut RgbaImage, background: Rgba<u8>) {
    for pixel in image.pixels_mut() {
        let alpha = f32::from(pixel[3]) / 255.0;
        let mix = |fg: u8, bg: u8| {
            (f32::from(fg) * alpha + f32::from(bg) * (1.0 - alpha)).round() as u8
        };
        *pixel = Rgba([
            mix(pixel[0], background[0]),
            mix(pixel[1], background[1]),
            mix(pixel[2], background[2]),
            255,
        ]);
    }
}

// ============================================================================
// Tests
// ============================================================================
