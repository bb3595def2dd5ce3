//! bauhaus-icon: geometric icon model, codes and rendering
//!
//! An icon is a base silhouette (circle, square, star, ...) plus an ordered
//! list of inner elements, all laid out on a 100x100 canvas. This crate
//! provides:
//!
//! - the data model ([`IconDescription`], [`InnerElement`])
//! - compact, URL-safe icon codes with backwards-compatible decoding
//!   ([`codec`])
//! - a deterministic vector renderer with an SVG surface ([`render`])
//! - PNG export ([`render_png`])
//! - an editing session ([`IconEditor`]) and a saved-icon store
//!   ([`IconStore`])
//!
//! # Example
//!
//! ```
//! use bauhaus_icon::{codec, BaseShape, ElementKind, IconDescription, InnerElement, SvgDocument};
//!
//! let icon = IconDescription::new(BaseShape::Diamond)
//!     .with_roundness(20)
//!     .with_rotation(45)
//!     .with_element(InnerElement::new(0, ElementKind::Dot).with_size(20, 20));
//!
//! // Share it as a code...
//! let code = codec::encode(&icon);
//! assert_eq!(codec::decode(&code).unwrap(), icon);
//!
//! // ...or draw it.
//! let (doc, report) = SvgDocument::from_icon(&icon);
//! assert!(report.skipped.is_empty());
//! assert!(doc.to_svg_string().contains(r#"transform="rotate(45 50 50)""#));
//! ```
//!
//! # Saving icons
//!
//! ```
//! use bauhaus_icon::{IconEditor, IconStore, MemoryBackend, ElementKind};
//!
//! let mut editor = IconEditor::new();
//! editor.add_element(ElementKind::Cross);
//!
//! let mut store = IconStore::new(MemoryBackend::default());
//! let id = store.save("cross", editor.code()).unwrap();
//!
//! let saved = store.get(&id).unwrap().unwrap();
//! let mut reloaded = IconEditor::new();
//! reloaded.load_code(&saved.code).unwrap();
//! assert_eq!(reloaded.icon(), editor.icon());
//! ```

pub mod codec;
mod editor;
mod error;
pub mod geometry;
mod icon;
mod log;
mod raster;
pub mod render;
mod settings;
mod store;

pub use codec::{decode, encode, CodeFormat};
pub use editor::{ElementField, IconEditor, ZOrder};
pub use error::{DecodeError, ExportError, ImportError, StoreError, UnknownShapeKind};
pub use icon::{BaseShape, Color, ElementKind, IconDescription, InnerElement};
pub use raster::{rasterize, render_png, MAX_PNG_SIZE};
pub use render::{render_icon, Primitive, RenderReport, Surface, SvgDocument};
pub use settings::{ExportSettings, DEFAULT_PNG_SIZE};
pub use store::{
    IconStore, ImportReport, JsonFileBackend, MemoryBackend, SavedIcon, SavedIcons, StoreBackend,
};

/// Renders `icon` as a standalone SVG document.
///
/// Unknown shape kinds are left out; use [`SvgDocument::from_icon`] to see
/// which ones.
pub fn render_svg(icon: &IconDescription, settings: &ExportSettings) -> String {
    let (doc, _) = SvgDocument::from_icon(icon);
    doc.with_size(settings.size).to_svg_string()
}
