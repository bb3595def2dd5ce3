//! Icon description types.
//!
//! An icon is one base silhouette plus an ordered list of inner elements drawn
//! on top of it. Every coordinate and size is a percentage of the fixed
//! 100x100 canvas.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::UnknownShapeKind;

// ============================================================================
// Color
// ============================================================================

/// A colour token, as written into the icon code and the SVG output.
///
/// Tokens are usually one of the palette names ([`Color::PALETTE`]) but any
/// CSS colour name or hex string is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// The colours offered by the editor.
    pub const PALETTE: [&'static str; 5] = ["black", "white", "red", "blue", "yellow"];

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn black() -> Self {
        Self::new("black")
    }

    pub fn white() -> Self {
        Self::new("white")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves the token to an sRGB value.
    ///
    /// Accepts CSS colour names and `#rgb` / `#rrggbb` hex. Returns `None` for
    /// anything else.
    pub fn to_srgb(&self) -> Option<Srgb<u8>> {
        let token = self.0.trim();
        if token.starts_with('#') {
            return token.parse::<Srgb<u8>>().ok();
        }
        palette::named::from_str(&token.to_ascii_lowercase())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

// ============================================================================
// Shape kinds
// ============================================================================

macro_rules! shape_kind {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $token:literal,)+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A token no variant matches, kept verbatim so re-encoding does
            /// not lose it.
            Unknown(String),
        }

        impl $name {
            /// Every known kind, in editor order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The token used in icon codes.
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $token,)+
                    $name::Unknown(token) => token,
                }
            }

            /// Parses a token, keeping unknown ones as [`Self::Unknown`].
            pub fn from_token(token: &str) -> Self {
                token
                    .parse()
                    .unwrap_or_else(|_| $name::Unknown(token.to_string()))
            }
        }

        impl FromStr for $name {
            type Err = UnknownShapeKind;

            fn from_str(token: &str) -> Result<Self, Self::Err> {
                match token {
                    $($token => Ok($name::$variant),)+
                    other => Err(UnknownShapeKind(other.to_string())),
                }
            }
        }

        impl From<String> for $name {
            fn from(token: String) -> Self {
                match token.parse() {
                    Ok(kind) => kind,
                    Err(_) => $name::Unknown(token),
                }
            }
        }

        impl From<$name> for String {
            fn from(kind: $name) -> Self {
                match kind {
                    $name::Unknown(token) => token,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

shape_kind! {
    /// The outer silhouette of an icon.
    pub enum BaseShape {
        Circle => "circle",
        Square => "square",
        Diamond => "diamond",
        Triangle => "triangle",
        Cross => "cross",
        Hexagon => "hexagon",
        Star => "star",
        Semicircle => "semicircle",
    }
}

shape_kind! {
    /// The kind of an inner element.
    pub enum ElementKind {
        Circle => "circle",
        CircleOutline => "circleOutline",
        Square => "square",
        Diamond => "diamond",
        Triangle => "triangle",
        Line => "line",
        Cross => "cross",
        Dot => "dot",
        Arc => "arc",
        Zigzag => "zigzag",
    }
}

impl Default for BaseShape {
    fn default() -> Self {
        BaseShape::Square
    }
}

impl ElementKind {
    /// Circles keep width and height equal while being edited.
    pub fn is_circular(&self) -> bool {
        matches!(self, ElementKind::Circle | ElementKind::CircleOutline)
    }

    /// Kinds whose roundness setting changes the drawn geometry.
    pub fn has_corners(&self) -> bool {
        matches!(
            self,
            ElementKind::Square
                | ElementKind::Diamond
                | ElementKind::Triangle
                | ElementKind::Cross
                | ElementKind::Line
        )
    }
}

// ============================================================================
// Inner elements
// ============================================================================

/// One shape drawn on top of the base, centred at `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct InnerElement {
    /// Session-scoped id. Never written into codes.
    #[serde(skip)]
    pub id: u32,

    #[serde(rename = "type")]
    #[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
    pub kind: ElementKind,

    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,

    #[serde(default)]
    pub rotation: i32,

    #[serde(default)]
    pub roundness: i32,

    #[serde(default)]
    pub color: Color,

    #[serde(default)]
    pub stroke_color: Color,

    #[serde(default = "default_stroke_width")]
    pub stroke_width: i32,

    #[serde(default)]
    pub has_stroke: bool,
}

impl InnerElement {
    /// Creates an element with the editor's defaults: centred, 30% wide and
    /// tall, black, no stroke.
    pub fn new(id: u32, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            x: 50,
            y: 50,
            width: 30,
            height: 30,
            rotation: 0,
            roundness: 0,
            color: Color::black(),
            stroke_color: Color::black(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            has_stroke: false,
        }
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_roundness(mut self, roundness: i32) -> Self {
        self.roundness = roundness;
        self
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }
}

// ============================================================================
// IconDescription
// ============================================================================

pub(crate) const DEFAULT_STROKE_WIDTH: i32 = 2;

fn default_stroke_width() -> i32 {
    DEFAULT_STROKE_WIDTH
}

fn default_true() -> bool {
    true
}

/// A complete icon: the base silhouette and its inner elements.
///
/// `elements` is in z-order; later elements are drawn on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct IconDescription {
    #[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
    pub base_shape: BaseShape,

    #[serde(default)]
    pub base_roundness: i32,

    #[serde(default)]
    pub base_rotation: i32,

    #[serde(default)]
    pub base_color: Color,

    #[serde(default)]
    pub stroke_color: Color,

    #[serde(default = "default_stroke_width")]
    pub stroke_width: i32,

    #[serde(default = "default_true")]
    pub has_stroke: bool,

    pub elements: Vec<InnerElement>,
}

impl IconDescription {
    /// Creates an icon with the given base shape and default styling.
    pub fn new(base_shape: BaseShape) -> Self {
        Self {
            base_shape,
            base_roundness: 0,
            base_rotation: 0,
            base_color: Color::black(),
            stroke_color: Color::black(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            has_stroke: true,
            elements: Vec::new(),
        }
    }

    pub fn with_roundness(mut self, roundness: i32) -> Self {
        self.base_roundness = roundness;
        self
    }

    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.base_rotation = rotation;
        self
    }

    pub fn with_element(mut self, element: InnerElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Reassigns element ids as `0..n` in list order.
    pub fn renumber(&mut self) {
        for (index, element) in self.elements.iter_mut().enumerate() {
            element.id = index as u32;
        }
    }

    pub fn element(&self, id: u32) -> Option<&InnerElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: u32) -> Option<&mut InnerElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }
}

impl Default for IconDescription {
    fn default() -> Self {
        Self::new(BaseShape::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
