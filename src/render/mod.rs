//! Shape renderer.
//!
//! Rendering is split in two steps:
//!
//! 1. Pure geometry: [`base_geometry`] and [`element_geometry`] turn an icon's
//!    descriptors into [`Primitive`] values in the 100x100 canvas space.
//! 2. Materialization: primitives are pushed onto a caller-owned [`Surface`].
//!    [`SvgDocument`] is the surface used for preview and export; a plain
//!    `Vec<Primitive>` works for headless inspection.
//!
//! Unknown shape kinds produce no geometry. They are skipped and counted in
//! the [`RenderReport`] so the rest of the icon still renders.

pub mod svg;

pub use svg::SvgDocument;

use crate::error::UnknownShapeKind;
use crate::geometry::{self, Point, RoundedPolygon, CENTER};
use crate::icon::{BaseShape, Color, ElementKind, IconDescription, InnerElement};
use crate::log::{debug, warn};

/// Inner elements are drawn at this fraction of their nominal size so a
/// 100% element stays inside the canvas.
pub const ELEMENT_SCALE: f64 = 0.8;

/// Extent of the base shape from the canvas centre.
pub const BASE_EXTENT: f64 = 40.0;

// ============================================================================
// Primitives
// ============================================================================

/// Stroke settings for a primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// Fill and stroke of a primitive. `None` means "not painted".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    pub fn outline(stroke: Stroke) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
        }
    }

    pub fn with_stroke(mut self, stroke: Option<Stroke>) -> Self {
        self.stroke = stroke;
        self
    }
}

/// Rotation by `degrees` about `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: f64,
    pub center: Point,
}

impl Rotation {
    /// Returns `None` for rotations that are a whole number of turns.
    pub fn about(degrees: i32, center: Point) -> Option<Self> {
        (degrees.rem_euclid(360) != 0).then(|| Self {
            degrees: f64::from(degrees),
            center,
        })
    }
}

/// A drawing primitive in canvas units.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle {
        center: Point,
        radius: f64,
        paint: Paint,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        /// Corner radius, used for both axes.
        corner: Option<f64>,
        paint: Paint,
    },
    Polygon {
        points: Vec<Point>,
        paint: Paint,
    },
    Polyline {
        points: Vec<Point>,
        paint: Paint,
    },
    Path {
        data: String,
        paint: Paint,
    },
    Group {
        rotation: Option<Rotation>,
        children: Vec<Primitive>,
    },
}

impl Primitive {
    /// Calls `f` on this primitive and every nested child, depth first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Primitive)) {
        f(self);
        if let Primitive::Group { children, .. } = self {
            for child in children {
                child.walk(f);
            }
        }
    }

    fn rotated(self, rotation: Option<Rotation>) -> Primitive {
        match rotation {
            Some(rotation) => Primitive::Group {
                rotation: Some(rotation),
                children: vec![self],
            },
            None => self,
        }
    }
}

// ============================================================================
// Surface
// ============================================================================

/// A drawing target rooted at a 100x100 viewBox.
///
/// The renderer appends to a surface; it never creates or owns one.
pub trait Surface {
    fn push(&mut self, primitive: Primitive);
}

impl Surface for Vec<Primitive> {
    fn push(&mut self, primitive: Primitive) {
        Vec::push(self, primitive);
    }
}

/// Outcome of rendering a whole icon.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderReport {
    /// Shapes that produced geometry (base included).
    pub drawn: usize,
    /// Raw tokens of shapes that were skipped.
    pub skipped: Vec<String>,
}

// ============================================================================
// Base shape
// ============================================================================

/// Corner radius for a rounded base shape.
fn base_corner_radius(shape: &BaseShape, roundness: i32) -> f64 {
    let roundness = f64::from(roundness);
    match shape {
        BaseShape::Square => roundness * 0.4,
        BaseShape::Star => roundness * 0.1,
        _ => roundness * 0.2,
    }
}

fn polygon_or_rounded(vertices: &[Point], radius: f64, paint: Paint) -> Primitive {
    if radius > 0.0 {
        Primitive::Path {
            data: RoundedPolygon::new(vertices, radius).to_path(),
            paint,
        }
    } else {
        Primitive::Polygon {
            points: vertices.to_vec(),
            paint,
        }
    }
}

fn positive(value: f64) -> Option<f64> {
    (value > 0.0).then_some(value)
}

/// Geometry of the base silhouette, wrapped in its rotation group.
pub fn base_geometry(icon: &IconDescription) -> Result<Primitive, UnknownShapeKind> {
    let stroke = icon
        .has_stroke
        .then(|| Stroke::new(icon.stroke_color.clone(), f64::from(icon.stroke_width)));
    let paint = Paint::fill(icon.base_color.clone()).with_stroke(stroke);
    let radius = base_corner_radius(&icon.base_shape, icon.base_roundness);
    let (low, size) = (CENTER.x - BASE_EXTENT, BASE_EXTENT * 2.0);

    let children = match &icon.base_shape {
        BaseShape::Circle => vec![Primitive::Circle {
            center: CENTER,
            radius: BASE_EXTENT,
            paint,
        }],
        BaseShape::Square => vec![Primitive::Rect {
            origin: Point::new(low, low),
            width: size,
            height: size,
            corner: positive(radius),
            paint,
        }],
        BaseShape::Diamond => vec![polygon_or_rounded(&geometry::DIAMOND, radius, paint)],
        BaseShape::Triangle => vec![polygon_or_rounded(&geometry::TRIANGLE, radius, paint)],
        BaseShape::Hexagon => vec![polygon_or_rounded(&geometry::HEXAGON, radius, paint)],
        BaseShape::Star => vec![polygon_or_rounded(&geometry::STAR, radius, paint)],
        BaseShape::Semicircle => vec![Primitive::Path {
            data: "M10,50 A40,40 0 0,1 90,50 L10,50 Z".to_string(),
            paint,
        }],
        BaseShape::Cross => cross_bars(CENTER, (size, size), (10.0, 10.0), positive(radius), paint),
        BaseShape::Unknown(token) => return Err(UnknownShapeKind(token.clone())),
    };

    Ok(Primitive::Group {
        rotation: Rotation::about(icon.base_rotation, CENTER),
        children,
    })
}

/// Horizontal and vertical bars crossing at `center`.
///
/// The first pair is the overall (width, height) of the cross, the second
/// the horizontal bar's height and the vertical bar's width.
fn cross_bars(
    center: Point,
    (width, height): (f64, f64),
    (h_thick, v_thick): (f64, f64),
    corner: Option<f64>,
    paint: Paint,
) -> Vec<Primitive> {
    vec![
        Primitive::Rect {
            origin: Point::new(center.x - width / 2.0, center.y - h_thick / 2.0),
            width,
            height: h_thick,
            corner,
            paint: paint.clone(),
        },
        Primitive::Rect {
            origin: Point::new(center.x - v_thick / 2.0, center.y - height / 2.0),
            width: v_thick,
            height,
            corner,
            paint,
        },
    ]
}

// ============================================================================
// Inner elements
// ============================================================================

/// Geometry of one inner element, rotated about its own centre when needed.
pub fn element_geometry(element: &InnerElement) -> Result<Primitive, UnknownShapeKind> {
    let center = Point::new(f64::from(element.x), f64::from(element.y));
    let w = f64::from(element.width) * ELEMENT_SCALE;
    let h = f64::from(element.height) * ELEMENT_SCALE;
    let radius = if element.kind.has_corners() {
        f64::from(element.roundness) * 0.2
    } else {
        0.0
    };
    let corner = positive(radius);

    let stroke = element
        .has_stroke
        .then(|| Stroke::new(element.stroke_color.clone(), f64::from(element.stroke_width)));
    let filled = Paint::fill(element.color.clone()).with_stroke(stroke);
    // Open shapes are nothing but their stroke.
    let line = Paint::outline(Stroke::new(element.stroke_color.clone(), h / 10.0));

    let primitive = match &element.kind {
        ElementKind::Circle => Primitive::Circle {
            center,
            radius: w.min(h) / 2.0,
            paint: filled,
        },
        ElementKind::CircleOutline => Primitive::Circle {
            center,
            radius: w.min(h) / 2.0,
            paint: Paint::outline(Stroke::new(
                element.stroke_color.clone(),
                f64::from(element.stroke_width),
            )),
        },
        ElementKind::Dot => Primitive::Circle {
            center,
            radius: w.min(h) / 4.0,
            paint: filled,
        },
        ElementKind::Square => Primitive::Rect {
            origin: Point::new(center.x - w / 2.0, center.y - h / 2.0),
            width: w,
            height: h,
            corner,
            paint: filled,
        },
        ElementKind::Line => Primitive::Rect {
            origin: Point::new(center.x - w / 2.0, center.y - h / 10.0),
            width: w,
            height: h / 5.0,
            corner,
            paint: filled,
        },
        ElementKind::Diamond => {
            polygon_or_rounded(&geometry::diamond(center, w, h), radius, filled)
        }
        ElementKind::Triangle => {
            polygon_or_rounded(&geometry::triangle(center, w, h), radius, filled)
        }
        ElementKind::Cross => Primitive::Group {
            rotation: None,
            children: cross_bars(center, (w, h), (h / 5.0, w / 5.0), corner, filled),
        },
        ElementKind::Arc => {
            let r = w.min(h) / 2.0;
            Primitive::Path {
                data: format!(
                    "M{} A{},{} 0 0,1 {}",
                    geometry::fmt_point(Point::new(center.x - r, center.y)),
                    geometry::fmt_num(r),
                    geometry::fmt_num(r),
                    geometry::fmt_point(Point::new(center.x + r, center.y)),
                ),
                paint: line,
            }
        }
        ElementKind::Zigzag => Primitive::Polyline {
            points: vec![
                Point::new(center.x - w / 2.0, center.y),
                Point::new(center.x - w / 4.0, center.y - h / 2.0),
                center,
                Point::new(center.x + w / 4.0, center.y - h / 2.0),
                Point::new(center.x + w / 2.0, center.y),
            ],
            paint: line,
        },
        ElementKind::Unknown(token) => return Err(UnknownShapeKind(token.clone())),
    };

    Ok(primitive.rotated(Rotation::about(element.rotation, center)))
}

// ============================================================================
// Surface entry points
// ============================================================================

/// Appends the base silhouette to `surface`.
pub fn render_base(icon: &IconDescription, surface: &mut impl Surface) -> Result<(), UnknownShapeKind> {
    surface.push(base_geometry(icon)?);
    Ok(())
}

/// Appends one inner element to `surface`.
pub fn render_element(
    element: &InnerElement,
    surface: &mut impl Surface,
) -> Result<(), UnknownShapeKind> {
    surface.push(element_geometry(element)?);
    Ok(())
}

/// Renders the base and every element in z-order, skipping unknown kinds.
pub fn render_icon(icon: &IconDescription, surface: &mut impl Surface) -> RenderReport {
    let mut report = RenderReport::default();

    let mut record = |result: Result<(), UnknownShapeKind>| match result {
        Ok(()) => report.drawn += 1,
        Err(UnknownShapeKind(token)) => {
            warn!(%token, "skipping unknown shape kind");
            report.skipped.push(token);
        }
    };

    record(render_base(icon, surface));
    for element in &icon.elements {
        record(render_element(element, surface));
    }

    debug!(drawn = report.drawn, skipped = report.skipped.len(), "rendered icon");
    report
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(primitives: &[Primitive]) -> Vec<&Primitive> {
        let mut out = Vec::new();
        for p in primitives {
            p.walk(&mut |p| out.push(p));
        }
        out
    }

    fn render(icon: &IconDescription) -> (Vec<Primitive>, RenderReport) {
        let mut surface = Vec::new();
        let report = render_icon(icon, &mut surface);
        (surface, report)
    }

    #[test]
    fn default_square_is_one_plain_rect() {
        let icon = IconDescription::new(BaseShape::Square);
        let (surface, report) = render(&icon);
        assert_eq!(report.drawn, 1);
        assert_eq!(surface.len(), 1);

        let Primitive::Group { rotation, children } = &surface[0] else {
            panic!("base should be a group");
        };
        assert_eq!(*rotation, None);
        assert_eq!(children.len(), 1);
        match &children[0] {
            Primitive::Rect {
                origin,
                width,
                height,
                corner,
                ..
            } => {
                assert_eq!(*origin, Point::new(10.0, 10.0));
                assert_eq!(origin.x + width, 90.0);
                assert_eq!(origin.y + height, 90.0);
                assert_eq!(*corner, None);
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn rotated_rounded_diamond_with_dot() {
        let icon = IconDescription::new(BaseShape::Diamond)
            .with_roundness(20)
            .with_rotation(45)
            .with_element(InnerElement::new(0, ElementKind::Dot).with_size(20, 20));
        let (surface, report) = render(&icon);
        assert_eq!(report.drawn, 2);
        assert_eq!(surface.len(), 2);

        let Primitive::Group { rotation, children } = &surface[0] else {
            panic!("base should be a group");
        };
        assert_eq!(
            *rotation,
            Some(Rotation {
                degrees: 45.0,
                center: CENTER
            })
        );
        assert!(matches!(&children[0], Primitive::Path { data, .. } if data.contains('Q')));

        match &surface[1] {
            Primitive::Circle {
                center,
                radius,
                paint,
            } => {
                assert_eq!(*center, Point::new(50.0, 50.0));
                assert!((radius - 4.0).abs() < 1e-9);
                assert_eq!(paint.fill, Some(Color::black()));
            }
            other => panic!("dot should be a bare circle, got {other:?}"),
        }
    }

    #[test]
    fn unknown_element_is_skipped() {
        let icon = IconDescription::new(BaseShape::Circle)
            .with_element(InnerElement::new(0, ElementKind::Square))
            .with_element(InnerElement::new(1, ElementKind::Unknown("blob".into())))
            .with_element(InnerElement::new(2, ElementKind::Line));
        let (surface, report) = render(&icon);
        assert_eq!(surface.len(), 3);
        assert_eq!(report.drawn, 3);
        assert_eq!(report.skipped, vec!["blob".to_string()]);
        assert!(matches!(surface[1], Primitive::Rect { .. }));
        assert!(matches!(surface[2], Primitive::Rect { .. }));
    }

    #[test]
    fn unknown_base_still_renders_elements() {
        let mut icon = IconDescription::new(BaseShape::Unknown("octagon".into()));
        icon.elements.push(InnerElement::new(0, ElementKind::Circle));
        let (surface, report) = render(&icon);
        assert_eq!(surface.len(), 1);
        assert_eq!(report.skipped, vec!["octagon".to_string()]);
    }

    #[test]
    fn element_rotation_is_about_its_center() {
        let element = InnerElement::new(0, ElementKind::Square)
            .with_position(30, 70)
            .with_rotation(90);
        let primitive = element_geometry(&element).unwrap();
        let Primitive::Group { rotation, children } = primitive else {
            panic!("rotated element should be grouped");
        };
        assert_eq!(rotation.unwrap().center, Point::new(30.0, 70.0));
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn full_turn_rotation_is_dropped() {
        assert_eq!(Rotation::about(360, CENTER), None);
        assert_eq!(Rotation::about(0, CENTER), None);
        assert!(Rotation::about(-90, CENTER).is_some());
    }

    #[test]
    fn element_sizes_are_scaled() {
        let element = InnerElement::new(0, ElementKind::Square).with_size(100, 50);
        match element_geometry(&element).unwrap() {
            Primitive::Rect { width, height, origin, .. } => {
                assert!((width - 80.0).abs() < 1e-9);
                assert!((height - 40.0).abs() < 1e-9);
                assert!((origin.x - 10.0).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }

        let circle = InnerElement::new(0, ElementKind::Circle).with_size(50, 30);
        match element_geometry(&circle).unwrap() {
            Primitive::Circle { radius, .. } => assert!((radius - 12.0).abs() < 1e-9),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn element_cross_bars_are_a_fifth_thick() {
        let element = InnerElement::new(0, ElementKind::Cross).with_size(50, 50);
        let Primitive::Group { children, .. } = element_geometry(&element).unwrap() else {
            panic!("cross should be a group");
        };
        match (&children[0], &children[1]) {
            (
                Primitive::Rect { width: hw, height: hh, origin: ho, .. },
                Primitive::Rect { width: vw, height: vh, origin: vo, .. },
            ) => {
                assert!((hw - 40.0).abs() < 1e-9);
                assert!((hh - 8.0).abs() < 1e-9);
                assert!((ho.y - 46.0).abs() < 1e-9);
                assert!((vw - 8.0).abs() < 1e-9);
                assert!((vh - 40.0).abs() < 1e-9);
                assert!((vo.x - 46.0).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn base_cross_bars_have_independent_corners() {
        let icon = IconDescription::new(BaseShape::Cross).with_roundness(10);
        let base = base_geometry(&icon).unwrap();
        let rects: Vec<_> = flatten(std::slice::from_ref(&base))
            .into_iter()
            .filter_map(|p| match p {
                Primitive::Rect { origin, width, height, corner, .. } => {
                    Some((*origin, *width, *height, *corner))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            rects,
            vec![
                (Point::new(10.0, 45.0), 80.0, 10.0, Some(2.0)),
                (Point::new(45.0, 10.0), 10.0, 80.0, Some(2.0)),
            ]
        );
    }

    #[test]
    fn base_rounding_scales_per_shape() {
        let square = IconDescription::new(BaseShape::Square).with_roundness(50);
        match &flatten(&[base_geometry(&square).unwrap()])[1] {
            Primitive::Rect { corner, .. } => assert_eq!(*corner, Some(20.0)),
            other => panic!("unexpected {other:?}"),
        }

        let star = IconDescription::new(BaseShape::Star);
        assert!(matches!(
            &flatten(&[base_geometry(&star).unwrap()])[1],
            Primitive::Polygon { points, .. } if points.len() == 10
        ));
    }

    #[test]
    fn stroke_follows_has_stroke() {
        let mut icon = IconDescription::new(BaseShape::Circle);
        icon.has_stroke = false;
        let base = base_geometry(&icon).unwrap();
        match flatten(std::slice::from_ref(&base))[1] {
            Primitive::Circle { paint, .. } => {
                assert!(paint.stroke.is_none());
                assert_eq!(paint.fill, Some(Color::black()));
            }
            other => panic!("unexpected {other:?}"),
        }

        let mut element = InnerElement::new(0, ElementKind::Triangle);
        element.has_stroke = true;
        element.stroke_color = Color::new("red");
        match element_geometry(&element).unwrap() {
            Primitive::Polygon { paint, .. } => {
                assert_eq!(paint.stroke, Some(Stroke::new(Color::new("red"), 2.0)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn open_kinds_are_unfilled() {
        let mut arc = InnerElement::new(0, ElementKind::Arc)
            .with_size(50, 50)
            .with_color("red");
        arc.stroke_color = Color::new("blue");
        arc.has_stroke = true;
        match element_geometry(&arc).unwrap() {
            Primitive::Path { data, paint } => {
                assert_eq!(data, "M30,50 A20,20 0 0,1 70,50");
                assert!(paint.fill.is_none());
                assert_eq!(paint.stroke, Some(Stroke::new(Color::new("blue"), 4.0)));
            }
            other => panic!("unexpected {other:?}"),
        }

        let zigzag = InnerElement::new(0, ElementKind::Zigzag)
            .with_size(50, 50)
            .with_color("red");
        match element_geometry(&zigzag).unwrap() {
            Primitive::Polyline { points, paint } => {
                assert_eq!(points.len(), 5);
                assert_eq!(points[1], Point::new(40.0, 30.0));
                assert!(paint.fill.is_none());
                assert_eq!(paint.stroke.map(|s| s.color), Some(Color::black()));
            }
            other => panic!("unexpected {other:?}"),
        }

        let ring = InnerElement::new(0, ElementKind::CircleOutline);
        match element_geometry(&ring).unwrap() {
            Primitive::Circle { paint, .. } => {
                assert!(paint.fill.is_none());
                assert!(paint.stroke.is_some());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rounded_triangle_element_stays_within_shortest_edge() {
        // 10x10 nominal, drawn at 8x8: the base edge (8) is the shortest.
        let element = InnerElement::new(0, ElementKind::Triangle)
            .with_size(10, 10)
            .with_roundness(100);
        let Primitive::Path { data, .. } = element_geometry(&element).unwrap() else {
            panic!("rounded triangle should be a path");
        };
        let vertices = geometry::triangle(CENTER, 8.0, 8.0);
        let expected = RoundedPolygon::new(&vertices, 20.0);
        assert!(expected.corners().iter().all(|c| (c.radius - 4.0).abs() < 1e-9));
        assert_eq!(data, expected.to_path());
        // Apex curve starts 4 units down each slanted edge.
        assert!(data.starts_with(&format!(
            "M{} Q50,46 ",
            geometry::fmt_point(expected.corners()[0].entry)
        )));
    }

    #[test]
    fn roundness_ignored_without_corners() {
        let dot = InnerElement::new(0, ElementKind::Dot).with_roundness(50);
        assert!(matches!(element_geometry(&dot).unwrap(), Primitive::Circle { .. }));

        let square = InnerElement::new(0, ElementKind::Square).with_roundness(50);
        match element_geometry(&square).unwrap() {
            Primitive::Rect { corner, .. } => assert_eq!(corner, Some(10.0)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn out_of_range_values_degrade() {
        let element = InnerElement::new(0, ElementKind::Diamond)
            .with_size(-40, 400)
            .with_roundness(900)
            .with_rotation(-720);
        assert!(element_geometry(&element).is_ok());
    }
}
