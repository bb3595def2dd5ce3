//! Canvas geometry: points, vertex tables and rounded polygon paths.

use std::fmt::Write;

/// Centre of the 100x100 canvas.
pub const CENTER: Point = Point::new(50.0, 50.0);

/// A point in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Moves `distance` units from `self` towards `target`.
    fn toward(self, target: Point, distance: f64) -> Point {
        let length = self.distance(target);
        if length == 0.0 {
            return self;
        }
        let t = distance / length;
        Point::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        )
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

// ============================================================================
// Base shape vertices
// ============================================================================

pub const DIAMOND: [Point; 4] = [
    Point::new(50.0, 10.0),
    Point::new(90.0, 50.0),
    Point::new(50.0, 90.0),
    Point::new(10.0, 50.0),
];

pub const TRIANGLE: [Point; 3] = [
    Point::new(50.0, 10.0),
    Point::new(90.0, 90.0),
    Point::new(10.0, 90.0),
];

pub const HEXAGON: [Point; 6] = [
    Point::new(50.0, 10.0),
    Point::new(85.0, 25.0),
    Point::new(85.0, 75.0),
    Point::new(50.0, 90.0),
    Point::new(15.0, 75.0),
    Point::new(15.0, 25.0),
];

pub const STAR: [Point; 10] = [
    Point::new(50.0, 10.0),
    Point::new(61.0, 35.0),
    Point::new(90.0, 35.0),
    Point::new(65.0, 55.0),
    Point::new(75.0, 80.0),
    Point::new(50.0, 65.0),
    Point::new(25.0, 80.0),
    Point::new(35.0, 55.0),
    Point::new(10.0, 35.0),
    Point::new(39.0, 35.0),
];

/// Diamond inscribed in a `width` x `height` box centred at `center`.
pub fn diamond(center: Point, width: f64, height: f64) -> Vec<Point> {
    let (hw, hh) = (width / 2.0, height / 2.0);
    vec![
        Point::new(center.x, center.y - hh),
        Point::new(center.x + hw, center.y),
        Point::new(center.x, center.y + hh),
        Point::new(center.x - hw, center.y),
    ]
}

/// Upward triangle filling a `width` x `height` box centred at `center`.
pub fn triangle(center: Point, width: f64, height: f64) -> Vec<Point> {
    let (hw, hh) = (width / 2.0, height / 2.0);
    vec![
        Point::new(center.x, center.y - hh),
        Point::new(center.x + hw, center.y + hh),
        Point::new(center.x - hw, center.y + hh),
    ]
}

// ============================================================================
// Rounded polygons
// ============================================================================

/// One softened corner: the curve leaves the incoming edge at `entry`, bends
/// towards `vertex` and rejoins the outgoing edge at `exit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub vertex: Point,
    pub entry: Point,
    pub exit: Point,
    pub radius: f64,
}

/// A closed polygon whose corners are replaced by quadratic curves.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedPolygon {
    corners: Vec<Corner>,
}

impl RoundedPolygon {
    /// Builds the corners for `vertices` (taken as a closed cycle).
    ///
    /// The radius is capped at half the polygon's shortest edge, which also
    /// keeps every corner within half of its own adjacent edges, so
    /// neighbouring curves never overlap.
    pub fn new(vertices: &[Point], radius: f64) -> Self {
        let n = vertices.len();
        let shortest = (0..n)
            .map(|i| vertices[i].distance(vertices[(i + 1) % n]))
            .fold(f64::INFINITY, f64::min);
        let radius = radius.max(0.0).min(shortest / 2.0);
        let corners = (0..n)
            .map(|i| {
                let vertex = vertices[i];
                let prev = vertices[(i + n - 1) % n];
                let next = vertices[(i + 1) % n];
                Corner {
                    vertex,
                    entry: vertex.toward(prev, radius),
                    exit: vertex.toward(next, radius),
                    radius,
                }
            })
            .collect();
        Self { corners }
    }

    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    /// Largest radius actually applied at any corner.
    pub fn max_radius(&self) -> f64 {
        self.corners.iter().map(|c| c.radius).fold(0.0, f64::max)
    }

    /// SVG path data. Falls back to straight segments when no corner is
    /// rounded.
    pub fn to_path(&self) -> String {
        let mut d = String::new();
        if self.corners.is_empty() {
            return d;
        }
        if self.max_radius() == 0.0 {
            for (i, corner) in self.corners.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{cmd}{} ", fmt_point(corner.vertex));
            }
            d.push('Z');
            return d;
        }
        for (i, corner) in self.corners.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(
                d,
                "{cmd}{} Q{} {} ",
                fmt_point(corner.entry),
                fmt_point(corner.vertex),
                fmt_point(corner.exit)
            );
        }
        d.push('Z');
        d
    }
}

/// Rounded path data for `vertices`, see [`RoundedPolygon`].
pub fn rounded_polygon_path(vertices: &[Point], radius: f64) -> String {
    RoundedPolygon::new(vertices, radius).to_path()
}

// ============================================================================
// Number formatting
// ============================================================================

/// Formats a coordinate for SVG: at most three decimals, no trailing zeros.
pub fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    format!("{rounded}")
}

pub fn fmt_point(point: Point) -> String {
    format!("{},{}", fmt_num(point.x), fmt_num(point.y))
}

/// Space-separated `x,y` list for `points` attributes.
pub fn fmt_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| fmt_point(*p))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Tests
// ============================================================================
