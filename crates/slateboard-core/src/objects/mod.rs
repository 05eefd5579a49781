//! Object definitions for the annotation canvas.

mod image;
mod shape;
mod stroke;
mod text;

pub use image::{Image, ImageFormat};
pub use shape::{Figure, Shape};
pub use stroke::Stroke;
pub use text::Text;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for canvas objects.
pub type ObjectId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::black()
    }
}

/// The kind of a canvas object, used by the eraser's mode filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Stroke,
    Shape,
    Text,
    Image,
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    if points.len() == 1 {
        return point.distance(points[0]);
    }
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Distance from a point to a rectangle. Zero when the point is inside.
pub fn point_to_rect_dist(point: Point, rect: Rect) -> f64 {
    let dx = (rect.x0 - point.x).max(point.x - rect.x1).max(0.0);
    let dy = (rect.y0 - point.y).max(point.y - rect.y1).max(0.0);
    (dx * dx + dy * dy).sqrt()
}

/// Enum wrapper for all object types (for serialization).
///
/// One variant per object kind; hit-testing is handled exhaustively per
/// variant rather than through a dynamic payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CanvasObject {
    Stroke(Stroke),
    Shape(Shape),
    Text(Text),
    Image(Image),
}

impl CanvasObject {
    pub fn id(&self) -> ObjectId {
        match self {
            CanvasObject::Stroke(o) => o.id,
            CanvasObject::Shape(o) => o.id,
            CanvasObject::Text(o) => o.id,
            CanvasObject::Image(o) => o.id,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            CanvasObject::Stroke(_) => ObjectKind::Stroke,
            CanvasObject::Shape(_) => ObjectKind::Shape,
            CanvasObject::Text(_) => ObjectKind::Text,
            CanvasObject::Image(_) => ObjectKind::Image,
        }
    }

    /// Get the bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            CanvasObject::Stroke(o) => o.bounds(),
            CanvasObject::Shape(o) => o.bounds(),
            CanvasObject::Text(o) => o.bounds(),
            CanvasObject::Image(o) => o.bounds(),
        }
    }

    /// Distance from a point (in world coordinates) to this object.
    ///
    /// The metric is monotonic: `distance_to(p) <= r` for radius `r` implies
    /// the same for any larger radius, so a larger eraser always hits a
    /// superset of objects. Strokes measure to the nearest point on the
    /// sampled polyline; other kinds measure to their bounding box.
    pub fn distance_to(&self, point: Point) -> f64 {
        match self {
            CanvasObject::Stroke(o) => o.distance_to(point),
            CanvasObject::Shape(o) => point_to_rect_dist(point, o.bounds()),
            CanvasObject::Text(o) => point_to_rect_dist(point, o.bounds()),
            CanvasObject::Image(o) => point_to_rect_dist(point, o.bounds()),
        }
    }
}
