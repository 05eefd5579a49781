//! Freehand stroke object.

use super::{ObjectId, Rgba, point_to_polyline_dist};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand stroke (series of sampled points).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: ObjectId,
    /// Sampled points along the stroke path.
    pub points: Vec<Point>,
    /// Stroke width.
    pub width: f64,
    /// Stroke color.
    pub color: Rgba,
}

impl Stroke {
    /// Create a new empty stroke.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            width: 2.0,
            color: Rgba::black(),
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            width: 2.0,
            color: Rgba::black(),
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Bounding box of the sampled points, inflated by half the stroke width.
    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let half = self.width / 2.0;
        Rect::new(min_x, min_y, max_x, max_y).inflate(half, half)
    }

    /// Distance from a point to the nearest point on the stroke polyline.
    pub fn distance_to(&self, point: Point) -> f64 {
        if self.points.is_empty() {
            return f64::INFINITY;
        }
        point_to_polyline_dist(point, &self.points)
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new()
    }
}
