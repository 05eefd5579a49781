//! Geometric shape object (rectangle or ellipse).

use super::{ObjectId, Rgba};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The figure a shape object draws within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Figure {
    #[default]
    Rectangle,
    Ellipse,
}

/// A bounded geometric shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ObjectId,
    /// Which figure is drawn inside the bounds.
    pub figure: Figure,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the bounding box.
    pub width: f64,
    /// Height of the bounding box.
    pub height: f64,
    /// Outline color.
    pub stroke_color: Rgba,
    /// Outline width.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<Rgba>,
}

impl Shape {
    /// Create a new shape at a position with the given size.
    pub fn new(figure: Figure, position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            figure,
            position,
            width,
            height,
            stroke_color: Rgba::black(),
            stroke_width: 2.0,
            fill_color: None,
        }
    }

    /// Create a shape spanning two corner points.
    pub fn from_corners(figure: Figure, a: Point, b: Point) -> Self {
        let position = Point::new(a.x.min(b.x), a.y.min(b.y));
        Self::new(figure, position, (b.x - a.x).abs(), (b.y - a.y).abs())
    }

    /// Bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Center of the shape.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}
