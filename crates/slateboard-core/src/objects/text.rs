//! Text object.

use super::{ObjectId, Rgba};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Approximate glyph advance as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f64 = 0.6;
/// Line height as a fraction of the font size.
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// A text annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ObjectId,
    /// Position (top-left corner of the text bounding box).
    pub position: Point,
    /// The text content.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Text color.
    pub color: Rgba,
}

impl Text {
    /// Create a new text object at a position.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            font_size: 20.0,
            color: Rgba::black(),
        }
    }

    /// Approximate bounding box based on content and font size.
    ///
    /// No text layout engine is involved here; the metric only needs to be
    /// stable and roughly proportional to the rendered extent for
    /// hit-testing purposes.
    pub fn bounds(&self) -> Rect {
        let lines: Vec<&str> = self.content.lines().collect();
        let line_count = lines.len().max(1);
        let max_chars = lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(1);

        let width = max_chars as f64 * self.font_size * CHAR_WIDTH_FACTOR;
        let height = line_count as f64 * self.font_size * LINE_HEIGHT_FACTOR;
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + width,
            self.position.y + height,
        )
    }
}
