//! Eraser subsystem: session lifecycle and the hit-test-and-erase pass.

use crate::layer::BoardDocument;
use crate::objects::ObjectId;
use crate::tools::EraserMode;
use kurbo::Point;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for eraser sessions.
pub type SessionId = Uuid;

/// Eraser errors.
#[derive(Debug, Error)]
pub enum EraseError {
    /// Continue/end called on an unknown or already-closed session.
    /// Recoverable; callers treat it as a no-op.
    #[error("unknown or closed eraser session: {0}")]
    InvalidSession(SessionId),
    /// A second session was requested while one is open.
    #[error("an eraser session is already open: {0}")]
    SessionOpen(SessionId),
    /// Sessions require a positive radius.
    #[error("eraser radius must be positive, got {0}")]
    InvalidRadius(f64),
}

/// One erase gesture, from initial contact to release.
#[derive(Debug, Clone)]
struct EraserSession {
    /// Mode snapshot taken at begin; mode changes mid-gesture do not apply.
    mode: EraserMode,
    /// Eraser radius for the whole session.
    radius: f64,
    /// Ids of objects removed so far. Objects are removed as soon as they are
    /// hit, so an id can never be counted twice.
    erased: HashSet<ObjectId>,
    /// Most recent pass position, reported in the session summary.
    last_position: Point,
}

/// Summary returned when a session ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    /// Number of distinct objects erased across all passes.
    pub erased_count: usize,
    /// The session's mode.
    pub mode: EraserMode,
    /// The session's radius.
    pub radius: f64,
    /// Position of the final pass.
    pub last_position: Point,
}

/// Owns eraser sessions and performs hit-test-and-erase passes.
///
/// Sessions live in a map keyed by [`SessionId`] so the interface already
/// generalizes to multiple pointers, but only one session may be open at a
/// time; a second `begin_session` is refused while one is in flight.
#[derive(Debug, Default)]
pub struct Eraser {
    sessions: HashMap<SessionId, EraserSession>,
    open: Option<SessionId>,
}

impl Eraser {
    /// Create a new eraser with no open session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session is currently open.
    pub fn has_open_session(&self) -> bool {
        self.open.is_some()
    }

    /// Start a new session and perform one pass at `point` — a press erases
    /// on contact, not only on drag.
    pub fn begin_session(
        &mut self,
        document: &mut BoardDocument,
        mode: EraserMode,
        radius: f64,
        point: Point,
    ) -> Result<SessionId, EraseError> {
        // Written as a negated comparison so NaN is rejected too; a NaN
        // radius would otherwise make every range check pass.
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(EraseError::InvalidRadius(radius));
        }
        if let Some(open) = self.open {
            return Err(EraseError::SessionOpen(open));
        }

        let id = Uuid::new_v4();
        let mut session = EraserSession {
            mode,
            radius,
            erased: HashSet::new(),
            last_position: point,
        };
        let hits = erase_pass(document, &mut session, point);
        log::debug!(
            "eraser session {} started: mode={} radius={} initial hits={}",
            id,
            mode,
            radius,
            hits
        );

        self.sessions.insert(id, session);
        self.open = Some(id);
        Ok(id)
    }

    /// Perform one pass at a new point. Returns the number of objects erased
    /// by this pass.
    pub fn continue_session(
        &mut self,
        document: &mut BoardDocument,
        id: SessionId,
        point: Point,
    ) -> Result<usize, EraseError> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(EraseError::InvalidSession(id))?;
        session.last_position = point;
        Ok(erase_pass(document, session, point))
    }

    /// Close a session. It becomes invalid for further calls.
    pub fn end_session(&mut self, id: SessionId) -> Result<SessionSummary, EraseError> {
        let session = self
            .sessions
            .remove(&id)
            .ok_or(EraseError::InvalidSession(id))?;
        if self.open == Some(id) {
            self.open = None;
        }

        let summary = SessionSummary {
            erased_count: session.erased.len(),
            mode: session.mode,
            radius: session.radius,
            last_position: session.last_position,
        };
        log::debug!(
            "eraser session {} ended: {} objects erased",
            id,
            summary.erased_count
        );
        Ok(summary)
    }
}

/// One hit-test-and-erase pass at `point`.
///
/// The lock check comes strictly before any geometry test: objects on locked
/// layers are never even considered, so no mode or radius can reach them.
/// The pass is idempotent — matched objects are removed immediately, so a
/// repeat pass at the same point erases nothing new.
fn erase_pass(document: &mut BoardDocument, session: &mut EraserSession, point: Point) -> usize {
    let mut hits: Vec<ObjectId> = Vec::new();
    for layer in document.layers() {
        if layer.locked {
            continue;
        }
        for object in layer.objects() {
            if object.distance_to(point) > session.radius {
                continue;
            }
            if !session.mode.matches(object.kind()) {
                continue;
            }
            hits.push(object.id());
        }
    }

    let mut erased_now = 0;
    for id in hits {
        debug_assert!(
            document
                .layer_of(id)
                .and_then(|lid| document.layer(lid))
                .is_some_and(|l| !l.locked),
            "erase pass selected an object on a locked layer"
        );
        if document.remove_object(id).is_some() && session.erased.insert(id) {
            erased_now += 1;
        }
    }
    erased_now
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{CanvasObject, Figure, Shape, Stroke, Text};
    use crate::tools::EraserMode;

    fn stroke_at(x: f64, y: f64) -> CanvasObject {
        CanvasObject::Stroke(Stroke::from_points(vec![Point::new(x, y)]))
    }

    fn shape_at(x: f64, y: f64) -> CanvasObject {
        CanvasObject::Shape(Shape::new(Figure::Rectangle, Point::new(x, y), 1.0, 1.0))
    }

    #[test]
    fn test_invalid_radius() {
        let mut doc = BoardDocument::new();
        let mut eraser = Eraser::new();

        let result = eraser.begin_session(&mut doc, EraserMode::Pixel, 0.0, Point::ZERO);
        assert!(matches!(result, Err(EraseError::InvalidRadius(_))));
        assert!(!eraser.has_open_session());
    }

    #[test]
    fn test_nonfinite_radius_rejected() {
        // A NaN radius makes every `distance > radius` check false, which
        // would erase the whole canvas; it must be refused up front.
        let mut doc = BoardDocument::new();
        let far = doc.add_object_to_active(stroke_at(10000.0, 10000.0));
        let mut eraser = Eraser::new();

        for radius in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
            let result = eraser.begin_session(&mut doc, EraserMode::Pixel, radius, Point::ZERO);
            assert!(matches!(result, Err(EraseError::InvalidRadius(_))));
        }

        assert!(!eraser.has_open_session());
        assert!(doc.object(far).is_some());
    }

    #[test]
    fn test_single_open_session() {
        let mut doc = BoardDocument::new();
        let mut eraser = Eraser::new();

        let first = eraser
            .begin_session(&mut doc, EraserMode::Pixel, 5.0, Point::ZERO)
            .unwrap();
        let second = eraser.begin_session(&mut doc, EraserMode::Pixel, 5.0, Point::ZERO);
        assert!(matches!(second, Err(EraseError::SessionOpen(id)) if id == first));

        eraser.end_session(first).unwrap();
        assert!(
            eraser
                .begin_session(&mut doc, EraserMode::Pixel, 5.0, Point::ZERO)
                .is_ok()
        );
    }

    #[test]
    fn test_session_invalid_after_end() {
        let mut doc = BoardDocument::new();
        let mut eraser = Eraser::new();

        let id = eraser
            .begin_session(&mut doc, EraserMode::Pixel, 5.0, Point::ZERO)
            .unwrap();
        eraser.end_session(id).unwrap();

        let result = eraser.continue_session(&mut doc, id, Point::ZERO);
        assert!(matches!(result, Err(EraseError::InvalidSession(_))));
        let result = eraser.end_session(id);
        assert!(matches!(result, Err(EraseError::InvalidSession(_))));
    }

    #[test]
    fn test_begin_erases_on_contact() {
        let mut doc = BoardDocument::new();
        doc.add_object_to_active(stroke_at(0.0, 0.0));
        let mut eraser = Eraser::new();

        let id = eraser
            .begin_session(&mut doc, EraserMode::Stroke, 5.0, Point::ZERO)
            .unwrap();
        let summary = eraser.end_session(id).unwrap();

        assert_eq!(summary.erased_count, 1);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_locked_layer_is_untouchable() {
        // Scenario 1: locked layer, Pixel mode with a huge radius
        let mut doc = BoardDocument::new();
        let background = doc.add_layer("Background");
        let id = doc
            .add_object(background, stroke_at(10.0, 10.0))
            .unwrap();
        doc.set_locked(background, true);

        let mut eraser = Eraser::new();
        let session = eraser
            .begin_session(&mut doc, EraserMode::Pixel, 50.0, Point::new(10.0, 10.0))
            .unwrap();
        eraser
            .continue_session(&mut doc, session, Point::new(10.0, 10.0))
            .unwrap();
        let summary = eraser.end_session(session).unwrap();

        assert_eq!(summary.erased_count, 0);
        assert!(doc.object(id).is_some());
    }

    #[test]
    fn test_hidden_unlocked_layer_is_erasable() {
        // Visibility does not protect; the flags are orthogonal.
        let mut doc = BoardDocument::new();
        let hidden = doc.add_layer("Hidden");
        doc.set_visible(hidden, false);
        doc.add_object(hidden, stroke_at(0.0, 0.0));

        let mut eraser = Eraser::new();
        let session = eraser
            .begin_session(&mut doc, EraserMode::Stroke, 5.0, Point::ZERO)
            .unwrap();
        let summary = eraser.end_session(session).unwrap();

        assert_eq!(summary.erased_count, 1);
    }

    #[test]
    fn test_stroke_mode_skips_shapes() {
        // Scenario 2: stroke A at (0,0), shape B at (100,100), mode=Stroke
        let mut doc = BoardDocument::new();
        let a = doc.add_object_to_active(stroke_at(0.0, 0.0));
        let b = doc.add_object_to_active(shape_at(100.0, 100.0));

        let mut eraser = Eraser::new();
        let session = eraser
            .begin_session(&mut doc, EraserMode::Stroke, 5.0, Point::ZERO)
            .unwrap();
        eraser
            .continue_session(&mut doc, session, Point::new(100.0, 100.0))
            .unwrap();
        let summary = eraser.end_session(session).unwrap();

        assert_eq!(summary.erased_count, 1);
        assert!(doc.object(a).is_none());
        assert!(doc.object(b).is_some());
    }

    #[test]
    fn test_pixel_mode_erases_any_kind() {
        // Scenario 3: same layout, mode=Pixel removes both
        let mut doc = BoardDocument::new();
        doc.add_object_to_active(stroke_at(0.0, 0.0));
        doc.add_object_to_active(shape_at(100.0, 100.0));

        let mut eraser = Eraser::new();
        let session = eraser
            .begin_session(&mut doc, EraserMode::Pixel, 5.0, Point::ZERO)
            .unwrap();
        eraser
            .continue_session(&mut doc, session, Point::new(100.0, 100.0))
            .unwrap();
        let summary = eraser.end_session(session).unwrap();

        assert_eq!(summary.erased_count, 2);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_shape_mode_matches_text() {
        let mut doc = BoardDocument::new();
        let text = doc.add_object_to_active(CanvasObject::Text(Text::new(
            Point::new(0.0, 0.0),
            "note".to_string(),
        )));
        let stroke = doc.add_object_to_active(stroke_at(1.0, 1.0));

        let mut eraser = Eraser::new();
        let session = eraser
            .begin_session(&mut doc, EraserMode::Shape, 10.0, Point::ZERO)
            .unwrap();
        let summary = eraser.end_session(session).unwrap();

        assert_eq!(summary.erased_count, 1);
        assert!(doc.object(text).is_none());
        assert!(doc.object(stroke).is_some());
    }

    #[test]
    fn test_repeat_pass_is_idempotent() {
        // Scenario 4: second pass at the same point counts nothing new
        let mut doc = BoardDocument::new();
        doc.add_object_to_active(shape_at(3.0, 3.0));

        let mut eraser = Eraser::new();
        let session = eraser
            .begin_session(&mut doc, EraserMode::Shape, 10.0, Point::new(5.0, 5.0))
            .unwrap();
        let erased_again = eraser
            .continue_session(&mut doc, session, Point::new(5.0, 5.0))
            .unwrap();
        assert_eq!(erased_again, 0);

        let summary = eraser.end_session(session).unwrap();
        assert_eq!(summary.erased_count, 1);
    }

    #[test]
    fn test_radius_monotonicity() {
        // A larger radius erases a superset of what a smaller one erases.
        let layout = |doc: &mut BoardDocument| {
            doc.add_object_to_active(stroke_at(3.0, 0.0));
            doc.add_object_to_active(stroke_at(8.0, 0.0));
            doc.add_object_to_active(stroke_at(20.0, 0.0));
        };

        let mut counts = Vec::new();
        for radius in [1.0, 5.0, 10.0, 25.0] {
            let mut doc = BoardDocument::new();
            layout(&mut doc);

            let mut eraser = Eraser::new();
            let session = eraser
                .begin_session(&mut doc, EraserMode::Stroke, radius, Point::ZERO)
                .unwrap();
            let summary = eraser.end_session(session).unwrap();
            counts.push(summary.erased_count);
        }

        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*counts.last().unwrap(), 3);
    }

    #[test]
    fn test_erasing_empty_space_is_noop() {
        let mut doc = BoardDocument::new();
        doc.add_object_to_active(stroke_at(500.0, 500.0));

        let mut eraser = Eraser::new();
        let session = eraser
            .begin_session(&mut doc, EraserMode::Pixel, 5.0, Point::ZERO)
            .unwrap();
        let summary = eraser.end_session(session).unwrap();

        assert_eq!(summary.erased_count, 0);
        assert_eq!(doc.object_count(), 1);
    }

    #[test]
    fn test_summary_carries_session_parameters() {
        let mut doc = BoardDocument::new();
        let mut eraser = Eraser::new();

        let session = eraser
            .begin_session(&mut doc, EraserMode::Shape, 12.0, Point::new(1.0, 2.0))
            .unwrap();
        eraser
            .continue_session(&mut doc, session, Point::new(7.0, 8.0))
            .unwrap();
        let summary = eraser.end_session(session).unwrap();

        assert_eq!(summary.mode, EraserMode::Shape);
        assert_eq!(summary.radius, 12.0);
        assert_eq!(summary.last_position, Point::new(7.0, 8.0));
    }
}
