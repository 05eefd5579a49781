//! Gesture tracking for eraser input.
//!
//! Translates raw pointer down/move/up events into eraser session calls.
//! Drawing and selection tools have their own gesture handling; this tracker
//! only acts while the active tool is an eraser variant.

use crate::activity::{ActivityEvent, ActivitySink};
use crate::eraser::{EraseError, Eraser, SessionId, SessionSummary};
use crate::layer::BoardDocument;
use crate::tools::ToolManager;
use kurbo::Point;
use std::sync::Arc;

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// Cursor left the canvas. Ends a drag in progress so sessions are never
    /// orphaned; this is designed behavior, not a fallback.
    Leave,
}

/// Drives eraser sessions from pointer events and reports completed sessions
/// to the injected activity sink.
pub struct GestureTracker {
    eraser: Eraser,
    /// The session for the gesture in progress, if any.
    session: Option<SessionId>,
    sink: Arc<dyn ActivitySink>,
}

impl GestureTracker {
    /// Create a tracker reporting to the given sink.
    pub fn new(sink: Arc<dyn ActivitySink>) -> Self {
        Self {
            eraser: Eraser::new(),
            session: None,
            sink,
        }
    }

    /// Whether an erase gesture is in progress.
    pub fn is_erasing(&self) -> bool {
        self.session.is_some()
    }

    /// Process one pointer event.
    ///
    /// Returns the session summary when the event completed an erase gesture
    /// (pointer up or leave), None otherwise.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        tools: &mut ToolManager,
        document: &mut BoardDocument,
    ) -> Option<SessionSummary> {
        match event {
            PointerEvent::Down { position } => {
                self.begin(position, tools, document);
                None
            }
            PointerEvent::Move { position } => {
                self.drag(position, tools, document);
                None
            }
            PointerEvent::Up { position } => {
                self.drag(position, tools, document);
                self.finish(tools)
            }
            PointerEvent::Leave => self.finish(tools),
        }
    }

    fn begin(&mut self, position: Point, tools: &mut ToolManager, document: &mut BoardDocument) {
        let Some(mode) = tools.current_tool().eraser_mode() else {
            return;
        };
        if self.session.is_some() {
            // Already erasing; a duplicate down is folded into the gesture.
            self.drag(position, tools, document);
            return;
        }

        match self
            .eraser
            .begin_session(document, mode, tools.eraser_radius(), position)
        {
            Ok(id) => {
                self.session = Some(id);
                tools.begin_erasing();
            }
            Err(err) => log::warn!("could not start eraser session: {}", err),
        }
    }

    fn drag(&mut self, position: Point, tools: &mut ToolManager, document: &mut BoardDocument) {
        let Some(id) = self.session else {
            return;
        };
        match self.eraser.continue_session(document, id, position) {
            Ok(_) => {}
            Err(EraseError::InvalidSession(_)) => {
                // Stale session id; drop the gesture entirely so the tool
                // manager does not stay in Erasing and refuse tool changes.
                self.session = None;
                tools.finish_erasing();
            }
            Err(err) => log::warn!("eraser pass failed: {}", err),
        }
    }

    fn finish(&mut self, tools: &mut ToolManager) -> Option<SessionSummary> {
        let id = self.session.take()?;
        tools.finish_erasing();
        match self.eraser.end_session(id) {
            Ok(summary) => {
                self.sink.record(ActivityEvent::erase(&summary));
                Some(summary)
            }
            Err(err) => {
                log::warn!("could not end eraser session: {}", err);
                None
            }
        }
    }
}
