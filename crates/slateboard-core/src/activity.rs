//! Activity log sink for the surrounding application.
//!
//! The sink is injected where it is needed (a single-method capability)
//! instead of being registered in a shared global slot. Recording is
//! fire-and-forget: the core has no contract requiring the sink to exist,
//! succeed, or be synchronous.

use crate::eraser::SessionSummary;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Structured metadata attached to an activity event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetadata {
    /// Eraser mode name ("stroke", "shape", "pixel").
    pub mode: String,
    /// Eraser radius.
    pub size: f64,
    /// Final gesture position.
    pub position: Point,
    /// Distinct objects erased during the session.
    pub erased_count: usize,
}

/// One structured activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Action discriminator, e.g. "erase".
    pub action_type: String,
    /// Human-readable summary.
    pub description: String,
    /// Structured payload.
    pub metadata: ActivityMetadata,
}

impl ActivityEvent {
    /// Build the erase event for a completed session.
    pub fn erase(summary: &SessionSummary) -> Self {
        Self {
            action_type: "erase".to_string(),
            description: format!(
                "Erased {} object(s) with the {} eraser",
                summary.erased_count, summary.mode
            ),
            metadata: ActivityMetadata {
                mode: summary.mode.to_string(),
                size: summary.radius,
                position: summary.last_position,
                erased_count: summary.erased_count,
            },
        }
    }
}

/// A destination for activity events.
pub trait ActivitySink {
    /// Record one event. Implementations must not fail the caller.
    fn record(&self, event: ActivityEvent);
}

/// Sink that discards all events.
#[derive(Debug, Default)]
pub struct NullSink;

impl ActivitySink for NullSink {
    fn record(&self, _event: ActivityEvent) {}
}

/// Sink that keeps events in memory, for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ActivityEvent>>,
}

impl MemorySink {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<ActivityEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl ActivitySink for MemorySink {
    fn record(&self, event: ActivityEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
