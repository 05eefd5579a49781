//! Tool dispatch for the annotation canvas.

use crate::objects::ObjectKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Erase granularity. Snapshotted into an eraser session at begin; changing
/// modes never retroactively affects a gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EraserMode {
    /// Erase whole freehand strokes only.
    Stroke,
    /// Erase shape and text objects.
    Shape,
    /// Erase anything in range, regardless of kind.
    Pixel,
}

impl EraserMode {
    /// Whether this mode may remove objects of the given kind.
    pub fn matches(&self, kind: ObjectKind) -> bool {
        match self {
            EraserMode::Stroke => kind == ObjectKind::Stroke,
            EraserMode::Shape => matches!(kind, ObjectKind::Shape | ObjectKind::Text),
            EraserMode::Pixel => true,
        }
    }
}

impl fmt::Display for EraserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EraserMode::Stroke => "stroke",
            EraserMode::Shape => "shape",
            EraserMode::Pixel => "pixel",
        };
        write!(f, "{}", name)
    }
}

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Pen,
    Shape,
    Text,
    Eraser(EraserMode),
}

impl ToolKind {
    /// Get the eraser mode if this is an eraser variant.
    pub fn eraser_mode(&self) -> Option<EraserMode> {
        match self {
            ToolKind::Eraser(mode) => Some(*mode),
            _ => None,
        }
    }
}

/// State of the eraser gesture path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// An erase gesture is in progress.
    Erasing,
}

/// Single source of truth for the active tool and eraser size.
///
/// While a gesture is in progress, tool and radius changes are refused so
/// sessions stay well-formed even if a caller forgets to disable its tool
/// buttons mid-drag.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    current_tool: ToolKind,
    /// Eraser radius applied to new sessions.
    eraser_radius: f64,
    /// Current gesture state.
    state: DispatchState,
}

/// Default eraser radius, matching the whiteboard's UI default.
pub const DEFAULT_ERASER_RADIUS: f64 = 10.0;

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            eraser_radius: DEFAULT_ERASER_RADIUS,
            state: DispatchState::Idle,
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active tool.
    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    /// The eraser radius applied to new sessions.
    pub fn eraser_radius(&self) -> f64 {
        self.eraser_radius
    }

    /// Set the active tool. Refused (returns false) while a gesture is in
    /// progress; allowed transitions are Idle → Idle only.
    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        if self.state == DispatchState::Erasing {
            log::warn!("ignoring tool change to {:?} during erase gesture", tool);
            return false;
        }
        self.current_tool = tool;
        true
    }

    /// Set the eraser radius for future sessions. Refused mid-gesture; an
    /// open session keeps the radius it was started with either way.
    /// The radius must be positive and finite.
    pub fn set_eraser_radius(&mut self, radius: f64) -> bool {
        if !(radius > 0.0) || !radius.is_finite() {
            log::warn!("ignoring invalid eraser radius {}", radius);
            return false;
        }
        if self.state == DispatchState::Erasing {
            log::warn!("ignoring eraser radius change during erase gesture");
            return false;
        }
        self.eraser_radius = radius;
        true
    }

    /// Mark the start of an erase gesture.
    pub(crate) fn begin_erasing(&mut self) {
        self.state = DispatchState::Erasing;
    }

    /// Mark the end of an erase gesture.
    pub(crate) fn finish_erasing(&mut self) {
        self.state = DispatchState::Idle;
    }

    /// Whether an erase gesture is in progress.
    pub fn is_erasing(&self) -> bool {
        self.state == DispatchState::Erasing
    }
}
