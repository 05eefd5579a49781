//! Slateboard Core Library
//!
//! Platform-agnostic annotation-canvas model for the Slateboard classroom
//! whiteboard: layered objects, tool dispatch, and collision-aware erasing
//! that respects per-layer lock state.

pub mod activity;
pub mod eraser;
pub mod gesture;
pub mod layer;
pub mod objects;
pub mod storage;
pub mod tools;

pub use activity::{ActivityEvent, ActivityMetadata, ActivitySink, MemorySink, NullSink};
pub use eraser::{EraseError, Eraser, SessionId, SessionSummary};
pub use gesture::{GestureTracker, PointerEvent};
pub use layer::{BoardDocument, Layer, LayerId};
pub use objects::{CanvasObject, ObjectId, ObjectKind};
pub use storage::{MemoryStorage, Storage, StorageError};
pub use tools::{DEFAULT_ERASER_RADIUS, EraserMode, ToolKind, ToolManager};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
