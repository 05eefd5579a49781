//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::layer::BoardDocument;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory storage for testing and ephemeral use. Saving under an
/// existing id replaces the stored board.
#[derive(Default)]
pub struct MemoryStorage {
    boards: RwLock<HashMap<String, BoardDocument>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored boards.
    pub fn len(&self) -> usize {
        self.read().map(|b| b.len()).unwrap_or(0)
    }

    /// Check if no boards are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, HashMap<String, BoardDocument>>> {
        self.boards
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, HashMap<String, BoardDocument>>> {
        self.boards
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, board: &BoardDocument) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let board = board.clone();
        Box::pin(async move {
            self.write()?.insert(id, board);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<BoardDocument>> {
        let id = id.to_string();
        Box::pin(async move {
            self.read()?
                .get(&id)
                .cloned()
                .ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.write()?.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move { Ok(self.read()?.keys().cloned().collect()) })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.read()?.contains_key(&id)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{CanvasObject, Stroke};
    use crate::storage::block_on;
    use kurbo::Point;

    fn lesson_board() -> BoardDocument {
        let mut board = BoardDocument::new();
        board.name = "Geometry lesson".to_string();
        let background = board.add_layer("Background");
        board.add_object(
            background,
            CanvasObject::Stroke(Stroke::from_points(vec![Point::new(3.0, 4.0)])),
        );
        board.set_locked(background, true);
        board
    }

    #[test]
    fn test_round_trip_preserves_board_state() {
        let storage = MemoryStorage::new();
        let board = lesson_board();

        block_on(storage.save("lesson", &board)).unwrap();
        let loaded = block_on(storage.load("lesson")).unwrap();

        assert_eq!(loaded.id, board.id);
        assert_eq!(loaded.name, "Geometry lesson");
        assert_eq!(loaded.layers().len(), 2);
        assert!(loaded.layers()[1].locked);
        assert_eq!(loaded.object_count(), 1);
    }

    #[test]
    fn test_save_overwrites_existing_board() {
        let storage = MemoryStorage::new();
        let mut board = lesson_board();

        block_on(storage.save("lesson", &board)).unwrap();
        board.name = "Geometry lesson (revised)".to_string();
        block_on(storage.save("lesson", &board)).unwrap();

        let loaded = block_on(storage.load("lesson")).unwrap();
        assert_eq!(loaded.name, "Geometry lesson (revised)");
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_load_unknown_board() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("never-saved"));

        assert!(matches!(result, Err(StorageError::NotFound(id)) if id == "never-saved"));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let storage = MemoryStorage::new();
        block_on(storage.save("lesson", &lesson_board())).unwrap();

        block_on(storage.delete("lesson")).unwrap();
        assert!(!block_on(storage.exists("lesson")).unwrap());
        // Deleting again is still Ok
        block_on(storage.delete("lesson")).unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_list_reflects_saved_boards() {
        let storage = MemoryStorage::new();
        assert!(block_on(storage.list()).unwrap().is_empty());

        block_on(storage.save("monday", &lesson_board())).unwrap();
        block_on(storage.save("tuesday", &lesson_board())).unwrap();

        let mut ids = block_on(storage.list()).unwrap();
        ids.sort();
        assert_eq!(ids, vec!["monday".to_string(), "tuesday".to_string()]);
    }
}
