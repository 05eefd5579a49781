//! Layer model and board document.

use crate::objects::{CanvasObject, ObjectId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for layers.
pub type LayerId = Uuid;

/// A named, ordered container of canvas objects.
///
/// Layers own their objects exclusively; deleting a layer deletes everything
/// on it. `locked` protects every owned object from erasure regardless of
/// eraser mode or radius. `visible` only affects rendering and is deliberately
/// orthogonal to erasability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Unique identifier.
    pub id: LayerId,
    /// Display name.
    pub name: String,
    /// When true, no object on this layer may be erased.
    pub locked: bool,
    /// Whether the layer is currently rendered.
    pub visible: bool,
    /// Objects owned by this layer, in draw order (back to front).
    objects: Vec<CanvasObject>,
}

impl Layer {
    /// Create a new empty, unlocked, visible layer.
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            locked: false,
            visible: true,
            objects: Vec::new(),
        }
    }

    /// Append an object to this layer.
    pub fn add_object(&mut self, object: CanvasObject) -> ObjectId {
        let id = object.id();
        self.objects.push(object);
        id
    }

    /// Objects in draw order.
    pub fn objects(&self) -> &[CanvasObject] {
        &self.objects
    }

    /// Look up an object by id.
    pub fn object(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    /// Whether this layer owns the given object.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|o| o.id() == id)
    }

    /// Number of owned objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the layer has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove an object by id. Only `BoardDocument::remove_object` may call
    /// this; all structural deletions go through that single primitive.
    fn remove_object(&mut self, id: ObjectId) -> Option<CanvasObject> {
        let index = self.objects.iter().position(|o| o.id() == id)?;
        Some(self.objects.remove(index))
    }
}

/// A board document: the authoritative, ordered set of layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// Layers in stacking order (back to front).
    layers: Vec<Layer>,
    /// Id of the layer new objects are added to.
    pub active_layer: LayerId,
}

impl Default for BoardDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardDocument {
    /// Create a new document with a single unlocked, visible layer.
    pub fn new() -> Self {
        let base = Layer::new("Layer 1");
        let active_layer = base.id;
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            layers: vec![base],
            active_layer,
        }
    }

    /// Layers in stacking order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Look up a layer by id.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Add a new empty layer on top of the stack and return its id.
    pub fn add_layer(&mut self, name: &str) -> LayerId {
        let layer = Layer::new(name);
        let id = layer.id;
        self.layers.push(layer);
        id
    }

    /// Remove a layer and everything it owns (cascading delete).
    ///
    /// The last remaining layer cannot be removed; a document always has at
    /// least one layer. If the active layer is removed, the topmost remaining
    /// layer becomes active.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        if self.layers.len() <= 1 {
            return None;
        }
        let index = self.layers.iter().position(|l| l.id == id)?;
        let removed = self.layers.remove(index);
        if self.active_layer == id {
            // Unwrap is fine: at least one layer always remains.
            self.active_layer = self.layers.last().map(|l| l.id).unwrap_or(removed.id);
        }
        Some(removed)
    }

    /// Rename a layer. Returns false if the layer does not exist.
    pub fn rename_layer(&mut self, id: LayerId, name: &str) -> bool {
        match self.layer_mut(id) {
            Some(layer) => {
                layer.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Set a layer's lock flag. Returns false if the layer does not exist.
    pub fn set_locked(&mut self, id: LayerId, locked: bool) -> bool {
        match self.layer_mut(id) {
            Some(layer) => {
                layer.locked = locked;
                true
            }
            None => false,
        }
    }

    /// Set a layer's visibility flag. Returns false if the layer does not exist.
    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> bool {
        match self.layer_mut(id) {
            Some(layer) => {
                layer.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Move a layer to a new position in the stacking order.
    pub fn move_layer(&mut self, id: LayerId, index: usize) -> bool {
        let Some(from) = self.layers.iter().position(|l| l.id == id) else {
            return false;
        };
        let layer = self.layers.remove(from);
        let index = index.min(self.layers.len());
        self.layers.insert(index, layer);
        true
    }

    /// Set the layer new objects are added to. Returns false if unknown.
    pub fn set_active_layer(&mut self, id: LayerId) -> bool {
        if self.layer(id).is_some() {
            self.active_layer = id;
            true
        } else {
            false
        }
    }

    /// Append an object to a layer (the creation-source boundary).
    ///
    /// Returns the object's id, or None if the layer does not exist.
    pub fn add_object(&mut self, layer_id: LayerId, object: CanvasObject) -> Option<ObjectId> {
        Some(self.layer_mut(layer_id)?.add_object(object))
    }

    /// Append an object to the active layer.
    pub fn add_object_to_active(&mut self, object: CanvasObject) -> ObjectId {
        let active = self.active_layer;
        self.add_object(active, object)
            .unwrap_or_else(|| unreachable!("active layer always exists"))
    }

    /// Remove an object by id, whichever layer owns it.
    ///
    /// This is the single structural deletion primitive; `None` means the
    /// object was not found (already erased, or never existed), which callers
    /// treat as a no-op.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<CanvasObject> {
        self.layers.iter_mut().find_map(|l| l.remove_object(id))
    }

    /// Look up an object by id across all layers.
    pub fn object(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.layers.iter().find_map(|l| l.object(id))
    }

    /// Find the layer owning an object.
    pub fn layer_of(&self, id: ObjectId) -> Option<LayerId> {
        self.layers.iter().find(|l| l.contains(id)).map(|l| l.id)
    }

    /// Total number of objects across all layers.
    pub fn object_count(&self) -> usize {
        self.layers.iter().map(|l| l.len()).sum()
    }

    /// Check if the document has no objects.
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|l| l.is_empty())
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    ///
    /// Hand-edited or corrupt files may violate the document invariants
    /// (no layers, or an `active_layer` that references none of them);
    /// those are repaired on load rather than panicking later.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut doc: Self = serde_json::from_str(json)?;
        if doc.layers.is_empty() {
            log::warn!("loaded document {} has no layers; adding one", doc.id);
            doc.layers.push(Layer::new("Layer 1"));
        }
        if doc.layer(doc.active_layer).is_none() {
            log::warn!(
                "loaded document {} has a dangling active layer; using the topmost",
                doc.id
            );
            doc.active_layer = doc.layers[doc.layers.len() - 1].id;
        }
        Ok(doc)
    }
}
