//! Ordered layer collection with copy-on-write snapshots
//!
//! The store owns every layer in the session. Mutations are append-only
//! plus per-layer style edits; each one publishes a fresh [`Snapshot`] on
//! a watch channel so the reconciliation engine (and anything else that
//! subscribes) observes changes without holding a lock on the store.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::color::Color;
use crate::layer::{Layer, LayerId};

/// An immutable, ordered view of the layer collection.
///
/// Snapshots are `Arc`-backed and cheap to clone. A snapshot taken before
/// a mutation keeps showing the old state; the store never writes through
/// one. Document order is draw order: index 0 renders first (bottom).
#[derive(Debug, Clone)]
pub struct Snapshot {
    layers: Arc<[Layer]>,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            layers: Arc::from(Vec::new()),
        }
    }

    /// The layers in draw order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Iterates layers in draw order.
    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    /// Looks up a layer by id.
    pub fn find(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    /// Number of layers in the view.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the view contains no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Errors that can occur when mutating the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A layer with this id already exists.
    DuplicateId(LayerId),
    /// No layer with this id exists.
    UnknownLayer(LayerId),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateId(id) => {
                write!(f, "Layer id '{}' already exists in the store", id)
            }
            StoreError::UnknownLayer(id) => {
                write!(f, "No layer with id '{}' in the store", id)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Owns the ordered layer collection.
///
/// Layers are never removed and never reordered; append position is
/// permanent. Geometry is never touched after append: the only in-place
/// edits are the style fields, and even those replace the whole entry so
/// previously taken snapshots stay intact.
pub struct LayerStore {
    layers: Vec<Layer>,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl LayerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let (snapshot_tx, _) = watch::channel(Snapshot::empty());
        Self {
            layers: Vec::new(),
            snapshot_tx,
        }
    }

    /// Appends a layer at the top of the draw order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if a layer with the same id is
    /// already present; the store is left unchanged.
    pub fn append(&mut self, layer: Layer) -> Result<(), StoreError> {
        if self.layers.iter().any(|l| l.id() == layer.id()) {
            return Err(StoreError::DuplicateId(layer.id().clone()));
        }
        debug!(layer_id = %layer.id(), name = %layer.name(), "Appending layer");
        self.layers.push(layer);
        self.publish();
        Ok(())
    }

    /// Sets a layer's visibility flag.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownLayer`] if the id does not resolve.
    pub fn set_visible(&mut self, id: &LayerId, visible: bool) -> Result<(), StoreError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| StoreError::UnknownLayer(id.clone()))?;
        self.layers[index] = self.layers[index].with_visible(visible);
        self.publish();
        Ok(())
    }

    /// Sets a layer's display color.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownLayer`] if the id does not resolve.
    pub fn set_color(&mut self, id: &LayerId, color: Color) -> Result<(), StoreError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| StoreError::UnknownLayer(id.clone()))?;
        self.layers[index] = self.layers[index].with_color(color);
        self.publish();
        Ok(())
    }

    /// Looks up a layer by id.
    pub fn find(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    /// Number of layers in the store.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the store contains no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// The current state as an immutable snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribes to snapshot updates.
    ///
    /// The receiver starts out holding the current snapshot; every store
    /// mutation replaces it. Intermediate snapshots may be skipped when
    /// the consumer lags, which is fine for reconciliation: only the
    /// latest state matters.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    fn index_of(&self, id: &LayerId) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id() == id)
    }

    fn publish(&self) {
        let snapshot = Snapshot {
            layers: Arc::from(self.layers.clone()),
        };
        // send_replace never fails, even with no subscribers
        self.snapshot_tx.send_replace(snapshot);
    }
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}
