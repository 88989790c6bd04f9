//! Session facade wiring the store, pipeline, and engine.

use std::path::Path;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::color::{Color, ColorWheel};
use crate::id::{IdGenerator, UuidIdGenerator};
use crate::ingest;
use crate::layer::{Layer, LayerId};
use crate::ops::{self, OpError};
use crate::reconcile::ReconcileEngine;
use crate::store::{LayerStore, Snapshot, StoreError};
use crate::surface::RenderSurface;

/// High-level facade over the layer store and the operation pipeline.
///
/// Owns the store, the upload color cycle, and the id generator for
/// derived layers, and collects user-facing error notices. Operation
/// methods run a pipeline function over the current snapshot and append
/// the result; every mutation publishes a fresh snapshot that attached
/// engines observe.
///
/// # Example
///
/// ```ignore
/// use geolayer::session::Session;
///
/// let mut session = Session::new();
/// session.ingest_document("parks.geojson", &text);
/// let halo = session.buffer(&"parks.geojson".into(), 250.0, "Park halo")?;
/// ```
pub struct Session {
    store: LayerStore,
    ids: Box<dyn IdGenerator>,
    colors: ColorWheel,
    notices: Vec<String>,
}

impl Session {
    /// Creates a session with UUID-based ids for derived layers.
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(UuidIdGenerator::new()))
    }

    /// Creates a session with a caller-supplied id generator.
    ///
    /// Tests use this with a sequential generator to get stable ids.
    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            store: LayerStore::new(),
            ids,
            colors: ColorWheel::new(),
            notices: Vec::new(),
        }
    }

    /// The current snapshot of the layer collection.
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Subscribes to snapshot publications, for driving an engine.
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<Snapshot> {
        self.store.subscribe()
    }

    /// Number of layers currently in the store.
    pub fn layer_count(&self) -> usize {
        self.store.len()
    }

    /// User-facing error notices collected so far, oldest first.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Clears all collected notices.
    pub fn dismiss_notices(&mut self) {
        self.notices.clear();
    }

    /// Parses a GeoJSON document and appends it as a layer.
    ///
    /// The layer takes the next palette color; a document that fails to
    /// parse leaves the color cycle where it was. Failures become
    /// notices, so loading several documents isolates bad ones while the
    /// rest land.
    ///
    /// Returns whether the layer landed in the store.
    pub fn ingest_document(&mut self, source_name: &str, text: &str) -> bool {
        let layer = match ingest::parse_layer(source_name, text, self.colors.peek()) {
            Ok(layer) => {
                self.colors.next_color();
                layer
            }
            Err(err) => {
                warn!(source = source_name, error = %err, "Document rejected");
                self.notices.push(err.to_string());
                return false;
            }
        };

        match self.store.append(layer) {
            Ok(()) => true,
            Err(err) => {
                self.notices.push(err.to_string());
                false
            }
        }
    }

    /// Reads a file and ingests it as a layer named after the file.
    ///
    /// Read errors become notices like parse errors do.
    pub fn ingest_file(&mut self, path: &Path) -> bool {
        let source_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Failed to read file");
                self.notices
                    .push(format!("failed to read '{}': {}", path.display(), err));
                return false;
            }
        };

        self.ingest_document(&source_name, &text)
    }

    /// Toggles a layer's visibility.
    pub fn toggle_visible(&mut self, id: &LayerId) -> Result<(), StoreError> {
        let visible = self
            .store
            .find(id)
            .map(Layer::visible)
            .ok_or_else(|| StoreError::UnknownLayer(id.clone()))?;
        self.store.set_visible(id, !visible)
    }

    /// Sets a layer's visibility.
    pub fn set_visible(&mut self, id: &LayerId, visible: bool) -> Result<(), StoreError> {
        self.store.set_visible(id, visible)
    }

    /// Sets a layer's display color.
    pub fn set_color(&mut self, id: &LayerId, color: Color) -> Result<(), StoreError> {
        self.store.set_color(id, color)
    }

    /// Buffers a layer and appends the result.
    ///
    /// On failure the error is also recorded as a notice; the store is
    /// untouched.
    pub fn buffer(
        &mut self,
        layer_id: &LayerId,
        radius_meters: f64,
        name: &str,
    ) -> Result<Layer, OpError> {
        let result = ops::buffer(
            &self.store.snapshot(),
            layer_id,
            radius_meters,
            name,
            self.ids.as_ref(),
        );
        self.land(result)
    }

    /// Unions the first features of two layers and appends the result.
    ///
    /// `None` means the operation did not apply (silent no-op).
    pub fn union(&mut self, first: &LayerId, second: &LayerId, name: &str) -> Option<Layer> {
        let produced = ops::union(
            &self.store.snapshot(),
            first,
            second,
            name,
            self.ids.as_ref(),
        )?;
        Some(self.append_derived(produced))
    }

    /// Subtracts one layer's first feature from another's and appends the
    /// result. `None` means the operation did not apply or left nothing of
    /// the base; either way the store is untouched.
    pub fn difference(&mut self, base: &LayerId, subtract: &LayerId, name: &str) -> Option<Layer> {
        let produced = ops::difference(
            &self.store.snapshot(),
            base,
            subtract,
            name,
            self.ids.as_ref(),
        )?;
        Some(self.append_derived(produced))
    }

    /// Intersects two layers feature-by-feature and appends the result.
    ///
    /// On failure the error is also recorded as a notice; the store is
    /// untouched.
    pub fn intersect(
        &mut self,
        first: &LayerId,
        second: &LayerId,
        name: &str,
    ) -> Result<Layer, OpError> {
        let result = ops::intersect(
            &self.store.snapshot(),
            first,
            second,
            name,
            self.ids.as_ref(),
        );
        self.land(result)
    }

    /// Clips target layers against a clip layer and appends every
    /// produced layer. Fully silent: combinations that do not apply are
    /// skipped and an empty result is not an error.
    pub fn clip(&mut self, targets: &[LayerId], clip_id: &LayerId, name: &str) -> Vec<Layer> {
        let produced = ops::clip(
            &self.store.snapshot(),
            targets,
            clip_id,
            name,
            self.ids.as_ref(),
        );
        produced
            .into_iter()
            .map(|layer| self.append_derived(layer))
            .collect()
    }

    /// Spawns the engine as a background task driven by this session's
    /// snapshot publications.
    ///
    /// The engine waits for [`SurfaceAttachment::surface_ready`] before
    /// its first pass and stops when the session is dropped.
    pub fn attach_engine<S>(&self, engine: ReconcileEngine<S>) -> SurfaceAttachment
    where
        S: RenderSurface + 'static,
    {
        let (ready_tx, ready_rx) = oneshot::channel();
        let task = tokio::spawn(engine.run(ready_rx, self.store.subscribe()));
        debug!("Reconciliation engine attached");
        SurfaceAttachment {
            ready: Some(ready_tx),
            task,
        }
    }

    /// Convenience for [`attach_engine`](Self::attach_engine) with a
    /// default-configured engine.
    pub fn attach_surface<S>(&self, surface: S) -> SurfaceAttachment
    where
        S: RenderSurface + 'static,
    {
        self.attach_engine(ReconcileEngine::new(surface))
    }

    fn land(&mut self, result: Result<Layer, OpError>) -> Result<Layer, OpError> {
        match result {
            Ok(layer) => Ok(self.append_derived(layer)),
            Err(err) => {
                self.notices.push(err.to_string());
                Err(err)
            }
        }
    }

    fn append_derived(&mut self, layer: Layer) -> Layer {
        // Derived ids are generator-fresh, so a duplicate can only come
        // from a colliding custom generator; it is noticed, not fatal.
        if let Err(err) = self.store.append(layer.clone()) {
            self.notices.push(err.to_string());
        }
        layer
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a spawned reconciliation task.
pub struct SurfaceAttachment {
    ready: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SurfaceAttachment {
    /// Signals that the surface finished loading. The engine then runs
    /// its first pass over the latest snapshot. Calling this more than
    /// once has no effect.
    pub fn surface_ready(&mut self) {
        if let Some(ready) = self.ready.take() {
            // The engine may already be gone; then there is nothing to wake.
            let _ = ready.send(());
        }
    }

    /// Waits for the engine task to finish (it finishes when the session
    /// that produced it is dropped).
    pub async fn join(self) -> Result<(), tokio::task::JoinError> {
        self.task.await
    }
}
