//! Layer reconciliation engine
//!
//! Drives a [`RenderSurface`] to match store snapshots. Each layer id has
//! a small lifecycle on the surface: unseen ids get a source and a
//! primitive created once, seen ids get their data and paint refreshed in
//! place. The engine never destroys individual layers; the surface as a
//! whole is torn down when the engine is dropped.
//!
//! The expensive surface operations (`create_source`, `add_primitive`)
//! happen at most once per id, which is what keeps repeated passes cheap
//! and flicker-free. The binding map is the guard: a pass over an
//! unchanged snapshot re-issues none of them.

use std::collections::HashMap;

use tokio::sync::{oneshot, watch};
use tracing::{debug, info, warn};

use crate::layer::{Layer, LayerId};
use crate::store::Snapshot;
use crate::surface::{primitive_kind_of, Paint, PaintValue, RenderSurface, VISIBLE_OPACITY};

/// Surface-side state of one layer id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    /// Source and primitive exist; refresh in place from now on.
    Registered,
    /// Registration failed part-way. The surface may hold partial state
    /// for this id, so re-running registration could create the same
    /// source twice; the id is parked instead.
    Failed,
}

/// Counts from one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Layers newly registered on the surface.
    pub registered: usize,
    /// Already-registered layers refreshed.
    pub updated: usize,
    /// Layers whose registration or refresh reported a surface error.
    pub failed: usize,
    /// Parked layers passed over.
    pub skipped: usize,
}

/// Synchronizes store snapshots onto a rendering surface.
///
/// The engine owns the surface for its whole life and tears it down on
/// drop, whatever path execution leaves by. Per-layer surface errors are
/// contained: one failing layer is logged and parked (or retried next
/// pass, for refresh errors) while every other layer proceeds.
pub struct ReconcileEngine<S: RenderSurface> {
    surface: S,
    bindings: HashMap<LayerId, Binding>,
    visible_opacity: f64,
}

impl<S: RenderSurface> ReconcileEngine<S> {
    /// Creates an engine with the default visible opacity.
    pub fn new(surface: S) -> Self {
        Self::with_visible_opacity(surface, VISIBLE_OPACITY)
    }

    /// Creates an engine that paints visible layers at the given opacity.
    pub fn with_visible_opacity(surface: S, visible_opacity: f64) -> Self {
        Self {
            surface,
            bindings: HashMap::new(),
            visible_opacity,
        }
    }

    /// The surface being driven.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Runs one reconciliation pass over a snapshot.
    ///
    /// Layers are visited in draw order. Ids not present in the snapshot
    /// are left alone; the store never removes layers, so an id missing
    /// from a later snapshot cannot happen outside teardown.
    ///
    /// A pass over an unchanged snapshot issues zero `create_source` or
    /// `add_primitive` calls; the returned summary shows every layer on
    /// the update path.
    pub fn reconcile(&mut self, snapshot: &Snapshot) -> PassSummary {
        let mut summary = PassSummary::default();

        for layer in snapshot.iter() {
            match self.bindings.get(layer.id()) {
                None => match self.register(layer) {
                    Ok(()) => {
                        self.bindings
                            .insert(layer.id().clone(), Binding::Registered);
                        summary.registered += 1;
                    }
                    Err(err) => {
                        warn!(
                            layer = %layer.id(),
                            error = %err,
                            "Layer registration failed; parking layer"
                        );
                        self.bindings.insert(layer.id().clone(), Binding::Failed);
                        summary.failed += 1;
                    }
                },
                Some(Binding::Registered) => match self.update(layer) {
                    Ok(()) => summary.updated += 1,
                    Err(err) => {
                        // Refreshes are contract-safe to retry, so the
                        // binding stays registered for the next pass.
                        warn!(layer = %layer.id(), error = %err, "Layer refresh failed");
                        summary.failed += 1;
                    }
                },
                Some(Binding::Failed) => summary.skipped += 1,
            }
        }

        debug!(
            registered = summary.registered,
            updated = summary.updated,
            failed = summary.failed,
            skipped = summary.skipped,
            "Reconciliation pass complete"
        );
        summary
    }

    /// Consumes the engine and drives it from a snapshot channel.
    ///
    /// The first pass waits for the readiness signal. Snapshots published
    /// before readiness are not lost: the watch channel holds the latest
    /// one, and the initial pass replays it. After that, one pass runs
    /// per observed change until the store side closes the channel.
    ///
    /// The surface is torn down when this returns, including the case
    /// where the readiness signal is dropped without ever firing.
    pub async fn run(
        mut self,
        ready: oneshot::Receiver<()>,
        mut snapshots: watch::Receiver<Snapshot>,
    ) {
        if ready.await.is_err() {
            info!("Surface readiness signal dropped before it fired; tearing down");
            return;
        }
        info!("Surface ready; reconciliation loop starting");

        let snapshot = snapshots.borrow_and_update().clone();
        self.reconcile(&snapshot);

        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            self.reconcile(&snapshot);
        }

        debug!("Snapshot channel closed; reconciliation loop ending");
    }

    fn register(&mut self, layer: &Layer) -> Result<(), crate::surface::SurfaceError> {
        if self.surface.has_source(layer.id()) {
            // The surface kept state from an earlier engine life; adopt
            // the existing source and primitive instead of re-creating.
            debug!(layer = %layer.id(), "Adopting existing source");
            return Ok(());
        }

        self.surface.create_source(layer.id(), layer.geometry())?;

        let kind = primitive_kind_of(layer.geometry());
        let paint = Paint {
            color: layer.color(),
            opacity: self.opacity_for(layer),
        };
        self.surface
            .add_primitive(layer.id(), kind, layer.id(), paint)?;

        info!(layer = %layer.id(), %kind, color = %layer.color(), "Registered layer");
        Ok(())
    }

    fn update(&mut self, layer: &Layer) -> Result<(), crate::surface::SurfaceError> {
        self.surface
            .replace_source_data(layer.id(), layer.geometry())?;

        let kind = primitive_kind_of(layer.geometry());
        self.surface.set_paint_property(
            layer.id(),
            &kind.color_key(),
            PaintValue::Color(layer.color()),
        )?;
        self.surface.set_paint_property(
            layer.id(),
            &kind.opacity_key(),
            PaintValue::Opacity(self.opacity_for(layer)),
        )?;
        self.surface.set_visibility(layer.id(), layer.visible())?;
        Ok(())
    }

    fn opacity_for(&self, layer: &Layer) -> f64 {
        if layer.visible() {
            self.visible_opacity
        } else {
            0.0
        }
    }
}

impl<S: RenderSurface> Drop for ReconcileEngine<S> {
    fn drop(&mut self) {
        // Unconditional teardown; runs on every exit path.
        self.surface.destroy();
    }
}
