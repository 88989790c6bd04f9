//! Headless surface implementation.

use std::collections::HashSet;

use geojson::FeatureCollection;
use tracing::debug;

use super::types::{Paint, PaintValue, PrimitiveKind, RenderSurface, SurfaceError};
use crate::layer::LayerId;

/// A surface that renders nothing but enforces the full call contract.
///
/// Tracks which sources and primitives exist and rejects calls a real
/// renderer would reject, logging each operation. Useful for:
/// - Driving the reconciliation engine headless (the CLI does this)
/// - Exercising engine behavior in tests without a renderer
/// - Debugging reconciliation traffic via the log
#[derive(Debug, Default)]
pub struct NullSurface {
    sources: HashSet<String>,
    primitives: HashSet<String>,
}

impl NullSurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sources currently registered.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Number of primitives currently registered.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }
}

impl RenderSurface for NullSurface {
    fn create_source(
        &mut self,
        id: &LayerId,
        data: &FeatureCollection,
    ) -> Result<(), SurfaceError> {
        if !self.sources.insert(id.as_str().to_string()) {
            return Err(SurfaceError::SourceExists(id.as_str().to_string()));
        }
        debug!(
            source = %id,
            features = data.features.len(),
            "Created source"
        );
        Ok(())
    }

    fn has_source(&self, id: &LayerId) -> bool {
        self.sources.contains(id.as_str())
    }

    fn replace_source_data(
        &mut self,
        id: &LayerId,
        data: &FeatureCollection,
    ) -> Result<(), SurfaceError> {
        if !self.sources.contains(id.as_str()) {
            return Err(SurfaceError::UnknownSource(id.as_str().to_string()));
        }
        debug!(
            source = %id,
            features = data.features.len(),
            "Replaced source data"
        );
        Ok(())
    }

    fn add_primitive(
        &mut self,
        id: &LayerId,
        kind: PrimitiveKind,
        source: &LayerId,
        paint: Paint,
    ) -> Result<(), SurfaceError> {
        if !self.sources.contains(source.as_str()) {
            return Err(SurfaceError::UnknownSource(source.as_str().to_string()));
        }
        self.primitives.insert(id.as_str().to_string());
        debug!(
            primitive = %id,
            %kind,
            color = %paint.color,
            opacity = paint.opacity,
            "Added primitive"
        );
        Ok(())
    }

    fn set_paint_property(
        &mut self,
        id: &LayerId,
        key: &str,
        value: PaintValue,
    ) -> Result<(), SurfaceError> {
        if !self.primitives.contains(id.as_str()) {
            return Err(SurfaceError::UnknownPrimitive(id.as_str().to_string()));
        }
        debug!(primitive = %id, key, %value, "Set paint property");
        Ok(())
    }

    fn set_visibility(&mut self, id: &LayerId, visible: bool) -> Result<(), SurfaceError> {
        if !self.primitives.contains(id.as_str()) {
            return Err(SurfaceError::UnknownPrimitive(id.as_str().to_string()));
        }
        debug!(primitive = %id, visible, "Set visibility");
        Ok(())
    }

    fn destroy(&mut self) {
        debug!(
            sources = self.sources.len(),
            primitives = self.primitives.len(),
            "Destroying surface"
        );
        self.sources.clear();
        self.primitives.clear();
    }
}
