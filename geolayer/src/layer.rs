//! Layer entity and identifier types

use std::fmt;
use std::sync::Arc;

use geojson::FeatureCollection;

use crate::color::Color;

/// Unique identifier for a layer.
///
/// The same id names the layer in the store and its source and primitive
/// on the rendering surface, so the two sides never need a mapping table.
/// Uploaded layers take their source name as id; derived layers get a
/// fresh id from an [`IdGenerator`](crate::id::IdGenerator).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(String);

impl LayerId {
    /// Creates a layer ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, styled collection of geographic features treated as one unit.
///
/// Geometry is frozen at construction: operations that transform a layer
/// build a new one and leave the input untouched. The feature collection
/// sits behind an `Arc`, so cloning a layer (and snapshotting the store)
/// never copies coordinates. Style fields change through the store, which
/// replaces the whole entry copy-on-write.
#[derive(Debug, Clone)]
pub struct Layer {
    id: LayerId,
    name: String,
    geometry: Arc<FeatureCollection>,
    visible: bool,
    color: Color,
}

impl Layer {
    /// Creates a visible layer from a feature collection.
    pub fn new(
        id: LayerId,
        name: impl Into<String>,
        geometry: FeatureCollection,
        color: Color,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            geometry: Arc::new(geometry),
            visible: true,
            color,
        }
    }

    /// The layer's unique identifier.
    pub fn id(&self) -> &LayerId {
        &self.id
    }

    /// The display name. Not unique; purely presentational.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The layer's features, in order.
    pub fn geometry(&self) -> &FeatureCollection {
        &self.geometry
    }

    /// Shared handle to the feature collection.
    ///
    /// Used when the geometry needs to outlive a snapshot borrow, e.g.
    /// when serializing source data for the rendering surface.
    pub fn geometry_arc(&self) -> Arc<FeatureCollection> {
        Arc::clone(&self.geometry)
    }

    /// Number of features in the layer.
    pub fn feature_count(&self) -> usize {
        self.geometry.features.len()
    }

    /// The first feature, which determines the layer's representative
    /// geometry type for styling.
    pub fn first_feature(&self) -> Option<&geojson::Feature> {
        self.geometry.features.first()
    }

    /// Whether the layer is currently shown.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// The layer's display color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Copy of this layer with a different visibility flag.
    pub(crate) fn with_visible(&self, visible: bool) -> Self {
        Self {
            visible,
            ..self.clone()
        }
    }

    /// Copy of this layer with a different color.
    pub(crate) fn with_color(&self, color: Color) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_collection() -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: vec![],
            foreign_members: None,
        }
    }

    #[test]
    fn test_layer_id_display_matches_input() {
        let id = LayerId::new("parcels.geojson");
        assert_eq!(id.to_string(), "parcels.geojson");
        assert_eq!(id.as_str(), "parcels.geojson");
    }

    #[test]
    fn test_layer_ids_compare_by_value() {
        assert_eq!(LayerId::new("a"), LayerId::new("a"));
        assert_ne!(LayerId::new("a"), LayerId::new("b"));
    }

    #[test]
    fn test_new_layer_is_visible() {
        let layer = Layer::new(
            LayerId::new("a"),
            "A",
            empty_collection(),
            Color::rgb(0xFF, 0x63, 0x47),
        );
        assert!(layer.visible());
        assert_eq!(layer.feature_count(), 0);
    }

    #[test]
    fn test_with_visible_changes_only_visibility() {
        let layer = Layer::new(
            LayerId::new("a"),
            "A",
            empty_collection(),
            Color::rgb(0xFF, 0x63, 0x47),
        );
        let hidden = layer.with_visible(false);

        assert!(!hidden.visible());
        assert_eq!(hidden.id(), layer.id());
        assert_eq!(hidden.name(), layer.name());
        assert_eq!(hidden.color(), layer.color());
    }

    #[test]
    fn test_style_updates_share_geometry() {
        let layer = Layer::new(
            LayerId::new("a"),
            "A",
            empty_collection(),
            Color::rgb(0xFF, 0x63, 0x47),
        );
        let recolored = layer.with_color(Color::rgb(0x20, 0xB2, 0xAA));

        assert!(Arc::ptr_eq(&layer.geometry_arc(), &recolored.geometry_arc()));
    }
}
