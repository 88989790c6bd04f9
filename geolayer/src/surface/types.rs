//! Surface trait and supporting types.

use std::fmt;

use geojson::FeatureCollection;

use crate::color::Color;
use crate::layer::LayerId;

/// Paint opacity applied to visible layers.
pub const VISIBLE_OPACITY: f64 = 0.6;

/// The primitive used to draw a layer on the surface.
///
/// Chosen once at registration from the layer's representative geometry
/// type and kept for the layer's lifetime; paint property keys are derived
/// from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Point-like geometry, drawn as circles.
    Circle,
    /// Line-like geometry, drawn as stroked paths.
    Line,
    /// Polygonal (or unknown) geometry, drawn as filled areas.
    Fill,
}

impl PrimitiveKind {
    /// The kind's name as used in paint property keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Circle => "circle",
            PrimitiveKind::Line => "line",
            PrimitiveKind::Fill => "fill",
        }
    }

    /// Paint property key controlling this primitive's color.
    pub fn color_key(&self) -> String {
        format!("{}-color", self.as_str())
    }

    /// Paint property key controlling this primitive's opacity.
    pub fn opacity_key(&self) -> String {
        format!("{}-opacity", self.as_str())
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Determines the primitive kind for a feature collection.
///
/// The FIRST feature's geometry type decides for the whole layer: point
/// types draw as circles, line types as paths, everything else (polygons,
/// geometry collections, empty layers) as fills. Mixed-type collections
/// therefore style by their first feature; this is a known limitation of
/// one-primitive-per-layer rendering.
///
/// Registration and update both go through this single function, so a
/// layer's paint keys can never disagree between the two paths.
pub fn primitive_kind_of(collection: &FeatureCollection) -> PrimitiveKind {
    let first = collection
        .features
        .first()
        .and_then(|feature| feature.geometry.as_ref());

    match first.map(|geometry| &geometry.value) {
        Some(geojson::Value::Point(_)) | Some(geojson::Value::MultiPoint(_)) => {
            PrimitiveKind::Circle
        }
        Some(geojson::Value::LineString(_)) | Some(geojson::Value::MultiLineString(_)) => {
            PrimitiveKind::Line
        }
        _ => PrimitiveKind::Fill,
    }
}

/// Initial paint state for a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub opacity: f64,
}

/// A value assigned to a single paint property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintValue {
    Color(Color),
    Opacity(f64),
}

impl fmt::Display for PaintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaintValue::Color(color) => write!(f, "{}", color),
            PaintValue::Opacity(opacity) => write!(f, "{}", opacity),
        }
    }
}

/// Errors reported by a rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// `create_source` was called for an id that already has a source.
    SourceExists(String),
    /// The referenced source does not exist on the surface.
    UnknownSource(String),
    /// The referenced primitive does not exist on the surface.
    UnknownPrimitive(String),
    /// The backing renderer rejected the call.
    Backend(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::SourceExists(id) => {
                write!(f, "Source '{}' already exists on the surface", id)
            }
            SurfaceError::UnknownSource(id) => {
                write!(f, "No source '{}' on the surface", id)
            }
            SurfaceError::UnknownPrimitive(id) => {
                write!(f, "No primitive '{}' on the surface", id)
            }
            SurfaceError::Backend(message) => {
                write!(f, "Surface backend error: {}", message)
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A stateful rendering surface the engine synchronizes layers onto.
///
/// Implementations wrap an actual map renderer; [`NullSurface`] provides a
/// headless one. The engine relies on these contract points:
///
/// - A source and its primitive share the layer's id, so one id names the
///   same layer on both sides of the boundary.
/// - `create_source` and `add_primitive` are called at most once per id
///   over the surface's lifetime. Data refreshes go through
///   `replace_source_data`, which swaps a source's content in place
///   without tearing down the primitive reading from it.
/// - `destroy` releases everything and is safe to call on a surface that
///   never registered anything.
///
/// [`NullSurface`]: crate::surface::NullSurface
pub trait RenderSurface: Send {
    /// Creates a geometry source holding the collection.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::SourceExists`] if the id already has a
    /// source.
    fn create_source(
        &mut self,
        id: &LayerId,
        data: &FeatureCollection,
    ) -> Result<(), SurfaceError>;

    /// Whether a source with this id exists on the surface.
    fn has_source(&self, id: &LayerId) -> bool;

    /// Swaps the data of an existing source.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::UnknownSource`] if the source was never
    /// created.
    fn replace_source_data(
        &mut self,
        id: &LayerId,
        data: &FeatureCollection,
    ) -> Result<(), SurfaceError>;

    /// Adds a drawing primitive reading from a source.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::UnknownSource`] if the source does not
    /// exist.
    fn add_primitive(
        &mut self,
        id: &LayerId,
        kind: PrimitiveKind,
        source: &LayerId,
        paint: Paint,
    ) -> Result<(), SurfaceError>;

    /// Sets one paint property of an existing primitive.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::UnknownPrimitive`] if the primitive does
    /// not exist.
    fn set_paint_property(
        &mut self,
        id: &LayerId,
        key: &str,
        value: PaintValue,
    ) -> Result<(), SurfaceError>;

    /// Shows or hides an existing primitive.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::UnknownPrimitive`] if the primitive does
    /// not exist.
    fn set_visibility(&mut self, id: &LayerId, visible: bool) -> Result<(), SurfaceError>;

    /// Tears down every source and primitive this surface holds.
    fn destroy(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{collection, feature_with_properties};

    fn single_feature_collection(value: geojson::Value) -> FeatureCollection {
        collection(vec![feature_with_properties(value, None)])
    }

    #[test]
    fn test_point_maps_to_circle() {
        let fc = single_feature_collection(geojson::Value::Point(vec![0.0, 0.0]));
        assert_eq!(primitive_kind_of(&fc), PrimitiveKind::Circle);
    }

    #[test]
    fn test_multi_point_maps_to_circle() {
        let fc = single_feature_collection(geojson::Value::MultiPoint(vec![vec![0.0, 0.0]]));
        assert_eq!(primitive_kind_of(&fc), PrimitiveKind::Circle);
    }

    #[test]
    fn test_line_string_maps_to_line() {
        let fc = single_feature_collection(geojson::Value::LineString(vec![
            vec![0.0, 0.0],
            vec![1.0, 1.0],
        ]));
        assert_eq!(primitive_kind_of(&fc), PrimitiveKind::Line);
    }

    #[test]
    fn test_polygon_maps_to_fill() {
        let ring = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ];
        let fc = single_feature_collection(geojson::Value::Polygon(vec![ring]));
        assert_eq!(primitive_kind_of(&fc), PrimitiveKind::Fill);
    }

    #[test]
    fn test_empty_collection_maps_to_fill() {
        let fc = crate::geometry::empty_collection();
        assert_eq!(primitive_kind_of(&fc), PrimitiveKind::Fill);
    }

    #[test]
    fn test_first_feature_decides_for_mixed_collection() {
        let fc = collection(vec![
            feature_with_properties(geojson::Value::Point(vec![0.0, 0.0]), None),
            feature_with_properties(
                geojson::Value::LineString(vec![vec![0.0, 0.0], vec![1.0, 1.0]]),
                None,
            ),
        ]);
        assert_eq!(primitive_kind_of(&fc), PrimitiveKind::Circle);
    }

    #[test]
    fn test_paint_property_keys() {
        assert_eq!(PrimitiveKind::Circle.color_key(), "circle-color");
        assert_eq!(PrimitiveKind::Line.opacity_key(), "line-opacity");
        assert_eq!(PrimitiveKind::Fill.color_key(), "fill-color");
    }

    #[test]
    fn test_paint_value_display() {
        let color = PaintValue::Color(crate::color::Color::rgb(0xFF, 0x00, 0x00));
        assert_eq!(color.to_string(), "#FF0000");
        assert_eq!(PaintValue::Opacity(0.6).to_string(), "0.6");
    }
}
