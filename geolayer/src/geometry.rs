//! Conversions between GeoJSON features and `geo` geometries
//!
//! The pipeline stores layers as GeoJSON (the ingest and surface format)
//! but computes with `geo` types. Everything here is lossless in the
//! polygonal direction the boolean operations care about; conversions that
//! cannot succeed return `None` and the caller decides whether that means
//! "skip the feature" or "report an error".

use geo::{Geometry, MultiPolygon};
use geojson::{Feature, JsonObject};

/// Converts a feature's geometry into its `geo` counterpart.
///
/// Returns `None` for features without geometry and for documents whose
/// coordinates do not form a valid geometry of their declared type.
pub fn feature_geometry(feature: &Feature) -> Option<Geometry<f64>> {
    let geometry = feature.geometry.as_ref()?;
    Geometry::try_from(&geometry.value).ok()
}

/// Extracts the polygonal content of a geometry as a `MultiPolygon`.
///
/// Single polygons are wrapped; anything else (points, lines, collections)
/// yields `None`. The boolean operations are defined over polygonal
/// operands only, and this is where that requirement is enforced.
pub fn as_polygonal(geometry: &Geometry<f64>) -> Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(polygon) => Some(MultiPolygon(vec![polygon.clone()])),
        Geometry::MultiPolygon(multi) => Some(multi.clone()),
        _ => None,
    }
}

/// Extracts the polygonal content of a feature. See [`as_polygonal`].
pub fn polygonal(feature: &Feature) -> Option<MultiPolygon<f64>> {
    as_polygonal(&feature_geometry(feature)?)
}

/// Builds a GeoJSON geometry value from polygonal output.
///
/// A single-polygon result collapses to a plain `Polygon`, matching what
/// readers of the exported GeoJSON expect for simple shapes.
pub fn polygonal_value(multi: &MultiPolygon<f64>) -> geojson::Value {
    if multi.0.len() == 1 {
        geojson::Value::from(&multi.0[0])
    } else {
        geojson::Value::from(multi)
    }
}

/// Wraps a geometry value and property bag into a feature.
pub fn feature_with_properties(
    value: geojson::Value,
    properties: Option<JsonObject>,
) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(value)),
        id: None,
        properties,
        foreign_members: None,
    }
}

/// Shallow-merges two property bags. Keys present in both take the value
/// from `over`.
pub fn merge_properties(
    base: Option<&JsonObject>,
    over: Option<&JsonObject>,
) -> Option<JsonObject> {
    let mut merged = base.cloned().unwrap_or_default();
    if let Some(over) = over {
        for (key, value) in over {
            merged.insert(key.clone(), value.clone());
        }
    }
    Some(merged)
}

/// An empty feature collection.
pub fn empty_collection() -> geojson::FeatureCollection {
    geojson::FeatureCollection {
        bbox: None,
        features: vec![],
        foreign_members: None,
    }
}

/// Wraps features into a collection.
pub fn collection(features: Vec<Feature>) -> geojson::FeatureCollection {
    geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
