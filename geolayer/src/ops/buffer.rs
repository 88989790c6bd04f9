//! Distance buffer operation.

use geo::{BooleanOps, Buffer, Geometry, MultiPolygon};
use tracing::debug;

use super::{output_name, OpError, BUFFER_COLOR};
use crate::geometry::{collection, feature_geometry, feature_with_properties, polygonal_value};
use crate::id::IdGenerator;
use crate::layer::{Layer, LayerId};
use crate::store::Snapshot;

/// Meters per degree of arc, used to convert radii in meters to the
/// degree units the stored coordinates use. Planar approximation; buffers
/// are display aids, not survey output.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Buffers every feature of a layer by a radius in meters.
///
/// Features are buffered independently and keep their property bags.
/// The radius sign selects the behavior:
///
/// - positive radii grow any geometry into polygonal output
/// - zero keeps polygonal features at their exact area and drops point
///   and line features, which have no area to keep
/// - negative radii erode polygonal features and drop the rest
///
/// A feature whose buffered geometry comes back empty (for instance a
/// square fully consumed by erosion) is dropped. The output layer may
/// therefore have fewer features than the input, or none at all; an empty
/// layer is still a valid result, not an error.
///
/// # Errors
///
/// Returns [`OpError::InvalidSelection`] if `layer_id` does not resolve.
pub fn buffer(
    snapshot: &Snapshot,
    layer_id: &LayerId,
    radius_meters: f64,
    name: &str,
    ids: &dyn IdGenerator,
) -> Result<Layer, OpError> {
    let source = snapshot.find(layer_id).ok_or(OpError::InvalidSelection)?;

    let radius_degrees = radius_meters / METERS_PER_DEGREE;
    let mut features = Vec::with_capacity(source.feature_count());

    for feature in &source.geometry().features {
        let Some(geometry) = feature_geometry(feature) else {
            continue;
        };
        let Some(buffered) = buffer_geometry(&geometry, radius_degrees) else {
            continue;
        };
        if buffered.0.is_empty() {
            continue;
        }
        features.push(feature_with_properties(
            polygonal_value(&buffered),
            feature.properties.clone(),
        ));
    }

    debug!(
        layer = %layer_id,
        radius_meters,
        input_features = source.feature_count(),
        output_features = features.len(),
        "Buffered layer"
    );

    let name = output_name(name, || format!("Buffer {}", source.name()));
    Ok(Layer::new(
        ids.next_id(),
        name,
        collection(features),
        BUFFER_COLOR,
    ))
}

/// Buffers one geometry. `None` means the feature contributes no output.
fn buffer_geometry(geometry: &Geometry<f64>, radius_degrees: f64) -> Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(polygon) => {
            let multi = MultiPolygon(vec![polygon.clone()]);
            Some(buffer_polygonal(&multi, radius_degrees))
        }
        Geometry::MultiPolygon(multi) => Some(buffer_polygonal(multi, radius_degrees)),
        Geometry::GeometryCollection(parts) => {
            let mut merged: Option<MultiPolygon<f64>> = None;
            for part in parts {
                if let Some(buffered) = buffer_geometry(part, radius_degrees) {
                    merged = Some(match merged {
                        Some(acc) => acc.union(&buffered),
                        None => buffered,
                    });
                }
            }
            merged
        }
        other => {
            // Points and lines enclose no area, so only a positive radius
            // produces anything.
            if radius_degrees > 0.0 {
                Some(other.buffer(radius_degrees))
            } else {
                None
            }
        }
    }
}

fn buffer_polygonal(multi: &MultiPolygon<f64>, radius_degrees: f64) -> MultiPolygon<f64> {
    if radius_degrees == 0.0 {
        // Zero-radius closure: re-node through the boolean kernel so the
        // output is a fresh, cleaned geometry with identical area.
        multi.union(multi)
    } else {
        multi.buffer(radius_degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;

    use crate::color::Color;
    use crate::geometry::polygonal;
    use crate::id::SequentialIdGenerator;
    use crate::store::LayerStore;

    fn square_layer(id: &str, x: f64, y: f64, size: f64) -> Layer {
        let ring = vec![
            vec![x, y],
            vec![x + size, y],
            vec![x + size, y + size],
            vec![x, y + size],
            vec![x, y],
        ];
        let feature = feature_with_properties(geojson::Value::Polygon(vec![ring]), None);
        Layer::new(
            LayerId::new(id),
            id.to_uppercase(),
            collection(vec![feature]),
            Color::rgb(0xFF, 0x63, 0x47),
        )
    }

    fn point_layer(id: &str, x: f64, y: f64) -> Layer {
        let feature = feature_with_properties(geojson::Value::Point(vec![x, y]), None);
        Layer::new(
            LayerId::new(id),
            id.to_uppercase(),
            collection(vec![feature]),
            Color::rgb(0x46, 0x82, 0xB4),
        )
    }

    fn snapshot_of(layers: Vec<Layer>) -> Snapshot {
        let mut store = LayerStore::new();
        for layer in layers {
            store.append(layer).unwrap();
        }
        store.snapshot()
    }

    fn layer_area(layer: &Layer) -> f64 {
        layer
            .geometry()
            .features
            .iter()
            .filter_map(polygonal)
            .map(|multi| multi.unsigned_area())
            .sum()
    }

    #[test]
    fn test_buffer_unknown_layer_fails() {
        let snapshot = snapshot_of(vec![]);
        let ids = SequentialIdGenerator::new();

        let result = buffer(&snapshot, &LayerId::new("missing"), 100.0, "Out", &ids);
        assert_eq!(result.unwrap_err(), OpError::InvalidSelection);
    }

    #[test]
    fn test_buffer_positive_radius_grows_polygon() {
        let snapshot = snapshot_of(vec![square_layer("a", 0.0, 0.0, 1.0)]);
        let ids = SequentialIdGenerator::new();

        let out = buffer(&snapshot, &LayerId::new("a"), 11_132.0, "Out", &ids).unwrap();
        assert!(layer_area(&out) > 1.0);
    }

    #[test]
    fn test_buffer_zero_radius_preserves_polygon_area() {
        let snapshot = snapshot_of(vec![square_layer("a", 0.0, 0.0, 1.0)]);
        let ids = SequentialIdGenerator::new();

        let out = buffer(&snapshot, &LayerId::new("a"), 0.0, "Out", &ids).unwrap();
        assert_eq!(out.feature_count(), 1);
        assert!((layer_area(&out) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_buffer_zero_radius_drops_point_features() {
        let snapshot = snapshot_of(vec![point_layer("p", 3.0, 3.0)]);
        let ids = SequentialIdGenerator::new();

        let out = buffer(&snapshot, &LayerId::new("p"), 0.0, "Out", &ids).unwrap();
        assert_eq!(out.feature_count(), 0);
    }

    #[test]
    fn test_buffer_negative_radius_erodes_polygon() {
        // Eroding a convex polygon insets each edge by the radius, so a
        // 1° square shrunk by 10 km keeps a (1 - 2r)° square exactly.
        let snapshot = snapshot_of(vec![square_layer("a", 0.0, 0.0, 1.0)]);
        let ids = SequentialIdGenerator::new();

        let out = buffer(&snapshot, &LayerId::new("a"), -10_000.0, "Out", &ids).unwrap();
        let inset: f64 = 10_000.0 / 111_320.0;
        let expected = (1.0 - 2.0 * inset).powi(2);
        assert!((layer_area(&out) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_buffer_point_positive_radius_produces_area() {
        let snapshot = snapshot_of(vec![point_layer("p", 3.0, 3.0)]);
        let ids = SequentialIdGenerator::new();

        let out = buffer(&snapshot, &LayerId::new("p"), 11_132.0, "Out", &ids).unwrap();
        assert_eq!(out.feature_count(), 1);
        assert!(layer_area(&out) > 0.0);
    }

    #[test]
    fn test_buffer_preserves_feature_properties() {
        let mut properties = geojson::JsonObject::new();
        properties.insert("zone".into(), serde_json::json!("park"));
        let ring = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0, 0.0],
        ];
        let feature =
            feature_with_properties(geojson::Value::Polygon(vec![ring]), Some(properties));
        let layer = Layer::new(
            LayerId::new("a"),
            "A",
            collection(vec![feature]),
            Color::rgb(0xFF, 0x63, 0x47),
        );
        let snapshot = snapshot_of(vec![layer]);
        let ids = SequentialIdGenerator::new();

        let out = buffer(&snapshot, &LayerId::new("a"), 1000.0, "Out", &ids).unwrap();
        let bag = out.geometry().features[0].properties.as_ref().unwrap();
        assert_eq!(bag.get("zone"), Some(&serde_json::json!("park")));
    }

    #[test]
    fn test_buffer_output_layer_defaults() {
        let snapshot = snapshot_of(vec![square_layer("a", 0.0, 0.0, 1.0)]);
        let ids = SequentialIdGenerator::new();

        let out = buffer(&snapshot, &LayerId::new("a"), 500.0, "Halo", &ids).unwrap();
        assert_eq!(out.id(), &LayerId::new("layer-0"));
        assert_eq!(out.name(), "Halo");
        assert!(out.visible());
        assert_eq!(out.color(), BUFFER_COLOR);
    }

    #[test]
    fn test_buffer_blank_name_falls_back() {
        let snapshot = snapshot_of(vec![square_layer("a", 0.0, 0.0, 1.0)]);
        let ids = SequentialIdGenerator::new();

        let out = buffer(&snapshot, &LayerId::new("a"), 500.0, "  ", &ids).unwrap();
        assert_eq!(out.name(), "Buffer A");
    }
}
