//! Polygon union operation.

use geo::BooleanOps;
use geojson::JsonObject;
use tracing::debug;

use super::{output_name, UNION_COLOR};
use crate::geometry::{collection, feature_with_properties, polygonal, polygonal_value};
use crate::id::IdGenerator;
use crate::layer::{Layer, LayerId};
use crate::store::Snapshot;

/// Merges the first features of two polygonal layers into one shape.
///
/// Only the FIRST feature of each operand participates; the rest of both
/// layers is ignored. This is a deliberate simplification shared with
/// [`difference`](super::difference).
///
/// Returns `None`, changing nothing, when the operation does not apply:
/// an operand id that does not resolve, an empty operand layer, or a
/// first feature that is not polygonal. There is no error path.
///
/// The merged feature carries an empty property bag. A union of two
/// differently attributed shapes has no meaningful attribute set, so none
/// is invented.
pub fn union(
    snapshot: &Snapshot,
    first_id: &LayerId,
    second_id: &LayerId,
    name: &str,
    ids: &dyn IdGenerator,
) -> Option<Layer> {
    let (first, second) = match (snapshot.find(first_id), snapshot.find(second_id)) {
        (Some(first), Some(second)) => (first, second),
        _ => {
            debug!(first = %first_id, second = %second_id, "Union skipped: unresolved selection");
            return None;
        }
    };

    let a = first.first_feature().and_then(polygonal);
    let b = second.first_feature().and_then(polygonal);
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            debug!(
                first = %first_id,
                second = %second_id,
                "Union skipped: first features are not polygonal"
            );
            return None;
        }
    };

    let merged = a.union(&b);
    let feature = feature_with_properties(polygonal_value(&merged), Some(JsonObject::new()));
    let name = output_name(name, || {
        format!("Union {} & {}", first.name(), second.name())
    });

    debug!(first = %first_id, second = %second_id, output = %name, "Union produced a layer");

    Some(Layer::new(
        ids.next_id(),
        name,
        collection(vec![feature]),
        UNION_COLOR,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;

    use crate::color::Color;
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

    fn point_layer(id: &str) -> Layer {
        let feature = feature_with_properties(geojson::Value::Point(vec![0.0, 0.0]), None);
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
    fn test_union_of_disjoint_squares_keeps_both_areas() {
        let snapshot = snapshot_of(vec![
            square_layer("a", 0.0, 0.0, 1.0),
            square_layer("b", 5.0, 5.0, 1.0),
        ]);
        let ids = SequentialIdGenerator::new();

        let out = union(&snapshot, &LayerId::new("a"), &LayerId::new("b"), "U", &ids).unwrap();
        assert_eq!(out.feature_count(), 1);
        assert!((layer_area(&out) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_union_of_overlapping_squares_merges_area() {
        // Unit squares overlapping in a 0.5 x 1.0 strip: union area 1.5.
        let snapshot = snapshot_of(vec![
            square_layer("a", 0.0, 0.0, 1.0),
            square_layer("b", 0.5, 0.0, 1.0),
        ]);
        let ids = SequentialIdGenerator::new();

        let out = union(&snapshot, &LayerId::new("a"), &LayerId::new("b"), "U", &ids).unwrap();
        assert!((layer_area(&out) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_union_with_point_layer_is_silent_noop() {
        let snapshot = snapshot_of(vec![square_layer("a", 0.0, 0.0, 1.0), point_layer("p")]);
        let ids = SequentialIdGenerator::new();

        let out = union(&snapshot, &LayerId::new("a"), &LayerId::new("p"), "U", &ids);
        assert!(out.is_none());
    }

    #[test]
    fn test_union_with_unresolved_id_is_silent_noop() {
        let snapshot = snapshot_of(vec![square_layer("a", 0.0, 0.0, 1.0)]);
        let ids = SequentialIdGenerator::new();

        let out = union(&snapshot, &LayerId::new("a"), &LayerId::new("gone"), "U", &ids);
        assert!(out.is_none());
    }

    #[test]
    fn test_union_with_empty_layer_is_silent_noop() {
        let empty = Layer::new(
            LayerId::new("e"),
            "E",
            crate::geometry::empty_collection(),
            Color::rgb(0x32, 0xCD, 0x32),
        );
        let snapshot = snapshot_of(vec![square_layer("a", 0.0, 0.0, 1.0), empty]);
        let ids = SequentialIdGenerator::new();

        let out = union(&snapshot, &LayerId::new("a"), &LayerId::new("e"), "U", &ids);
        assert!(out.is_none());
    }

    #[test]
    fn test_union_ignores_features_beyond_the_first() {
        let ring1 = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0, 0.0],
        ];
        let ring2 = vec![
            vec![10.0, 10.0],
            vec![12.0, 10.0],
            vec![12.0, 12.0],
            vec![10.0, 12.0],
            vec![10.0, 10.0],
        ];
        let two_features = Layer::new(
            LayerId::new("a"),
            "A",
            collection(vec![
                feature_with_properties(geojson::Value::Polygon(vec![ring1]), None),
                feature_with_properties(geojson::Value::Polygon(vec![ring2]), None),
            ]),
            Color::rgb(0xFF, 0x63, 0x47),
        );
        let snapshot = snapshot_of(vec![two_features, square_layer("b", 0.5, 0.0, 1.0)]);
        let ids = SequentialIdGenerator::new();

        let out = union(&snapshot, &LayerId::new("a"), &LayerId::new("b"), "U", &ids).unwrap();
        // Only the first square of "a" participates: 1.5, not 5.5.
        assert!((layer_area(&out) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_union_output_has_empty_properties() {
        let snapshot = snapshot_of(vec![
            square_layer("a", 0.0, 0.0, 1.0),
            square_layer("b", 0.5, 0.0, 1.0),
        ]);
        let ids = SequentialIdGenerator::new();

        let out = union(&snapshot, &LayerId::new("a"), &LayerId::new("b"), "U", &ids).unwrap();
        let bag = out.geometry().features[0].properties.as_ref().unwrap();
        assert!(bag.is_empty());
    }

    #[test]
    fn test_union_output_layer_defaults() {
        let snapshot = snapshot_of(vec![
            square_layer("a", 0.0, 0.0, 1.0),
            square_layer("b", 0.5, 0.0, 1.0),
        ]);
        let ids = SequentialIdGenerator::new();

        let out = union(&snapshot, &LayerId::new("a"), &LayerId::new("b"), "", &ids).unwrap();
        assert_eq!(out.name(), "Union A & B");
        assert!(out.visible());
        assert_eq!(out.color(), UNION_COLOR);
        assert_eq!(out.id(), &LayerId::new("layer-0"));
    }
}
