//! Polygon difference operation.

use geo::BooleanOps;
use geojson::JsonObject;
use tracing::debug;

use super::{output_name, DIFFERENCE_COLOR};
use crate::geometry::{collection, feature_with_properties, polygonal, polygonal_value};
use crate::id::IdGenerator;
use crate::layer::{Layer, LayerId};
use crate::store::Snapshot;

/// Subtracts the second layer's first feature from the first layer's.
///
/// Operand order matters: the output is `base` minus `subtract`. Like
/// [`union`](super::union), only the FIRST feature of each layer
/// participates, and the same silent no-op policy applies: unresolved ids,
/// empty layers, and non-polygonal first features all return `None`
/// without a message.
///
/// Subtracting a shape that fully covers the base leaves nothing; that is
/// a no-op too, not an empty layer. A difference either produces a layer
/// with one remainder feature or produces nothing.
pub fn difference(
    snapshot: &Snapshot,
    base_id: &LayerId,
    subtract_id: &LayerId,
    name: &str,
    ids: &dyn IdGenerator,
) -> Option<Layer> {
    let (base, subtract) = match (snapshot.find(base_id), snapshot.find(subtract_id)) {
        (Some(base), Some(subtract)) => (base, subtract),
        _ => {
            debug!(
                base = %base_id,
                subtract = %subtract_id,
                "Difference skipped: unresolved selection"
            );
            return None;
        }
    };

    let a = base.first_feature().and_then(polygonal);
    let b = subtract.first_feature().and_then(polygonal);
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            debug!(
                base = %base_id,
                subtract = %subtract_id,
                "Difference skipped: first features are not polygonal"
            );
            return None;
        }
    };

    let remainder = a.difference(&b);
    if remainder.0.is_empty() {
        debug!(
            base = %base_id,
            subtract = %subtract_id,
            "Difference skipped: nothing remains of the base"
        );
        return None;
    }

    let feature = feature_with_properties(polygonal_value(&remainder), Some(JsonObject::new()));

    let name = output_name(name, || {
        format!("Difference {} & {}", base.name(), subtract.name())
    });

    debug!(base = %base_id, subtract = %subtract_id, output = %name, "Difference produced a layer");

    Some(Layer::new(
        ids.next_id(),
        name,
        collection(vec![feature]),
        DIFFERENCE_COLOR,
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
    fn test_difference_removes_overlap() {
        // 10x10 base minus a 5x5 corner: 75 left.
        let snapshot = snapshot_of(vec![
            square_layer("base", 0.0, 0.0, 10.0),
            square_layer("hole", 0.0, 0.0, 5.0),
        ]);
        let ids = SequentialIdGenerator::new();

        let out = difference(
            &snapshot,
            &LayerId::new("base"),
            &LayerId::new("hole"),
            "D",
            &ids,
        )
        .unwrap();
        assert!((layer_area(&out) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_difference_is_order_sensitive() {
        let snapshot = snapshot_of(vec![
            square_layer("big", 0.0, 0.0, 10.0),
            square_layer("small", 0.0, 0.0, 5.0),
        ]);
        let ids = SequentialIdGenerator::new();

        // big minus small leaves an L-shape; small minus big leaves
        // nothing, which produces no layer at all.
        let out = difference(
            &snapshot,
            &LayerId::new("big"),
            &LayerId::new("small"),
            "D",
            &ids,
        )
        .unwrap();
        assert!((layer_area(&out) - 75.0).abs() < 1e-9);

        let out = difference(
            &snapshot,
            &LayerId::new("small"),
            &LayerId::new("big"),
            "D",
            &ids,
        );
        assert!(out.is_none());
    }

    #[test]
    fn test_difference_fully_covered_base_is_silent_noop() {
        let snapshot = snapshot_of(vec![
            square_layer("base", 2.0, 2.0, 1.0),
            square_layer("cover", 0.0, 0.0, 10.0),
        ]);
        let ids = SequentialIdGenerator::new();

        let out = difference(
            &snapshot,
            &LayerId::new("base"),
            &LayerId::new("cover"),
            "D",
            &ids,
        );
        assert!(out.is_none());
    }

    #[test]
    fn test_difference_of_disjoint_squares_keeps_base() {
        let snapshot = snapshot_of(vec![
            square_layer("base", 0.0, 0.0, 2.0),
            square_layer("far", 50.0, 50.0, 2.0),
        ]);
        let ids = SequentialIdGenerator::new();

        let out = difference(
            &snapshot,
            &LayerId::new("base"),
            &LayerId::new("far"),
            "D",
            &ids,
        )
        .unwrap();
        assert!((layer_area(&out) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_difference_with_unresolved_id_is_silent_noop() {
        let snapshot = snapshot_of(vec![square_layer("base", 0.0, 0.0, 1.0)]);
        let ids = SequentialIdGenerator::new();

        let out = difference(
            &snapshot,
            &LayerId::new("gone"),
            &LayerId::new("base"),
            "D",
            &ids,
        );
        assert!(out.is_none());
    }

    #[test]
    fn test_difference_with_line_layer_is_silent_noop() {
        let line = Layer::new(
            LayerId::new("line"),
            "Line",
            collection(vec![feature_with_properties(
                geojson::Value::LineString(vec![vec![0.0, 0.0], vec![1.0, 1.0]]),
                None,
            )]),
            Color::rgb(0x46, 0x82, 0xB4),
        );
        let snapshot = snapshot_of(vec![square_layer("base", 0.0, 0.0, 1.0), line]);
        let ids = SequentialIdGenerator::new();

        let out = difference(
            &snapshot,
            &LayerId::new("base"),
            &LayerId::new("line"),
            "D",
            &ids,
        );
        assert!(out.is_none());
    }

    #[test]
    fn test_difference_output_layer_defaults() {
        let snapshot = snapshot_of(vec![
            square_layer("base", 0.0, 0.0, 10.0),
            square_layer("hole", 0.0, 0.0, 5.0),
        ]);
        let ids = SequentialIdGenerator::new();

        let out = difference(
            &snapshot,
            &LayerId::new("base"),
            &LayerId::new("hole"),
            "",
            &ids,
        )
        .unwrap();
        assert_eq!(out.name(), "Difference BASE & HOLE");
        assert!(out.visible());
        assert_eq!(out.color(), DIFFERENCE_COLOR);
    }
}
