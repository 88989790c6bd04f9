//! Clip operation.

use geo::BooleanOps;
use geojson::JsonObject;
use tracing::debug;

use super::{output_name, CLIP_COLOR};
use crate::geometry::{collection, feature_with_properties, polygonal, polygonal_value};
use crate::id::IdGenerator;
use crate::layer::{Layer, LayerId};
use crate::store::Snapshot;

/// Clips target layers against the first feature of a clip layer.
///
/// Every feature of every target is intersected with the clip layer's
/// FIRST feature. Each surviving piece becomes its own layer, named
/// `"<name> (<target name>)"` so outputs stay traceable to the layer they
/// were cut from; a target with three surviving features yields three
/// layers. Clipped features carry no properties.
///
/// The whole operation is silent: unresolved ids, non-polygonal features
/// on either side, and features that miss the clip shape are skipped
/// without a message. An empty result vector means nothing survived.
pub fn clip(
    snapshot: &Snapshot,
    target_ids: &[LayerId],
    clip_id: &LayerId,
    name: &str,
    ids: &dyn IdGenerator,
) -> Vec<Layer> {
    let Some(clip_layer) = snapshot.find(clip_id) else {
        debug!(clip = %clip_id, "Clip skipped: unresolved clip layer");
        return Vec::new();
    };
    let Some(clip_shape) = clip_layer.first_feature().and_then(polygonal) else {
        debug!(clip = %clip_id, "Clip skipped: clip layer's first feature is not polygonal");
        return Vec::new();
    };

    let base_name = output_name(name, || format!("Clip {}", clip_layer.name()));
    let mut outputs = Vec::new();

    for target_id in target_ids {
        let Some(target) = snapshot.find(target_id) else {
            debug!(target = %target_id, "Clip target skipped: unresolved layer");
            continue;
        };

        for feature in &target.geometry().features {
            let Some(shape) = polygonal(feature) else {
                continue;
            };
            let piece = shape.intersection(&clip_shape);
            if piece.0.is_empty() {
                continue;
            }

            let clipped =
                feature_with_properties(polygonal_value(&piece), Some(JsonObject::new()));
            outputs.push(Layer::new(
                ids.next_id(),
                format!("{} ({})", base_name, target.name()),
                collection(vec![clipped]),
                CLIP_COLOR,
            ));
        }
    }

    debug!(
        clip = %clip_id,
        targets = target_ids.len(),
        outputs = outputs.len(),
        "Clip finished"
    );

    outputs
}
