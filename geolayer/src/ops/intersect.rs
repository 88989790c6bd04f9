//! Feature intersection operation.

use geo::{BooleanOps, Geometry, Intersects};
use tracing::debug;

use super::{output_name, OpError, INTERSECT_COLOR};
use crate::geometry::{
    as_polygonal, collection, feature_geometry, feature_with_properties, merge_properties,
    polygonal_value,
};
use crate::id::IdGenerator;
use crate::layer::{Layer, LayerId};
use crate::store::Snapshot;

/// Intersects every feature of one layer with every feature of another.
///
/// All feature pairs are considered, a cheap topology predicate weeding
/// out the ones that do not touch before the exact boolean kernel runs.
/// Only polygonal pairs can produce output; a line crossing a polygon
/// passes the predicate but contributes no area and is dropped.
///
/// Each non-empty intersection becomes one output feature whose
/// properties are the shallow merge of the pair's bags, with the second
/// layer's keys winning on clashes.
///
/// Unlike union and difference, failure is explicit here:
///
/// # Errors
///
/// - [`OpError::InvalidSelection`] if either id does not resolve
/// - [`OpError::NoIntersections`] if no pair produced an output feature
pub fn intersect(
    snapshot: &Snapshot,
    first_id: &LayerId,
    second_id: &LayerId,
    name: &str,
    ids: &dyn IdGenerator,
) -> Result<Layer, OpError> {
    let first = snapshot.find(first_id).ok_or(OpError::InvalidSelection)?;
    let second = snapshot.find(second_id).ok_or(OpError::InvalidSelection)?;

    // Convert the second operand once; the pair loop below revisits it
    // for every feature of the first.
    let second_geometries: Vec<Option<Geometry<f64>>> = second
        .geometry()
        .features
        .iter()
        .map(feature_geometry)
        .collect();

    let mut features = Vec::new();

    for feature_a in &first.geometry().features {
        let Some(geometry_a) = feature_geometry(feature_a) else {
            continue;
        };

        for (feature_b, geometry_b) in second.geometry().features.iter().zip(&second_geometries) {
            let Some(geometry_b) = geometry_b else {
                continue;
            };
            if !geometry_a.intersects(geometry_b) {
                continue;
            }

            let (Some(a), Some(b)) = (as_polygonal(&geometry_a), as_polygonal(geometry_b)) else {
                continue;
            };
            let piece = a.intersection(&b);
            if piece.0.is_empty() {
                continue;
            }

            features.push(feature_with_properties(
                polygonal_value(&piece),
                merge_properties(feature_a.properties.as_ref(), feature_b.properties.as_ref()),
            ));
        }
    }

    if features.is_empty() {
        debug!(first = %first_id, second = %second_id, "Intersect found nothing");
        return Err(OpError::NoIntersections);
    }

    let name = output_name(name, || {
        format!("Intersect {} & {}", first.name(), second.name())
    });

    debug!(
        first = %first_id,
        second = %second_id,
        features = features.len(),
        output = %name,
        "Intersect produced a layer"
    );

    Ok(Layer::new(
        ids.next_id(),
        name,
        collection(features),
        INTERSECT_COLOR,
    ))
}
