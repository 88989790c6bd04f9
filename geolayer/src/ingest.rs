//! GeoJSON document ingestion
//!
//! Turns uploaded GeoJSON text into [`Layer`] values. Parsing one document
//! never touches any other; callers that load several files collect errors
//! per file and keep the successes.

use geojson::GeoJson;
use thiserror::Error;
use tracing::debug;

use crate::color::Color;
use crate::layer::{Layer, LayerId};

/// Errors from turning uploaded text into a layer.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The text is not valid GeoJSON.
    #[error("failed to parse '{source_name}': not valid GeoJSON")]
    Malformed {
        source_name: String,
        #[source]
        source: geojson::Error,
    },

    /// Valid GeoJSON, but not a FeatureCollection document.
    #[error("'{source_name}' is not a FeatureCollection document")]
    NotACollection { source_name: String },
}

/// Parses GeoJSON text into a layer.
///
/// The source name (typically a file name) becomes both the layer id and
/// its display name, which is how uploads are keyed. Only FeatureCollection
/// documents are accepted; a bare Feature or Geometry is not a layer. An
/// empty FeatureCollection is a valid, empty layer.
pub fn parse_layer(source_name: &str, text: &str, color: Color) -> Result<Layer, IngestError> {
    let document: GeoJson = text.parse().map_err(|source| IngestError::Malformed {
        source_name: source_name.to_string(),
        source,
    })?;

    let GeoJson::FeatureCollection(collection) = document else {
        return Err(IngestError::NotACollection {
            source_name: source_name.to_string(),
        });
    };

    debug!(
        source = source_name,
        features = collection.features.len(),
        "Parsed layer document"
    );

    Ok(Layer::new(
        LayerId::new(source_name),
        source_name,
        collection,
        color,
    ))
}
