//! Common utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use geolayer::layer::Layer;
use geolayer::session::Session;

use crate::error::CliError;

/// Builds a session from input files.
///
/// Each file is ingested independently; failures are printed as warnings
/// and the rest land. Fails only when nothing usable was loaded.
pub fn load_session(inputs: &[PathBuf]) -> Result<Session, CliError> {
    let mut session = Session::new();

    for path in inputs {
        session.ingest_file(path);
    }
    for notice in session.notices() {
        eprintln!("Warning: {}", notice);
    }
    session.dismiss_notices();

    if session.layer_count() == 0 {
        return Err(CliError::NoLayers);
    }
    Ok(session)
}

/// Writes a layer's feature collection as a pretty-printed GeoJSON file.
pub fn write_layer(layer: &Layer, path: &Path) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(layer.geometry()).map_err(|e| CliError::FileWrite {
        path: path.display().to_string(),
        error: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })?;

    std::fs::write(path, json).map_err(|e| CliError::FileWrite {
        path: path.display().to_string(),
        error: e,
    })?;

    println!(
        "✓ Saved successfully: {} ({} features)",
        path.display(),
        layer.feature_count()
    );
    Ok(())
}
