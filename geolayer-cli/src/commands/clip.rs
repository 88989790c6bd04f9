//! Clip command - clip target layers against a clip layer.

use std::path::PathBuf;

use geolayer::layer::LayerId;

use super::common;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the clip command.
pub struct ClipArgs {
    pub inputs: Vec<PathBuf>,
    pub targets: Vec<String>,
    pub clip: String,
    pub name: String,
    pub output_dir: PathBuf,
}

/// Run the clip command.
pub fn run(args: ClipArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("clip");

    let mut session = common::load_session(&args.inputs)?;
    let target_ids: Vec<LayerId> = args
        .targets
        .iter()
        .map(|id| LayerId::new(id.as_str()))
        .collect();

    let produced = session.clip(&target_ids, &LayerId::new(args.clip.as_str()), &args.name);

    // Clip is fully silent: targets that do not intersect simply yield
    // nothing, and an empty result is not an error.
    if produced.is_empty() {
        println!("No layers produced: nothing intersected the clip shape");
        return Ok(());
    }

    std::fs::create_dir_all(&args.output_dir).map_err(|e| CliError::FileWrite {
        path: args.output_dir.display().to_string(),
        error: e,
    })?;

    println!("Produced {} layer(s):", produced.len());
    for layer in &produced {
        let path = args.output_dir.join(format!("{}.geojson", layer.id()));
        println!("  {} -> {}", layer.name(), path.display());
        common::write_layer(layer, &path)?;
    }
    Ok(())
}
