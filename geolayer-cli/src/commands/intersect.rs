//! Intersect command - intersect two layers feature by feature.

use std::path::PathBuf;

use geolayer::layer::LayerId;

use super::common;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the intersect command.
pub struct IntersectArgs {
    pub inputs: Vec<PathBuf>,
    pub first: String,
    pub second: String,
    pub name: String,
    pub output: PathBuf,
}

/// Run the intersect command.
pub fn run(args: IntersectArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("intersect");

    let mut session = common::load_session(&args.inputs)?;
    let layer = session.intersect(
        &LayerId::new(args.first.as_str()),
        &LayerId::new(args.second.as_str()),
        &args.name,
    )?;

    println!(
        "Intersected '{}' with '{}': {} overlapping features",
        args.first,
        args.second,
        layer.feature_count()
    );
    common::write_layer(&layer, &args.output)
}
