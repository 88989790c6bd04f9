//! Buffer command - grow or erode a layer by a radius in meters.

use std::path::PathBuf;

use geolayer::layer::LayerId;

use super::common;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the buffer command.
pub struct BufferArgs {
    pub inputs: Vec<PathBuf>,
    pub layer: String,
    pub radius: f64,
    pub name: String,
    pub output: PathBuf,
}

/// Run the buffer command.
pub fn run(args: BufferArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("buffer");

    let mut session = common::load_session(&args.inputs)?;
    let layer = session.buffer(&LayerId::new(args.layer.as_str()), args.radius, &args.name)?;

    println!(
        "Buffered '{}' by {} m into '{}'",
        args.layer,
        args.radius,
        layer.name()
    );
    common::write_layer(&layer, &args.output)
}
