//! Difference command - subtract one layer's first feature from another's.

use std::path::PathBuf;

use geolayer::layer::LayerId;

use super::common;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the difference command.
pub struct DifferenceArgs {
    pub inputs: Vec<PathBuf>,
    pub base: String,
    pub subtract: String,
    pub name: String,
    pub output: PathBuf,
}

/// Run the difference command.
pub fn run(args: DifferenceArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("difference");

    let mut session = common::load_session(&args.inputs)?;
    let result = session.difference(
        &LayerId::new(args.base.as_str()),
        &LayerId::new(args.subtract.as_str()),
        &args.name,
    );

    match result {
        Some(layer) => {
            println!("Subtracted '{}' from '{}'", args.subtract, args.base);
            common::write_layer(&layer, &args.output)
        }
        None => {
            println!("No output: difference did not apply or left nothing of the base");
            Ok(())
        }
    }
}
