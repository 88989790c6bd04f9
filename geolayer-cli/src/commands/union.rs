//! Union command - merge the first features of two layers.

use std::path::PathBuf;

use geolayer::layer::LayerId;

use super::common;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the union command.
pub struct UnionArgs {
    pub inputs: Vec<PathBuf>,
    pub first: String,
    pub second: String,
    pub name: String,
    pub output: PathBuf,
}

/// Run the union command.
pub fn run(args: UnionArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("union");

    let mut session = common::load_session(&args.inputs)?;
    let result = session.union(
        &LayerId::new(args.first.as_str()),
        &LayerId::new(args.second.as_str()),
        &args.name,
    );

    // The operation is a silent no-op when it does not apply, so an
    // absent result is reported but is not an error.
    match result {
        Some(layer) => {
            println!("Unioned '{}' and '{}'", args.first, args.second);
            common::write_layer(&layer, &args.output)
        }
        None => {
            println!("No output: union did not apply to the selected layers");
            Ok(())
        }
    }
}
