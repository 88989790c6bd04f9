//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use geolayer::ops::OpError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// No input file produced a usable layer
    NoLayers,
    /// A geometry operation failed
    Operation(OpError),
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Operation(OpError::InvalidSelection) => {
                eprintln!();
                eprintln!("Layer ids are the file names of the inputs, for example:");
                eprintln!("  geolayer buffer parks.geojson --layer parks.geojson --radius 250");
            }
            CliError::NoLayers => {
                eprintln!();
                eprintln!("Inputs must be GeoJSON FeatureCollection documents.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::NoLayers => write!(f, "No input file produced a usable layer"),
            CliError::Operation(e) => write!(f, "Operation failed: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Operation(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<OpError> for CliError {
    fn from(e: OpError) -> Self {
        CliError::Operation(e)
    }
}
