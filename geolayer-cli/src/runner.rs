//! CLI runner for common setup.
//!
//! Encapsulates config loading and logging initialization to reduce
//! duplication across command handlers.

use tracing::info;

use geolayer::config::ConfigFile;
use geolayer::logging::{default_log_dir, default_log_file, init_logging, LoggingGuard};

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    pub fn new() -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load().map_err(|e| CliError::Config(e.to_string()))?;

        // Use the log path from config when one is set
        let (log_dir, log_file) = match &config.logging.file {
            Some(path) => {
                let dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| ".".into());
                let file = path
                    .file_name()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| default_log_file().to_string());
                (dir, file)
            }
            None => (default_log_dir(), default_log_file().to_string()),
        };

        let logging_guard = init_logging(&log_dir, &log_file)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("GeoLayer v{}", geolayer::VERSION);
        info!("GeoLayer CLI: {} command", command);
    }
}
