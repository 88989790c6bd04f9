//! Configuration file handling for ~/.geolayer/config.ini
//!
//! Loads user configuration with sensible defaults. A missing file means
//! defaults; present keys overlay them. This is the single place where INI
//! key names are mapped to struct fields.

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::surface::VISIBLE_OPACITY;

/// Default viewport center latitude in degrees.
pub const DEFAULT_CENTER_LAT: f64 = 63.4305;
/// Default viewport center longitude in degrees.
pub const DEFAULT_CENTER_LON: f64 = 10.3951;
/// Default viewport zoom level.
pub const DEFAULT_ZOOM: f64 = 10.0;
/// Default surface style identifier.
pub const DEFAULT_STYLE: &str = "mapbox://styles/mapbox/streets-v11";

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// Rendering surface settings
    pub surface: SurfaceSettings,
    /// Display settings
    pub display: DisplaySettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Rendering surface viewport configuration.
#[derive(Debug, Clone)]
pub struct SurfaceSettings {
    /// Initial viewport center latitude in degrees.
    pub center_lat: f64,
    /// Initial viewport center longitude in degrees.
    pub center_lon: f64,
    /// Initial zoom level.
    pub zoom: f64,
    /// Style identifier handed verbatim to the concrete surface.
    pub style: String,
}

/// Display configuration.
#[derive(Debug, Clone)]
pub struct DisplaySettings {
    /// Paint opacity applied to visible layers.
    pub visible_opacity: f64,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Log file path. `None` uses the default under ~/.geolayer.
    pub file: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            surface: SurfaceSettings {
                center_lat: DEFAULT_CENTER_LAT,
                center_lon: DEFAULT_CENTER_LON,
                zoom: DEFAULT_ZOOM,
                style: DEFAULT_STYLE.to_string(),
            },
            display: DisplaySettings {
                visible_opacity: VISIBLE_OPACITY,
            },
            logging: LoggingSettings { file: None },
        }
    }
}

impl ConfigFile {
    /// Load configuration from the default path (~/.geolayer/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        parse_ini(&ini)
    }
}

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigError> {
    let mut config = ConfigFile::default();

    // [surface] section
    if let Some(section) = ini.section(Some("surface")) {
        if let Some(v) = section.get("center_lat") {
            let parsed: f64 = v.parse().map_err(|_| ConfigError::InvalidValue {
                section: "surface".to_string(),
                key: "center_lat".to_string(),
                value: v.to_string(),
                reason: "must be a number".to_string(),
            })?;
            if !(-90.0..=90.0).contains(&parsed) {
                return Err(ConfigError::InvalidValue {
                    section: "surface".to_string(),
                    key: "center_lat".to_string(),
                    value: v.to_string(),
                    reason: "must be between -90 and 90".to_string(),
                });
            }
            config.surface.center_lat = parsed;
        }
        if let Some(v) = section.get("center_lon") {
            let parsed: f64 = v.parse().map_err(|_| ConfigError::InvalidValue {
                section: "surface".to_string(),
                key: "center_lon".to_string(),
                value: v.to_string(),
                reason: "must be a number".to_string(),
            })?;
            if !(-180.0..=180.0).contains(&parsed) {
                return Err(ConfigError::InvalidValue {
                    section: "surface".to_string(),
                    key: "center_lon".to_string(),
                    value: v.to_string(),
                    reason: "must be between -180 and 180".to_string(),
                });
            }
            config.surface.center_lon = parsed;
        }
        if let Some(v) = section.get("zoom") {
            let parsed: f64 = v.parse().map_err(|_| ConfigError::InvalidValue {
                section: "surface".to_string(),
                key: "zoom".to_string(),
                value: v.to_string(),
                reason: "must be a number".to_string(),
            })?;
            if !(0.0..=24.0).contains(&parsed) {
                return Err(ConfigError::InvalidValue {
                    section: "surface".to_string(),
                    key: "zoom".to_string(),
                    value: v.to_string(),
                    reason: "must be between 0 and 24".to_string(),
                });
            }
            config.surface.zoom = parsed;
        }
        if let Some(v) = section.get("style") {
            let v = v.trim();
            if !v.is_empty() {
                config.surface.style = v.to_string();
            }
        }
    }

    // [display] section
    if let Some(section) = ini.section(Some("display")) {
        if let Some(v) = section.get("visible_opacity") {
            let parsed: f64 = v.parse().map_err(|_| ConfigError::InvalidValue {
                section: "display".to_string(),
                key: "visible_opacity".to_string(),
                value: v.to_string(),
                reason: "must be a number".to_string(),
            })?;
            if !(0.0..=1.0).contains(&parsed) {
                return Err(ConfigError::InvalidValue {
                    section: "display".to_string(),
                    key: "visible_opacity".to_string(),
                    value: v.to_string(),
                    reason: "must be between 0.0 and 1.0".to_string(),
                });
            }
            config.display.visible_opacity = parsed;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = Some(expand_tilde(v));
            }
        }
    }

    Ok(config)
}

/// Expand a leading `~/` to the user's home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Get the path to the config directory (~/.geolayer).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".geolayer")
}

/// Get the path to the config file (~/.geolayer/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
