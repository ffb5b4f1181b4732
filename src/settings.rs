//! Runtime settings
//!
//! Optional JSON file; any field left out falls back to its default.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{ANGLE_STEP_DEG, DEFAULT_ANGLE_DEG, DEFAULT_SPEED, MAX_SUBSTEPS, SPEED_STEP};

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "CANNON_SIM_SETTINGS";

/// Errors loading settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Parsed but out of range
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {e}"),
            SettingsError::Json(e) => write!(f, "JSON error: {e}"),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Json(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

/// Simulation and window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    /// Physics steps per second
    pub tick_rate_hz: f64,
    /// Cap on physics steps run in one rendered frame
    pub max_substeps: u32,

    // === Window ===
    pub window_width: u32,
    pub window_height: u32,

    // === Launcher ===
    pub initial_angle_deg: f64,
    pub initial_speed: f64,
    /// Angle change per key press (degrees)
    pub angle_step_deg: f64,
    /// Speed change per key press (m/s)
    pub speed_step: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_hz: 120.0,
            max_substeps: MAX_SUBSTEPS,

            window_width: 1280,
            window_height: 960,

            initial_angle_deg: DEFAULT_ANGLE_DEG,
            initial_speed: DEFAULT_SPEED,
            angle_step_deg: ANGLE_STEP_DEG,
            speed_step: SPEED_STEP,
        }
    }
}

impl Settings {
    /// Simulation timestep (s)
    pub fn sim_dt(&self) -> f64 {
        1.0 / self.tick_rate_hz
    }

    /// Reject values the frame loop cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "tick_rate_hz must be positive, got {}",
                self.tick_rate_hz
            )));
        }
        if self.max_substeps == 0 {
            return Err(SettingsError::Invalid("max_substeps must be at least 1".into()));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(SettingsError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        Ok(())
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Settings file named on the command line or in the environment
    pub fn path_from_env() -> Option<PathBuf> {
        std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os(SETTINGS_ENV))
            .map(PathBuf::from)
    }
}
