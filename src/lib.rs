//! Cannon Sim - interactive cannonball trajectory animation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projectile physics, launcher aim, shot lifecycle)
//! - `view`: Canvas abstraction, retained scene and presenter for the field
//! - `app`: Frame driver tying input, simulation and presentation together
//! - `settings`: JSON-backed runtime settings

pub mod app;
pub mod settings;
pub mod sim;
pub mod view;

pub use app::{App, AppStatus};
pub use settings::{Settings, SettingsError};

use glam::DVec2;

/// Simulation and field constants
pub mod consts {
    /// Gravitational deceleration (m/s²)
    pub const GRAVITY: f64 = 9.8;
    /// Fixed simulation timestep (120 Hz for smooth animation)
    pub const SIM_DT: f64 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Horizontal extent of the visible field (m)
    pub const FIELD_MAX_X: f64 = 420.0;

    /// Logical coordinate window: lower-left and upper-right corners (m)
    pub const VIEW_MIN: (f64, f64) = (-20.0, -20.0);
    pub const VIEW_MAX: (f64, f64) = (420.0, 310.0);

    /// Launcher defaults
    pub const DEFAULT_ANGLE_DEG: f64 = 45.0;
    pub const DEFAULT_SPEED: f64 = 40.0;
    /// Aim change per key press
    pub const ANGLE_STEP_DEG: f64 = 2.5;
    pub const SPEED_STEP: f64 = 1.0;

    /// Radius of the launcher base and shot markers (m)
    pub const MARKER_RADIUS: f64 = 3.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Round to one decimal place (display precision)
#[inline]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
