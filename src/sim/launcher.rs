//! Cannon aim state
//!
//! The launcher only remembers the current aim. Every shot it fires gets its
//! own [`ShotTracker`] and the launcher is never mutated by firing.

use glam::DVec2;

use super::state::ShotId;
use super::tracker::ShotTracker;
use crate::consts::{DEFAULT_ANGLE_DEG, DEFAULT_SPEED};
use crate::polar_to_cartesian;

/// Snapshot of the launcher aim, handed to the view whenever it changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aim {
    /// Launch angle (radians, unbounded)
    pub angle: f64,
    /// Launch speed (m/s, may be zero or negative)
    pub speed: f64,
}

impl Aim {
    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }

    /// Tip of the aim arrow drawn from the origin
    pub fn arrow_tip(&self) -> DVec2 {
        polar_to_cartesian(self.speed, self.angle)
    }
}

/// The cannon: current launch angle and speed
#[derive(Debug, Clone)]
pub struct Launcher {
    aim: Aim,
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new(DEFAULT_ANGLE_DEG, DEFAULT_SPEED)
    }
}

impl Launcher {
    pub fn new(angle_deg: f64, speed: f64) -> Self {
        Self {
            aim: Aim {
                angle: angle_deg.to_radians(),
                speed,
            },
        }
    }

    #[inline]
    pub fn aim(&self) -> Aim {
        self.aim
    }

    /// Change the angle by `delta_deg` degrees (no clamping)
    pub fn adjust_angle(&mut self, delta_deg: f64) -> Aim {
        self.aim.angle += delta_deg.to_radians();
        self.aim
    }

    /// Change the speed by `delta` m/s (no clamping)
    pub fn adjust_speed(&mut self, delta: f64) -> Aim {
        self.aim.speed += delta;
        self.aim
    }

    /// Fire a new shot from ground level with the current aim
    pub fn fire(&self, id: ShotId) -> ShotTracker {
        ShotTracker::new(id, self.aim.angle_degrees(), self.aim.speed, 0.0)
    }
}
