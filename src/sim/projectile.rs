//! Point-mass ballistic flight under constant gravity
//!
//! Tracking is two dimensional: distance (x) and height (y), both in meters
//! with the origin at the launch point. No drag, so horizontal velocity never
//! changes after launch.

use glam::DVec2;

use crate::consts::GRAVITY;
use crate::polar_to_cartesian;

/// Kinematic state of one cannonball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pos: DVec2,
    vel: DVec2,
    /// Seconds since launch
    elapsed: f64,
}

impl Projectile {
    /// Launch from `(0, height)` at `angle_deg` above the horizontal with `speed` m/s
    pub fn new(angle_deg: f64, speed: f64, height: f64) -> Self {
        Self {
            pos: DVec2::new(0.0, height),
            vel: polar_to_cartesian(speed, angle_deg.to_radians()),
            elapsed: 0.0,
        }
    }

    /// Advance the flight by `dt` seconds.
    ///
    /// Height uses the average of the old and new vertical velocity, which is
    /// exact for constant acceleration.
    pub fn update(&mut self, dt: f64) {
        let vy1 = self.vel.y - GRAVITY * dt;
        self.pos.x += dt * self.vel.x;
        self.pos.y += dt * (self.vel.y + vy1) / 2.0;
        self.vel.y = vy1;
        self.elapsed += dt;
    }

    /// Distance from the launch point (m)
    #[inline]
    pub fn x(&self) -> f64 {
        self.pos.x
    }

    /// Height above the ground (m)
    #[inline]
    pub fn y(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.pos
    }

    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.vel
    }

    /// Current speed (m/s), recomputed from the velocity components
    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Time in flight (s)
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
