//! Deterministic simulation module
//!
//! All physics and shot bookkeeping lives here. This module must stay pure:
//! - Fixed timestep only
//! - Stable iteration order (firing order)
//! - No rendering or platform dependencies; changes leave as [`SimEvent`]s

pub mod launcher;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod tracker;

pub use launcher::{Aim, Launcher};
pub use projectile::Projectile;
pub use state::{LastShot, ShotId, SimEvent, SimState};
pub use tick::{Command, TickInput, tick};
pub use tracker::{OverlayValues, ShotPhase, ShotStep, ShotTracker, classify};
