//! Shot lifecycle: one projectile plus its display state
//!
//! A tracker starts `Active` with its overlay visible. Leaving the field
//! (past [`FIELD_MAX_X`] or below ground) hides the overlay for good. The
//! driver retires a shot once it has landed.

use glam::DVec2;

use super::projectile::Projectile;
use super::state::ShotId;
use crate::consts::FIELD_MAX_X;
use crate::round1;

/// Display state of a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotPhase {
    /// In flight inside the field, overlay visible
    Active,
    /// Landed or beyond the field edge, overlay hidden
    ActiveNoOverlay,
    /// Removed from the active set, all visuals gone. Set only on the
    /// tracker being dropped by the driver, so it is never seen in play
    Retired,
}

/// Phase a shot at `(x, y)` belongs in
#[inline]
pub fn classify(x: f64, y: f64) -> ShotPhase {
    if y >= 0.0 && x <= FIELD_MAX_X {
        ShotPhase::Active
    } else {
        ShotPhase::ActiveNoOverlay
    }
}

/// Rounded values shown next to an in-field shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayValues {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
}

/// Result of advancing a tracker by one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotStep {
    /// Marker displacement since the previous step
    pub delta: DVec2,
    /// Fresh overlay values while the overlay is visible
    pub overlay: Option<OverlayValues>,
    /// Set on the step the overlay goes away
    pub overlay_hidden: bool,
}

#[derive(Debug, Clone)]
pub struct ShotTracker {
    id: ShotId,
    projectile: Projectile,
    phase: ShotPhase,
}

impl ShotTracker {
    pub fn new(id: ShotId, angle_deg: f64, speed: f64, height: f64) -> Self {
        Self {
            id,
            projectile: Projectile::new(angle_deg, speed, height),
            phase: ShotPhase::Active,
        }
    }

    /// Move the shot `dt` seconds along its flight and reclassify it
    pub fn update(&mut self, dt: f64) -> ShotStep {
        let before = self.projectile.position();
        self.projectile.update(dt);
        let delta = self.projectile.position() - before;

        let mut step = ShotStep {
            delta,
            overlay: None,
            overlay_hidden: false,
        };

        match (self.phase, classify(self.x(), self.y())) {
            (ShotPhase::Active, ShotPhase::Active) => {
                step.overlay = Some(self.overlay_values());
            }
            (ShotPhase::Active, _) => {
                self.phase = ShotPhase::ActiveNoOverlay;
                step.overlay_hidden = true;
            }
            _ => {}
        }

        step
    }

    /// True once the shot is at or below ground level
    ///
    /// A shot launched from height 0 starts on the ground, so this is only
    /// meaningful after at least one [`update`](Self::update).
    #[inline]
    pub fn has_landed(&self) -> bool {
        self.projectile.y() <= 0.0
    }

    /// Mark the shot as removed from play
    ///
    /// Transient: the driver calls this just before dropping the tracker.
    pub fn retire(&mut self) {
        self.phase = ShotPhase::Retired;
    }

    pub fn overlay_values(&self) -> OverlayValues {
        OverlayValues {
            x: round1(self.x()),
            y: round1(self.y()),
            speed: round1(self.speed()),
        }
    }

    #[inline]
    pub fn id(&self) -> ShotId {
        self.id
    }

    #[inline]
    pub fn phase(&self) -> ShotPhase {
        self.phase
    }

    #[inline]
    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.projectile.x()
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.projectile.y()
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.projectile.speed()
    }
}
