//! Simulation state and the events it reports to the view
//!
//! Everything the frame driver mutates lives in [`SimState`]. The view never
//! reads the shot list directly; it reacts to the [`SimEvent`]s queued here.

use std::fmt;

use glam::DVec2;

use super::launcher::{Aim, Launcher};
use super::tracker::{OverlayValues, ShotTracker};
use crate::round1;

/// Stable identifier of a fired shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShotId(pub u32);

impl fmt::Display for ShotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Summary of the most recent landing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LastShot {
    /// Nothing has landed yet
    #[default]
    Pending,
    /// Landed inside the field
    Landed { distance: f64, speed: f64 },
    /// Landed beyond the field edge
    OutOfRange,
}

impl LastShot {
    /// Text for the "Last Shot Distance (m)" readout
    pub fn distance_text(&self) -> String {
        match self {
            LastShot::Pending => String::new(),
            LastShot::Landed { distance, .. } => format!("{:.1}", round1(*distance)),
            LastShot::OutOfRange => "N/A (>420)".to_string(),
        }
    }

    /// Text for the "Last Shot Final Speed (m/s)" readout
    pub fn speed_text(&self) -> String {
        match self {
            LastShot::Pending => String::new(),
            LastShot::Landed { speed, .. } => format!("{:.1}", round1(*speed)),
            LastShot::OutOfRange => "N/A".to_string(),
        }
    }
}

/// Changes the view has to reflect, in the order they happened
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// Launcher aim changed
    AimChanged(Aim),
    /// New shot launched from `origin`
    ShotFired { id: ShotId, origin: DVec2 },
    /// Shot moved by `delta`; `overlay` carries fresh readouts while visible
    ShotMoved {
        id: ShotId,
        delta: DVec2,
        overlay: Option<OverlayValues>,
    },
    /// Shot left the field; its overlay must go
    OverlayHidden { id: ShotId },
    /// Shot landed and left the active set
    ShotRetired { id: ShotId },
    /// Last-shot summary changed
    SummaryChanged(LastShot),
    /// Quit requested
    Quit,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// The one launcher for the session
    pub launcher: Launcher,
    /// Shots in flight, in firing order
    pub shots: Vec<ShotTracker>,
    /// Latest landing summary
    pub last_shot: LastShot,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Cleared once quit has been requested
    pub running: bool,
    /// Aim step sizes per command
    pub angle_step_deg: f64,
    pub speed_step: f64,
    pub(super) events: Vec<SimEvent>,
    next_id: u32,
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(Launcher::default())
    }
}

impl SimState {
    pub fn new(launcher: Launcher) -> Self {
        Self {
            launcher,
            shots: Vec::new(),
            last_shot: LastShot::Pending,
            time_ticks: 0,
            running: true,
            angle_step_deg: crate::consts::ANGLE_STEP_DEG,
            speed_step: crate::consts::SPEED_STEP,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new shot ID
    pub fn next_shot_id(&mut self) -> ShotId {
        let id = ShotId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Fire from the launcher and add the shot to the active set
    pub fn fire(&mut self) -> ShotId {
        let id = self.next_shot_id();
        let shot = self.launcher.fire(id);
        let aim = self.launcher.aim();
        log::info!(
            "Fired shot {} at {:.1} deg, {:.1} m/s",
            id,
            aim.angle_degrees(),
            aim.speed
        );
        self.push_event(SimEvent::ShotFired {
            id,
            origin: shot.projectile().position(),
        });
        self.shots.push(shot);
        id
    }

    pub fn shot(&self, id: ShotId) -> Option<&ShotTracker> {
        self.shots.iter().find(|s| s.id() == id)
    }

    pub(crate) fn push_event(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
