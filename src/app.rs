//! Frame driver
//!
//! Each rendered frame polls at most one key, runs the fixed-timestep
//! simulation for the elapsed wall time and mirrors the resulting events onto
//! the canvas. Render failures abort the frame and are returned to the caller.

use crate::Settings;
use crate::sim::{Command, Launcher, SimState, TickInput, tick};
use crate::view::{Canvas, Key, Presenter, RenderError};

/// Longest wall-clock gap credited to one frame (s)
const MAX_FRAME_TIME: f64 = 0.1;

/// Whether the session continues after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Running,
    Quit,
}

/// Map a pressed key to a player command
pub fn command_for_key(key: Key) -> Option<Command> {
    match key {
        Key::Up => Some(Command::IncreaseAngle),
        Key::Down => Some(Command::DecreaseAngle),
        Key::Right => Some(Command::IncreaseSpeed),
        Key::Left => Some(Command::DecreaseSpeed),
        Key::Char('f') => Some(Command::Fire),
        Key::Char('q' | 'Q') => Some(Command::Quit),
        Key::Char(_) => None,
    }
}

pub struct App {
    state: SimState,
    presenter: Presenter,
    sim_dt: f64,
    max_substeps: u32,
    accumulator: f64,
    /// Command waiting for the next simulation step
    pending: Option<Command>,
}

impl App {
    /// Build the simulation from settings and draw the initial field
    pub fn new(settings: &Settings, canvas: &mut impl Canvas) -> Result<Self, RenderError> {
        let mut state = SimState::new(Launcher::new(
            settings.initial_angle_deg,
            settings.initial_speed,
        ));
        state.angle_step_deg = settings.angle_step_deg;
        state.speed_step = settings.speed_step;

        let presenter = Presenter::new(canvas, state.launcher.aim())?;
        log::info!(
            "Simulation ready: {:.0} Hz, up to {} steps per frame",
            settings.tick_rate_hz,
            settings.max_substeps
        );

        Ok(Self {
            state,
            presenter,
            sim_dt: settings.sim_dt(),
            max_substeps: settings.max_substeps,
            accumulator: 0.0,
            pending: None,
        })
    }

    /// Run one rendered frame covering `elapsed` seconds of wall time
    pub fn frame(
        &mut self,
        canvas: &mut impl Canvas,
        elapsed: f64,
    ) -> Result<AppStatus, RenderError> {
        if self.pending.is_none() {
            self.pending = canvas.poll_key().and_then(command_for_key);
        }

        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= self.sim_dt && substeps < self.max_substeps {
            let input = TickInput {
                command: self.pending.take(),
            };
            tick(&mut self.state, &input, self.sim_dt);
            self.accumulator -= self.sim_dt;
            substeps += 1;

            for event in self.state.drain_events() {
                self.presenter.apply(canvas, &event)?;
            }
            if !self.state.running {
                return Ok(AppStatus::Quit);
            }
        }

        // Drop time we could not simulate rather than carrying it forward
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.sim_dt);
        }

        Ok(AppStatus::Running)
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }
}
