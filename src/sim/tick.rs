//! Fixed timestep simulation tick
//!
//! One call advances every shot in flight, retires the ones that landed,
//! updates the last-shot summary and then applies at most one command.

use super::state::{LastShot, SimEvent, SimState};
use crate::consts::FIELD_MAX_X;

/// The closed set of player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    IncreaseAngle,
    DecreaseAngle,
    IncreaseSpeed,
    DecreaseSpeed,
    Fire,
    Quit,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub command: Option<Command>,
}

/// Values captured from the last shot processed in a tick
#[derive(Debug, Clone, Copy)]
struct Capture {
    x: f64,
    y: f64,
    speed: f64,
}

/// Advance the simulation state by one fixed timestep
pub fn tick(state: &mut SimState, input: &TickInput, dt: f64) {
    if !state.running {
        return;
    }

    state.time_ticks += 1;
    update_shots(state, dt);

    if let Some(command) = input.command {
        apply_command(state, command);
    }
}

fn update_shots(state: &mut SimState, dt: f64) {
    // Only the last shot iterated feeds the summary; earlier values are overwritten
    let mut capture = None;

    for shot in state.shots.iter_mut() {
        let step = shot.update(dt);
        let id = shot.id();
        capture = Some(Capture {
            x: shot.x(),
            y: shot.y(),
            speed: shot.speed(),
        });

        state.events.push(SimEvent::ShotMoved {
            id,
            delta: step.delta,
            overlay: step.overlay,
        });
        if step.overlay_hidden {
            log::debug!(
                "Shot {} left the field at x={:.1}, y={:.1}",
                id,
                shot.x(),
                shot.y()
            );
            state.events.push(SimEvent::OverlayHidden { id });
        }
    }

    let (alive, landed): (Vec<_>, Vec<_>) = state
        .shots
        .drain(..)
        .partition(|shot| !shot.has_landed());
    state.shots = alive;

    for mut shot in landed {
        shot.retire();
        log::debug!(
            "Shot {} landed at x={:.1} after {:.2}s",
            shot.id(),
            shot.x(),
            shot.projectile().elapsed()
        );
        state.events.push(SimEvent::ShotRetired { id: shot.id() });
    }

    if let Some(capture) = capture {
        if capture.y <= 0.0 {
            let summary = if capture.x > FIELD_MAX_X {
                LastShot::OutOfRange
            } else {
                LastShot::Landed {
                    distance: capture.x,
                    speed: capture.speed,
                }
            };
            state.last_shot = summary;
            state.events.push(SimEvent::SummaryChanged(summary));
        }
    }
}

fn apply_command(state: &mut SimState, command: Command) {
    let aim = match command {
        Command::IncreaseAngle => state.launcher.adjust_angle(state.angle_step_deg),
        Command::DecreaseAngle => state.launcher.adjust_angle(-state.angle_step_deg),
        Command::IncreaseSpeed => state.launcher.adjust_speed(state.speed_step),
        Command::DecreaseSpeed => state.launcher.adjust_speed(-state.speed_step),
        Command::Fire => {
            state.fire();
            return;
        }
        Command::Quit => {
            log::info!("Quit requested after {} ticks", state.time_ticks);
            state.running = false;
            state.events.push(SimEvent::Quit);
            return;
        }
    };

    log::debug!(
        "Aim changed: {:.1} deg, {:.1} m/s",
        aim.angle_degrees(),
        aim.speed
    );
    state.events.push(SimEvent::AimChanged(aim));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::ShotId;
    use crate::sim::tracker::ShotPhase;

    fn command(command: Command) -> TickInput {
        TickInput {
            command: Some(command),
        }
    }

    fn run_until_empty(state: &mut SimState) -> Vec<SimEvent> {
        let mut events = Vec::new();
        let mut guard = 0;
        while !state.shots.is_empty() {
            tick(state, &TickInput::default(), SIM_DT);
            events.extend(state.drain_events());
            assert!(state.shots.iter().all(|s| s.phase() != ShotPhase::Retired));
            guard += 1;
            assert!(guard < 100_000, "shots never landed");
        }
        events
    }

    #[test]
    fn test_fire_then_advance() {
        let mut state = SimState::default();
        tick(&mut state, &command(Command::Fire), SIM_DT);
        assert_eq!(state.shots.len(), 1);
        // Fired after the update pass, so the shot has not moved yet
        assert_eq!(state.shots[0].x(), 0.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.shots[0].x() > 0.0);
        assert!(state.shots[0].y() > 0.0);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_reference_landing_updates_summary() {
        let mut state = SimState::default();
        tick(&mut state, &command(Command::Fire), SIM_DT);
        state.drain_events();

        let events = run_until_empty(&mut state);
        let retired = events
            .iter()
            .filter(|e| matches!(e, SimEvent::ShotRetired { .. }))
            .count();
        assert_eq!(retired, 1);

        match state.last_shot {
            LastShot::Landed { distance, speed } => {
                assert!((distance - 163.3).abs() < 0.5, "distance {distance}");
                assert!((speed - 40.0).abs() < 0.5, "speed {speed}");
            }
            other => panic!("unexpected summary {other:?}"),
        }
    }

    #[test]
    fn test_off_field_shot_reports_not_available() {
        let mut state = SimState::default();
        state.launcher = crate::sim::Launcher::new(10.0, 120.0);
        tick(&mut state, &command(Command::Fire), SIM_DT);
        state.drain_events();

        let mut stayed_active_off_field = false;
        let mut events = Vec::new();
        while !state.shots.is_empty() {
            tick(&mut state, &TickInput::default(), SIM_DT);
            events.extend(state.drain_events());
            if let Some(shot) = state.shots.first() {
                if shot.x() > FIELD_MAX_X {
                    assert_eq!(shot.phase(), ShotPhase::ActiveNoOverlay);
                    stayed_active_off_field = true;
                }
            }
        }

        assert!(stayed_active_off_field);
        assert_eq!(state.last_shot, LastShot::OutOfRange);
        assert!(events.contains(&SimEvent::SummaryChanged(LastShot::OutOfRange)));
        let position = |wanted: SimEvent| events.iter().position(|e| *e == wanted);
        let hidden = position(SimEvent::OverlayHidden { id: ShotId(1) });
        let retired = position(SimEvent::ShotRetired { id: ShotId(1) });
        assert!(hidden.expect("overlay hidden") < retired.expect("retired"));
    }

    #[test]
    fn test_shallow_shot_at_100_stays_in_field() {
        // 10 deg at 100 m/s ranges about 349 m, short of the field edge
        let mut state = SimState::default();
        state.launcher = crate::sim::Launcher::new(10.0, 100.0);
        tick(&mut state, &command(Command::Fire), SIM_DT);
        state.drain_events();

        let mut events = Vec::new();
        while !state.shots.is_empty() {
            tick(&mut state, &TickInput::default(), SIM_DT);
            events.extend(state.drain_events());
            if let Some(shot) = state.shots.first() {
                assert!(shot.x() <= FIELD_MAX_X);
                assert_eq!(shot.phase(), ShotPhase::Active);
            }
        }

        match state.last_shot {
            LastShot::Landed { distance, speed } => {
                assert!((348.5..350.5).contains(&distance), "distance {distance}");
                assert!((speed - 100.0).abs() < 0.5, "speed {speed}");
                assert!(!state.last_shot.distance_text().starts_with("N/A"));
            }
            other => panic!("unexpected summary {other:?}"),
        }
        assert!(!events.contains(&SimEvent::SummaryChanged(LastShot::OutOfRange)));
    }

    #[test]
    fn test_retirement_is_monotonic() {
        let mut state = SimState::default();
        tick(&mut state, &command(Command::Fire), SIM_DT);
        run_until_empty(&mut state);

        for _ in 0..240 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            assert!(state.shot(ShotId(1)).is_none());
            assert!(state.drain_events().is_empty());
        }
    }

    #[test]
    fn test_multi_shot_isolation() {
        let mut state = SimState::default();
        tick(&mut state, &command(Command::Fire), SIM_DT);
        for _ in 0..4 {
            tick(&mut state, &command(Command::IncreaseAngle), SIM_DT);
        }
        tick(&mut state, &command(Command::IncreaseSpeed), SIM_DT);
        tick(&mut state, &command(Command::Fire), SIM_DT);
        assert_eq!(state.shots.len(), 2);

        // Shadow copies advanced on their own must agree with the shared run
        let mut first = state.shots[0].clone();
        let mut second = state.shots[1].clone();
        for _ in 0..300 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            first.update(SIM_DT);
            second.update(SIM_DT);
        }
        assert_eq!(state.shot(ShotId(1)).map(|s| s.x()), Some(first.x()));
        assert_eq!(state.shot(ShotId(2)).map(|s| s.y()), Some(second.y()));

        // The lower first shot lands first; the second is untouched
        while state.shot(ShotId(1)).is_some() {
            tick(&mut state, &TickInput::default(), SIM_DT);
            second.update(SIM_DT);
        }
        let survivor = state.shot(ShotId(2)).expect("second shot still flying");
        assert_eq!(survivor.x(), second.x());
        assert_eq!(survivor.y(), second.y());
    }

    #[test]
    fn test_summary_follows_last_iterated_shot_only() {
        let mut state = SimState::default();
        // Shot 1: short hop that lands early
        state.launcher = crate::sim::Launcher::new(10.0, 10.0);
        tick(&mut state, &command(Command::Fire), SIM_DT);
        // Shot 2: long flight, still airborne when shot 1 lands
        state.launcher = crate::sim::Launcher::new(80.0, 40.0);
        tick(&mut state, &command(Command::Fire), SIM_DT);

        while state.shot(ShotId(1)).is_some() {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.last_shot, LastShot::Pending);

        run_until_empty(&mut state);
        assert!(matches!(state.last_shot, LastShot::Landed { .. }));
    }

    #[test]
    fn test_aim_commands_emit_events() {
        let mut state = SimState::default();
        tick(&mut state, &command(Command::IncreaseAngle), SIM_DT);
        tick(&mut state, &command(Command::DecreaseSpeed), SIM_DT);

        let events = state.drain_events();
        assert_eq!(events.len(), 2);
        match events[1] {
            SimEvent::AimChanged(aim) => {
                assert!((aim.angle_degrees() - 47.5).abs() < 1e-9);
                assert_eq!(aim.speed, 39.0);
            }
            ref other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_quit_stops_ticking() {
        let mut state = SimState::default();
        tick(&mut state, &command(Command::Fire), SIM_DT);
        tick(&mut state, &command(Command::Quit), SIM_DT);
        assert!(!state.running);
        assert_eq!(state.drain_events().last(), Some(&SimEvent::Quit));

        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);
    }
}
