//! Field presentation
//!
//! Draws the static field once, then keeps the canvas in step with the
//! simulation by applying each [`SimEvent`] in order.

use std::collections::BTreeMap;

use glam::DVec2;

use super::canvas::{Canvas, Color, RenderError, Shape, ShapeId};
use crate::consts::{FIELD_MAX_X, MARKER_RADIUS, VIEW_MIN};
use crate::round1;
use crate::sim::{Aim, LastShot, OverlayValues, ShotId, SimEvent};

/// Arrow stroke width
const ARROW_WIDTH: f64 = 3.0;
/// Spacing of the distance ticks along the ground (m)
const TICK_SPACING: usize = 100;

/// A name label and the value drawn to its right
#[derive(Debug, Clone, Copy)]
struct LabelPair {
    name: ShapeId,
    value: ShapeId,
}

impl LabelPair {
    fn draw(
        canvas: &mut impl Canvas,
        anchor: DVec2,
        name: &str,
        value_offset: f64,
    ) -> Result<Self, RenderError> {
        Ok(Self {
            name: canvas.draw(Shape::text(anchor, name))?,
            value: canvas.draw(Shape::text(anchor + DVec2::new(value_offset, 0.0), ""))?,
        })
    }

    fn move_by(&self, canvas: &mut impl Canvas, delta: DVec2) -> Result<(), RenderError> {
        canvas.move_by(self.name, delta)?;
        canvas.move_by(self.value, delta)
    }

    fn undraw(self, canvas: &mut impl Canvas) -> Result<(), RenderError> {
        canvas.undraw(self.name)?;
        canvas.undraw(self.value)
    }
}

/// Marker and readout labels of one shot in flight
#[derive(Debug)]
struct ShotVisual {
    marker: ShapeId,
    /// x, y and speed labels; `None` once hidden
    overlay: Option<[LabelPair; 3]>,
}

impl ShotVisual {
    fn draw(canvas: &mut impl Canvas, origin: DVec2) -> Result<Self, RenderError> {
        let marker = canvas.draw(Shape::circle(origin, MARKER_RADIUS, Color::Red))?;
        let overlay = [
            LabelPair::draw(canvas, origin + DVec2::new(0.0, 20.0), "x (m):", 15.0)?,
            LabelPair::draw(canvas, origin + DVec2::new(0.0, 15.0), "y (m):", 15.0)?,
            LabelPair::draw(canvas, origin + DVec2::new(0.0, 10.0), "Speed (m/s):", 23.0)?,
        ];
        Ok(Self {
            marker,
            overlay: Some(overlay),
        })
    }

    fn move_by(&self, canvas: &mut impl Canvas, delta: DVec2) -> Result<(), RenderError> {
        canvas.move_by(self.marker, delta)?;
        if let Some(overlay) = &self.overlay {
            for pair in overlay {
                pair.move_by(canvas, delta)?;
            }
        }
        Ok(())
    }

    fn show(&self, canvas: &mut impl Canvas, values: &OverlayValues) -> Result<(), RenderError> {
        let Some([x, y, speed]) = &self.overlay else {
            return Ok(());
        };
        canvas.set_text(x.value, &format!("{:.1}", values.x))?;
        canvas.set_text(y.value, &format!("{:.1}", values.y))?;
        canvas.set_text(speed.value, &format!("{:.1}", values.speed))
    }

    fn hide_overlay(&mut self, canvas: &mut impl Canvas) -> Result<(), RenderError> {
        if let Some(overlay) = self.overlay.take() {
            for pair in overlay {
                pair.undraw(canvas)?;
            }
        }
        Ok(())
    }

    /// Remove every shape of the shot
    fn undraw(mut self, canvas: &mut impl Canvas) -> Result<(), RenderError> {
        self.hide_overlay(canvas)?;
        canvas.undraw(self.marker)
    }
}

/// Owns the field's shapes and mirrors simulation events onto a canvas
#[derive(Debug)]
pub struct Presenter {
    arrow: ShapeId,
    angle_value: ShapeId,
    speed_value: ShapeId,
    distance_value: ShapeId,
    final_speed_value: ShapeId,
    shots: BTreeMap<ShotId, ShotVisual>,
}

impl Presenter {
    /// Draw the ground, distance ticks, launcher and HUD for the given aim
    pub fn new(canvas: &mut impl Canvas, aim: Aim) -> Result<Self, RenderError> {
        canvas.draw(Shape::line(
            DVec2::new(VIEW_MIN.0, 0.0),
            DVec2::new(FIELD_MAX_X, 0.0),
        ))?;
        for x in (0..FIELD_MAX_X as usize).step_by(TICK_SPACING) {
            let x = x as f64;
            canvas.draw(Shape::text(DVec2::new(x, -7.0), format!("{x}")))?;
            canvas.draw(Shape::line(DVec2::new(x, 0.0), DVec2::new(x, 2.0)))?;
        }

        canvas.draw(Shape::circle(DVec2::ZERO, MARKER_RADIUS, Color::Red))?;
        let arrow = canvas.draw(Shape::arrow(DVec2::ZERO, aim.arrow_tip(), ARROW_WIDTH))?;

        canvas.draw(Shape::text(DVec2::new(10.0, 300.0), "Initial Angle (degrees):"))?;
        let angle_value = canvas.draw(Shape::text(
            DVec2::new(45.0, 300.0),
            format!("{:.1}", round1(aim.angle_degrees())),
        ))?;
        canvas.draw(Shape::text(DVec2::new(7.0, 285.0), "Initial Velocity (m/s):"))?;
        let speed_value = canvas.draw(Shape::text(
            DVec2::new(45.0, 285.0),
            format!("{:.1}", round1(aim.speed)),
        ))?;

        canvas.draw(Shape::text(DVec2::new(15.0, -15.0), "Last Shot Distance (m):"))?;
        canvas.draw(Shape::text(
            DVec2::new(120.0, -15.0),
            "Last Shot Final Speed (m/s):",
        ))?;
        let distance_value = canvas.draw(Shape::text(DVec2::new(60.0, -15.0), ""))?;
        canvas.set_color(distance_value, Color::Green)?;
        let final_speed_value = canvas.draw(Shape::text(DVec2::new(165.0, -15.0), ""))?;
        canvas.set_color(final_speed_value, Color::Blue)?;

        Ok(Self {
            arrow,
            angle_value,
            speed_value,
            distance_value,
            final_speed_value,
            shots: BTreeMap::new(),
        })
    }

    /// Reflect one simulation event on the canvas
    pub fn apply(&mut self, canvas: &mut impl Canvas, event: &SimEvent) -> Result<(), RenderError> {
        match event {
            SimEvent::AimChanged(aim) => self.redraw_aim(canvas, aim),
            SimEvent::ShotFired { id, origin } => {
                let visual = ShotVisual::draw(canvas, *origin)?;
                self.shots.insert(*id, visual);
                Ok(())
            }
            SimEvent::ShotMoved { id, delta, overlay } => {
                let Some(visual) = self.shots.get(id) else {
                    log::warn!("Move for unknown shot {id}");
                    return Ok(());
                };
                visual.move_by(canvas, *delta)?;
                if let Some(values) = overlay {
                    visual.show(canvas, values)?;
                }
                Ok(())
            }
            SimEvent::OverlayHidden { id } => match self.shots.get_mut(id) {
                Some(visual) => visual.hide_overlay(canvas),
                None => Ok(()),
            },
            SimEvent::ShotRetired { id } => match self.shots.remove(id) {
                Some(visual) => visual.undraw(canvas),
                None => Ok(()),
            },
            SimEvent::SummaryChanged(summary) => self.show_summary(canvas, summary),
            SimEvent::Quit => Ok(()),
        }
    }

    fn redraw_aim(&mut self, canvas: &mut impl Canvas, aim: &Aim) -> Result<(), RenderError> {
        canvas.undraw(self.arrow)?;
        self.arrow = canvas.draw(Shape::arrow(DVec2::ZERO, aim.arrow_tip(), ARROW_WIDTH))?;
        canvas.set_text(self.angle_value, &format!("{:.1}", round1(aim.angle_degrees())))?;
        canvas.set_text(self.speed_value, &format!("{:.1}", round1(aim.speed)))
    }

    fn show_summary(&self, canvas: &mut impl Canvas, summary: &LastShot) -> Result<(), RenderError> {
        canvas.set_text(self.distance_value, &summary.distance_text())?;
        canvas.set_text(self.final_speed_value, &summary.speed_text())
    }

    /// Current aim arrow shape
    pub fn arrow(&self) -> ShapeId {
        self.arrow
    }

    /// Marker of a shot still on the canvas
    pub fn marker(&self, id: ShotId) -> Option<ShapeId> {
        self.shots.get(&id).map(|v| v.marker)
    }

    /// Whether a shot's overlay labels are still drawn
    pub fn overlay_visible(&self, id: ShotId) -> bool {
        self.shots.get(&id).is_some_and(|v| v.overlay.is_some())
    }

    /// Value labels of a shot's overlay (x, y, speed)
    pub fn overlay_values(&self, id: ShotId) -> Option<[ShapeId; 3]> {
        let [x, y, speed] = self.shots.get(&id)?.overlay.as_ref()?;
        Some([x.value, y.value, speed.value])
    }

    pub fn summary_labels(&self) -> (ShapeId, ShapeId) {
        (self.distance_value, self.final_speed_value)
    }

    pub fn aim_labels(&self) -> (ShapeId, ShapeId) {
        (self.angle_value, self.speed_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::{Command, Launcher, SimState, TickInput, tick};
    use crate::view::Scene;

    fn setup() -> (SimState, Scene, Presenter) {
        let state = SimState::default();
        let mut scene = Scene::new();
        let presenter = Presenter::new(&mut scene, state.launcher.aim()).unwrap();
        (state, scene, presenter)
    }

    fn step(
        state: &mut SimState,
        scene: &mut Scene,
        presenter: &mut Presenter,
        command: Option<Command>,
    ) {
        tick(state, &TickInput { command }, SIM_DT);
        for event in state.drain_events() {
            presenter.apply(scene, &event).unwrap();
        }
    }

    #[test]
    fn test_static_field() {
        let (_, scene, presenter) = setup();
        let (angle, speed) = presenter.aim_labels();
        assert_eq!(scene.text(angle), Some("45.0"));
        assert_eq!(scene.text(speed), Some("40.0"));

        let (distance, final_speed) = presenter.summary_labels();
        assert_eq!(scene.text(distance), Some(""));
        assert!(matches!(
            scene.get(final_speed),
            Some(Shape::Text {
                color: Color::Blue,
                ..
            })
        ));
        // Ground, 5 ticks with labels, base, arrow, 4 HUD captions, 4 HUD values
        assert_eq!(scene.len(), 1 + 10 + 2 + 8);
    }

    #[test]
    fn test_aim_change_redraws_arrow() {
        let (mut state, mut scene, mut presenter) = setup();
        let old_arrow = presenter.arrow();
        step(&mut state, &mut scene, &mut presenter, Some(Command::IncreaseAngle));

        assert!(!scene.contains(old_arrow));
        let (angle, _) = presenter.aim_labels();
        assert_eq!(scene.text(angle), Some("47.5"));

        step(&mut state, &mut scene, &mut presenter, Some(Command::DecreaseSpeed));
        let tip = state.launcher.aim().arrow_tip();
        match scene.get(presenter.arrow()) {
            Some(Shape::Line { to, arrow, .. }) => {
                assert!(*arrow);
                assert!((*to - tip).length() < 1e-12);
            }
            other => panic!("unexpected arrow {other:?}"),
        }
    }

    #[test]
    fn test_marker_follows_projectile() {
        let (mut state, mut scene, mut presenter) = setup();
        step(&mut state, &mut scene, &mut presenter, Some(Command::Fire));
        let marker = presenter.marker(ShotId(1)).unwrap();

        for _ in 0..200 {
            step(&mut state, &mut scene, &mut presenter, None);
            let shot = state.shot(ShotId(1)).unwrap();
            let center = scene.center(marker).unwrap();
            assert!((center - shot.projectile().position()).length() < 1e-9);
        }

        let [x, y, speed] = presenter.overlay_values(ShotId(1)).unwrap();
        let shot = state.shot(ShotId(1)).unwrap();
        assert_eq!(scene.text(x), Some(format!("{:.1}", round1(shot.x())).as_str()));
        assert_eq!(scene.text(y), Some(format!("{:.1}", round1(shot.y())).as_str()));
        assert!(scene.text(speed).is_some_and(|s| !s.is_empty()));
    }

    #[test]
    fn test_landing_clears_shot_and_updates_summary() {
        let (mut state, mut scene, mut presenter) = setup();
        let baseline = scene.len();
        step(&mut state, &mut scene, &mut presenter, Some(Command::Fire));
        assert_eq!(scene.len(), baseline + 7);

        while !state.shots.is_empty() {
            step(&mut state, &mut scene, &mut presenter, None);
        }

        assert_eq!(scene.len(), baseline);
        assert!(presenter.marker(ShotId(1)).is_none());
        let (distance, final_speed) = presenter.summary_labels();
        assert_eq!(scene.text(distance), Some(state.last_shot.distance_text().as_str()));
        assert_eq!(scene.text(final_speed), Some(state.last_shot.speed_text().as_str()));
    }

    #[test]
    fn test_off_field_shot_keeps_marker_without_overlay() {
        let (mut state, mut scene, mut presenter) = setup();
        state.launcher = Launcher::new(10.0, 120.0);
        step(&mut state, &mut scene, &mut presenter, Some(Command::Fire));

        while state.shot(ShotId(1)).is_some_and(|s| s.x() <= FIELD_MAX_X) {
            step(&mut state, &mut scene, &mut presenter, None);
        }
        assert!(state.shot(ShotId(1)).is_some());
        assert!(presenter.marker(ShotId(1)).is_some());
        assert!(!presenter.overlay_visible(ShotId(1)));

        while !state.shots.is_empty() {
            step(&mut state, &mut scene, &mut presenter, None);
        }
        let (distance, final_speed) = presenter.summary_labels();
        assert_eq!(scene.text(distance), Some("N/A (>420)"));
        assert_eq!(scene.text(final_speed), Some("N/A"));
    }

    #[test]
    fn test_retired_shot_with_overlay_is_fully_undrawn() {
        let mut scene = Scene::new();
        let mut presenter = Presenter::new(&mut scene, Launcher::default().aim()).unwrap();
        let baseline = scene.len();

        let id = ShotId(9);
        presenter
            .apply(&mut scene, &SimEvent::ShotFired { id, origin: DVec2::ZERO })
            .unwrap();
        assert!(presenter.overlay_visible(id));
        presenter
            .apply(&mut scene, &SimEvent::ShotRetired { id })
            .unwrap();
        assert_eq!(scene.len(), baseline);

        // Retiring twice is a no-op rather than a double undraw
        presenter
            .apply(&mut scene, &SimEvent::ShotRetired { id })
            .unwrap();
    }
}
