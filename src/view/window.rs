//! macroquad backend
//!
//! Paints a [`Scene`] into the native window and feeds key presses back into
//! it. Pixels are derived from the logical coordinate window every frame, so
//! resizing the window rescales the field.

use glam::Vec2;
use macroquad::color::{Color as MqColor, WHITE};
use macroquad::input::{KeyCode, get_char_pressed, is_key_pressed};
use macroquad::shapes::{draw_circle, draw_line};
use macroquad::text::{draw_text, measure_text};
use macroquad::window::{Conf, clear_background, screen_height, screen_width};

use super::canvas::{Color, Key, Shape};
use super::scene::{Scene, Viewport};
use crate::Settings;

const FONT_SIZE: u16 = 18;
/// Arrow head size (pixels) and half-angle (radians)
const ARROW_HEAD_LEN: f32 = 14.0;
const ARROW_HEAD_ANGLE: f32 = 0.45;

/// Window configuration from settings
pub fn window_conf(settings: &Settings) -> Conf {
    Conf {
        window_title: "Projectile Animation".to_string(),
        window_width: settings.window_width as i32,
        window_height: settings.window_height as i32,
        high_dpi: true,
        ..Default::default()
    }
}

fn mq_color(color: Color) -> MqColor {
    let [r, g, b, a] = color.rgba();
    MqColor::new(r, g, b, a)
}

/// Queue this frame's key presses on the scene
pub fn poll_keys(scene: &mut Scene) {
    let arrows = [
        (KeyCode::Up, Key::Up),
        (KeyCode::Down, Key::Down),
        (KeyCode::Left, Key::Left),
        (KeyCode::Right, Key::Right),
    ];
    for (code, key) in arrows {
        if is_key_pressed(code) {
            scene.push_key(key);
        }
    }
    while let Some(c) = get_char_pressed() {
        if !c.is_control() {
            scene.push_key(Key::Char(c));
        }
    }
}

/// Draw every shape of the scene
pub fn paint(scene: &Scene) {
    let viewport = Viewport::new(screen_width(), screen_height());
    let scale = viewport.scale();
    clear_background(WHITE);

    for (_, shape) in scene.shapes() {
        match shape {
            Shape::Circle {
                center,
                radius,
                fill,
            } => {
                let p = viewport.to_screen(*center);
                draw_circle(p.x, p.y, *radius as f32 * scale.x, mq_color(*fill));
            }
            Shape::Line {
                from,
                to,
                width,
                arrow,
                color,
            } => {
                let a = viewport.to_screen(*from);
                let b = viewport.to_screen(*to);
                let color = mq_color(*color);
                draw_line(a.x, a.y, b.x, b.y, *width as f32, color);
                if *arrow {
                    draw_arrow_head(a, b, *width as f32, color);
                }
            }
            Shape::Text {
                anchor,
                content,
                color,
            } => {
                if content.is_empty() {
                    continue;
                }
                let p = viewport.to_screen(*anchor);
                let dims = measure_text(content, None, FONT_SIZE, 1.0);
                draw_text(
                    content,
                    p.x - dims.width / 2.0,
                    p.y + dims.height / 2.0,
                    f32::from(FONT_SIZE),
                    mq_color(*color),
                );
            }
        }
    }
}

fn draw_arrow_head(from: Vec2, to: Vec2, width: f32, color: MqColor) {
    let back = (from - to).normalize_or_zero();
    if back == Vec2::ZERO {
        return;
    }
    for angle in [ARROW_HEAD_ANGLE, -ARROW_HEAD_ANGLE] {
        let wing = to + Vec2::from_angle(angle).rotate(back) * ARROW_HEAD_LEN;
        draw_line(to.x, to.y, wing.x, wing.y, width, color);
    }
}
