//! Drawing surface abstraction
//!
//! The simulation never draws. The presenter issues retained-mode calls
//! (draw, undraw, move, set text) against a [`Canvas`], and a backend turns
//! the retained shapes into pixels.

use std::fmt;

use glam::DVec2;

/// Handle to a shape currently on a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub u32);

/// Named colors used by the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Black,
    Red,
    Green,
    Blue,
}

impl Color {
    /// Linear RGBA for backends
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            Color::Black => [0.0, 0.0, 0.0, 1.0],
            Color::Red => [0.9, 0.1, 0.1, 1.0],
            Color::Green => [0.1, 0.6, 0.1, 1.0],
            Color::Blue => [0.1, 0.2, 0.9, 1.0],
        }
    }
}

/// A primitive in logical (meter) coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        center: DVec2,
        radius: f64,
        fill: Color,
    },
    Line {
        from: DVec2,
        to: DVec2,
        width: f64,
        /// Arrow head at `to`
        arrow: bool,
        color: Color,
    },
    /// Text centered on `anchor`
    Text {
        anchor: DVec2,
        content: String,
        color: Color,
    },
}

impl Shape {
    pub fn circle(center: DVec2, radius: f64, fill: Color) -> Self {
        Shape::Circle {
            center,
            radius,
            fill,
        }
    }

    pub fn line(from: DVec2, to: DVec2) -> Self {
        Shape::Line {
            from,
            to,
            width: 1.0,
            arrow: false,
            color: Color::Black,
        }
    }

    pub fn arrow(from: DVec2, to: DVec2, width: f64) -> Self {
        Shape::Line {
            from,
            to,
            width,
            arrow: true,
            color: Color::Black,
        }
    }

    pub fn text(anchor: DVec2, content: impl Into<String>) -> Self {
        Shape::Text {
            anchor,
            content: content.into(),
            color: Color::Black,
        }
    }

    /// Reference point of the shape (circle center, line midpoint, text anchor)
    pub fn center(&self) -> DVec2 {
        match self {
            Shape::Circle { center, .. } => *center,
            Shape::Line { from, to, .. } => (*from + *to) / 2.0,
            Shape::Text { anchor, .. } => *anchor,
        }
    }

    /// Translate the shape by `delta`
    pub fn translate(&mut self, delta: DVec2) {
        match self {
            Shape::Circle { center, .. } => *center += delta,
            Shape::Line { from, to, .. } => {
                *from += delta;
                *to += delta;
            }
            Shape::Text { anchor, .. } => *anchor += delta,
        }
    }

    pub fn set_color(&mut self, color: Color) {
        match self {
            Shape::Circle { fill, .. } => *fill = color,
            Shape::Line { color: c, .. } | Shape::Text { color: c, .. } => *c = color,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Shape::Circle { .. } => "circle",
            Shape::Line { .. } => "line",
            Shape::Text { .. } => "text",
        }
    }
}

/// Keys the field reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

/// Errors raised by a canvas backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The shape is not (or no longer) on the canvas
    UnknownShape(ShapeId),
    /// Operation does not apply to this kind of shape
    WrongShapeKind {
        id: ShapeId,
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnknownShape(id) => write!(f, "shape {} is not on the canvas", id.0),
            RenderError::WrongShapeKind {
                id,
                expected,
                found,
            } => write!(f, "shape {} is a {found}, expected a {expected}", id.0),
        }
    }
}

impl std::error::Error for RenderError {}

impl RenderError {
    pub(crate) fn wrong_kind(id: ShapeId, expected: &'static str, shape: &Shape) -> Self {
        RenderError::WrongShapeKind {
            id,
            expected,
            found: shape.kind(),
        }
    }
}

/// Retained-mode drawing surface plus the key it last saw
pub trait Canvas {
    /// Put a shape on the canvas
    fn draw(&mut self, shape: Shape) -> Result<ShapeId, RenderError>;

    /// Remove a shape from the canvas
    fn undraw(&mut self, id: ShapeId) -> Result<(), RenderError>;

    /// Move a shape by `(dx, dy)`
    fn move_by(&mut self, id: ShapeId, delta: DVec2) -> Result<(), RenderError>;

    /// Replace the content of a text shape
    fn set_text(&mut self, id: ShapeId, content: &str) -> Result<(), RenderError>;

    fn set_color(&mut self, id: ShapeId, color: Color) -> Result<(), RenderError>;

    /// Reference point of a shape
    fn center(&self, id: ShapeId) -> Result<DVec2, RenderError>;

    /// Next pending key press, if any (never blocks)
    fn poll_key(&mut self) -> Option<Key>;
}
