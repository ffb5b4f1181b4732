//! In-memory retained scene
//!
//! [`Scene`] keeps every drawn shape in draw order and queues key presses fed
//! in by the platform. Backends paint it each frame through a [`Viewport`].

use std::collections::{BTreeMap, VecDeque};

use glam::{DVec2, Vec2};

use super::canvas::{Canvas, Color, Key, RenderError, Shape, ShapeId};
use crate::consts::{VIEW_MAX, VIEW_MIN};

/// Maps the logical coordinate window onto a pixel surface (y up → y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min: DVec2,
    pub max: DVec2,
    /// Surface size in pixels
    pub size: Vec2,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            min: DVec2::new(VIEW_MIN.0, VIEW_MIN.1),
            max: DVec2::new(VIEW_MAX.0, VIEW_MAX.1),
            size: Vec2::new(width, height),
        }
    }

    /// Pixels per meter along each axis
    pub fn scale(&self) -> Vec2 {
        let span = self.max - self.min;
        Vec2::new(
            self.size.x / span.x as f32,
            self.size.y / span.y as f32,
        )
    }

    /// Logical point to pixel position
    pub fn to_screen(&self, p: DVec2) -> Vec2 {
        let scale = self.scale();
        Vec2::new(
            (p.x - self.min.x) as f32 * scale.x,
            self.size.y - (p.y - self.min.y) as f32 * scale.y,
        )
    }
}

/// Retained display list implementing [`Canvas`]
#[derive(Debug, Default)]
pub struct Scene {
    shapes: BTreeMap<ShapeId, Shape>,
    keys: VecDeque<Key>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a key press for the next [`Canvas::poll_key`]
    pub fn push_key(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    /// Shapes in draw order
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes.iter().map(|(id, shape)| (*id, shape))
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Content of a text shape
    pub fn text(&self, id: ShapeId) -> Option<&str> {
        match self.shapes.get(&id)? {
            Shape::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn shape_mut(&mut self, id: ShapeId) -> Result<&mut Shape, RenderError> {
        self.shapes.get_mut(&id).ok_or(RenderError::UnknownShape(id))
    }
}

impl Canvas for Scene {
    fn draw(&mut self, shape: Shape) -> Result<ShapeId, RenderError> {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.insert(id, shape);
        Ok(id)
    }

    fn undraw(&mut self, id: ShapeId) -> Result<(), RenderError> {
        self.shapes
            .remove(&id)
            .map(|_| ())
            .ok_or(RenderError::UnknownShape(id))
    }

    fn move_by(&mut self, id: ShapeId, delta: DVec2) -> Result<(), RenderError> {
        self.shape_mut(id)?.translate(delta);
        Ok(())
    }

    fn set_text(&mut self, id: ShapeId, text: &str) -> Result<(), RenderError> {
        match self.shape_mut(id)? {
            Shape::Text { content, .. } => {
                content.clear();
                content.push_str(text);
                Ok(())
            }
            other => Err(RenderError::wrong_kind(id, "text", other)),
        }
    }

    fn set_color(&mut self, id: ShapeId, color: Color) -> Result<(), RenderError> {
        self.shape_mut(id)?.set_color(color);
        Ok(())
    }

    fn center(&self, id: ShapeId) -> Result<DVec2, RenderError> {
        self.shapes
            .get(&id)
            .map(Shape::center)
            .ok_or(RenderError::UnknownShape(id))
    }

    fn poll_key(&mut self) -> Option<Key> {
        self.keys.pop_front()
    }
}
