//! Presentation module
//!
//! Everything that turns simulation events into shapes. The retained
//! [`Scene`] is backend independent; `window` paints it with macroquad.

pub mod canvas;
pub mod presenter;
pub mod scene;
#[cfg(feature = "window")]
pub mod window;

pub use canvas::{Canvas, Color, Key, RenderError, Shape, ShapeId};
pub use presenter::Presenter;
pub use scene::{Scene, Viewport};
