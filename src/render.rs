//! Presentation: the dashboard projection, the scene and its rasteriser.
//!
//! None of these keep state between frames. Each call reads the current
//! [`GameState`](crate::game::GameState) and produces a fresh view of it.

mod hud;
mod raster;
mod scene;
mod text;

pub use hud::{Bar, Hud, ItemSlot};
pub use raster::{Pixel, Raster};
pub use scene::{
    CANVAS_HEIGHT, CANVAS_WIDTH, DAMAGE_THRESHOLD, Point, Rect, Rgba, SHIP_HEIGHT, SHIP_WIDTH,
    Scene, Shape, damage_width, ship_alpha, ship_origin,
};
pub use text::render_text;
