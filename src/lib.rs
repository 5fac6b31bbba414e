#![warn(missing_docs)]

//! Minimal tile-map scroller for Macroquad: a grid larger than the window,
//! a clamped camera and level-triggered keyboard input.

mod app;
mod camera;
pub mod config;
mod context;
mod error;
mod geom;
mod input;
mod map;
mod render {
    pub mod cull;
}
mod surface;

pub use app::{Flow, Scroller};
pub use camera::{AxisBounds, Camera, CameraBounds};
pub use config::DemoConfig;
pub use context::{InitStep, MacroquadPlatform, Platform, ScopedContext};
pub use error::DemoError;
pub use geom::PixelRect;
pub use input::{Action, InputState, KeyBindings};
pub use map::{TileDraw, TileMap};
pub use render::cull::{visible_tile_range, TileRange};
pub use surface::{load_tile_sheet, MacroquadSurface, Surface, TileSheet};
