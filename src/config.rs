//! Fixed demo constants and the [`DemoConfig`] they seed.

use std::path::PathBuf;

use macroquad::miniquad::conf::Platform;
use macroquad::window::Conf;

/// Pixels per tile edge.
pub const TILE_SIZE: u32 = 32;
/// Tiles per map row.
pub const TILES_IN_ROW: u32 = 32;
/// Tiles per map column.
pub const TILES_IN_COL: u32 = 20;

/// Window title.
pub const WINDOW_TITLE: &str = "Tile Scroll";
/// Window width; narrower than the 1024px map.
pub const WINDOW_WIDTH: u32 = 640;
/// Window height; shorter than the 640px map.
pub const WINDOW_HEIGHT: u32 = 320;

/// Camera movement per frame tick, in pixels.
pub const SCROLL_SPEED: i32 = 1;

/// Tile sheet image, relative to the working directory.
pub const TILE_SHEET: &str = "assets/tile.png";

/// Startup configuration. [`Default`] is built from the constants above and
/// is what the binary runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Window title.
    pub title: String,
    /// Viewport width in pixels.
    pub window_width: u32,
    /// Viewport height in pixels.
    pub window_height: u32,
    /// Pixels per tile edge.
    pub tile_size: u32,
    /// Grid width in tiles.
    pub columns: u32,
    /// Grid height in tiles.
    pub rows: u32,
    /// Path of the tile sheet image.
    pub tile_sheet: PathBuf,
    /// Optional row-major tile ids into the sheet; `None` repeats tile 0.
    pub cells: Option<Vec<u32>>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            title: WINDOW_TITLE.to_owned(),
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            tile_size: TILE_SIZE,
            columns: TILES_IN_ROW,
            rows: TILES_IN_COL,
            tile_sheet: PathBuf::from(TILE_SHEET),
            cells: None,
        }
    }
}

impl DemoConfig {
    /// Macroquad window settings: fixed size, one surface pixel per map pixel,
    /// presentation synced to vblank.
    pub fn window_conf(&self) -> Conf {
        Conf {
            window_title: self.title.clone(),
            window_width: self.window_width as i32,
            window_height: self.window_height as i32,
            high_dpi: false,
            window_resizable: false,
            platform: Platform {
                swap_interval: Some(1),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
