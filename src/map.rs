use macroquad::prelude::Texture2D;
use tracing::info;

use crate::camera::{Camera, CameraBounds};
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::geom::PixelRect;
use crate::render::cull::{visible_tile_range, TileRange};
use crate::surface::{load_tile_sheet, Surface, TileSheet};

/// One tile blit: grid cell, sheet source and viewport destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileDraw {
    /// Grid column.
    pub col: u32,
    /// Grid row.
    pub row: u32,
    /// Source rectangle in the tile sheet.
    pub src: PixelRect,
    /// Destination rectangle on the surface, unclipped.
    pub dest: PixelRect,
}

/// A fixed grid of square tiles drawn from one tile sheet.
///
/// Grid metadata never changes after construction, so rendering is a pure
/// function of the camera and viewport.
pub struct TileMap<T> {
    sheet: T,
    sheet_cols: u32,
    sheet_tiles: u32,
    tile_size: u32,
    columns: u32,
    rows: u32,
    width: i32,
    height: i32,
    cells: Option<Vec<u32>>,
}

impl TileMap<Texture2D> {
    /// Load the tile sheet named in `config` and build the map over it.
    pub fn load(config: &DemoConfig) -> Result<Self, DemoError> {
        let sheet = load_tile_sheet(&config.tile_sheet)?;
        let map = TileMap::new(sheet, config.columns, config.rows, config.tile_size)?;
        match &config.cells {
            Some(cells) => map.with_cells(cells.clone()),
            None => Ok(map),
        }
    }
}

impl<T: TileSheet> TileMap<T> {
    /// Every cell shows tile 0 of `sheet` until [`TileMap::with_cells`] says otherwise.
    pub fn new(sheet: T, columns: u32, rows: u32, tile_size: u32) -> Result<Self, DemoError> {
        if columns == 0 || rows == 0 || tile_size == 0 {
            return Err(DemoError::InvalidGrid(format!(
                "{}x{} tiles of {}px",
                columns, rows, tile_size
            )));
        }

        let extent = |count: u32| {
            count
                .checked_mul(tile_size)
                .and_then(|px| i32::try_from(px).ok())
                .ok_or_else(|| {
                    DemoError::InvalidGrid(format!("{} tiles of {}px overflow", count, tile_size))
                })
        };
        let width = extent(columns)?;
        let height = extent(rows)?;

        let (sheet_w, sheet_h) = sheet.size();
        let sheet_cols = sheet_w / tile_size;
        let sheet_tiles = sheet_cols * (sheet_h / tile_size);
        if sheet_tiles == 0 {
            return Err(DemoError::InvalidGrid(format!(
                "tile sheet {}x{} is smaller than one {}px tile",
                sheet_w, sheet_h, tile_size
            )));
        }

        info!(columns, rows, tile_size, width, height, sheet_tiles, "tile map ready");

        Ok(Self {
            sheet,
            sheet_cols,
            sheet_tiles,
            tile_size,
            columns,
            rows,
            width,
            height,
            cells: None,
        })
    }

    /// Replace the uniform tile with a row-major grid of sheet ids.
    pub fn with_cells(mut self, cells: Vec<u32>) -> Result<Self, DemoError> {
        let expected = self.columns as usize * self.rows as usize;
        if cells.len() != expected {
            return Err(DemoError::InvalidGrid(format!(
                "{} cells given for a {}x{} grid",
                cells.len(),
                self.columns,
                self.rows
            )));
        }
        if let Some((idx, id)) = cells.iter().enumerate().find(|(_, id)| **id >= self.sheet_tiles) {
            return Err(DemoError::InvalidGrid(format!(
                "cell {} uses tile {} but the sheet holds {}",
                idx, id, self.sheet_tiles
            )));
        }
        self.cells = Some(cells);
        Ok(self)
    }
}

impl<T> TileMap<T> {
    /// Pixels per tile edge.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Grid width in tiles.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Grid height in tiles.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// `columns * tile_size`.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// `rows * tile_size`.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The shared tile sheet.
    pub fn sheet(&self) -> &T {
        &self.sheet
    }

    /// Sheet id shown at `(col, row)`, `None` outside the grid.
    pub fn tile_at(&self, col: u32, row: u32) -> Option<u32> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        match &self.cells {
            Some(cells) => cells.get((row * self.columns + col) as usize).copied(),
            None => Some(0),
        }
    }

    /// Start position: the map's center, kept inside `bounds`.
    pub fn center_camera(&self, bounds: &CameraBounds) -> Camera {
        Camera::new(self.width / 2, self.height / 2).clamped(bounds)
    }

    /// Camera limits for this map seen through a viewport of the given size.
    pub fn camera_bounds(&self, view_width: u32, view_height: u32) -> CameraBounds {
        CameraBounds::new(self.width, self.height, view_width as i32, view_height as i32)
    }

    /// Tiles intersecting the viewport centered on `camera`.
    pub fn visible_range(&self, camera: Camera, view_width: u32, view_height: u32) -> Option<TileRange> {
        let (ox, oy) = camera.top_left(view_width, view_height);
        let view = PixelRect::new(ox, oy, view_width as i32, view_height as i32);
        visible_tile_range(view, self.tile_size, self.columns, self.rows)
    }

    /// Blits for one frame, row-major, each visible tile exactly once.
    pub fn draw_list(&self, camera: Camera, view_width: u32, view_height: u32) -> Vec<TileDraw> {
        let Some(range) = self.visible_range(camera, view_width, view_height) else {
            return Vec::new();
        };

        let (ox, oy) = camera.top_left(view_width, view_height);
        let ts = self.tile_size as i32;

        let mut draws = Vec::with_capacity(range.tile_count());
        for (col, row) in range.iter() {
            let Some(id) = self.tile_at(col, row) else {
                continue;
            };
            draws.push(TileDraw {
                col,
                row,
                src: self.source_rect(id),
                dest: PixelRect::new(
                    (col as i32 * ts).saturating_sub(ox),
                    (row as i32 * ts).saturating_sub(oy),
                    ts,
                    ts,
                ),
            });
        }
        draws
    }

    /// Draw every visible tile onto `surface`. Does not present.
    pub fn render<S>(&self, surface: &mut S, camera: Camera, view_width: u32, view_height: u32)
    where
        S: Surface<Texture = T>,
    {
        for draw in self.draw_list(camera, view_width, view_height) {
            surface.draw_tile(&self.sheet, draw.src, draw.dest);
        }
    }

    #[inline]
    fn source_rect(&self, id: u32) -> PixelRect {
        let ts = self.tile_size as i32;
        let col = (id % self.sheet_cols) as i32;
        let row = (id / self.sheet_cols) as i32;
        PixelRect::new(col * ts, row * ts, ts, ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Sheet(u32, u32);

    impl TileSheet for Sheet {
        fn size(&self) -> (u32, u32) {
            (self.0, self.1)
        }
    }

    fn demo_map() -> TileMap<Sheet> {
        TileMap::new(Sheet(32, 32), 32, 20, 32).unwrap()
    }

    #[test]
    fn extent_is_derived_from_grid() {
        let map = demo_map();
        assert_eq!((map.width(), map.height()), (1024, 640));
    }

    #[test]
    fn aligned_camera_shows_twenty_columns() {
        let map = demo_map();
        // offset (0, 0)
        let range = map.visible_range(Camera::new(320, 160), 640, 320).unwrap();
        assert_eq!(range.columns(), 20);
        assert_eq!(range.rows(), 10);
        assert_eq!(map.draw_list(Camera::new(320, 160), 640, 320).len(), 200);
    }

    #[test]
    fn unaligned_camera_shows_twenty_one_columns() {
        let map = demo_map();
        let range = map.visible_range(Camera::new(321, 160), 640, 320).unwrap();
        assert_eq!(range.columns(), 21);
    }

    #[test]
    fn destinations_are_offset_by_camera() {
        let map = demo_map();
        let draws = map.draw_list(Camera::new(330, 170), 640, 320);
        let first = draws[0];
        assert_eq!((first.col, first.row), (0, 0));
        assert_eq!(first.dest, PixelRect::new(-10, -10, 32, 32));
        assert_eq!(first.src, PixelRect::new(0, 0, 32, 32));
    }

    #[test]
    fn no_tile_is_listed_twice() {
        let map = demo_map();
        let draws = map.draw_list(Camera::new(517, 333), 640, 320);
        let unique: HashSet<_> = draws.iter().map(|d| (d.col, d.row)).collect();
        assert_eq!(unique.len(), draws.len());
    }

    #[test]
    fn cells_select_sheet_regions() {
        let map = TileMap::new(Sheet(64, 64), 2, 1, 32)
            .unwrap()
            .with_cells(vec![3, 1])
            .unwrap();
        let draws = map.draw_list(Camera::new(32, 16), 64, 32);
        assert_eq!(draws[0].src, PixelRect::new(32, 32, 32, 32));
        assert_eq!(draws[1].src, PixelRect::new(32, 0, 32, 32));
    }

    #[test]
    fn error_on_cell_count_mismatch() {
        let err = demo_map().with_cells(vec![0; 3]).err().unwrap();
        assert!(matches!(err, DemoError::InvalidGrid(_)));
    }

    #[test]
    fn error_on_tile_id_outside_sheet() {
        let err = TileMap::new(Sheet(32, 32), 1, 1, 32)
            .unwrap()
            .with_cells(vec![1])
            .err()
            .unwrap();
        assert!(matches!(err, DemoError::InvalidGrid(msg) if msg.contains("tile 1")));
    }

    #[test]
    fn error_on_sheet_smaller_than_tile() {
        let err = TileMap::new(Sheet(16, 16), 4, 4, 32).err().unwrap();
        assert!(matches!(err, DemoError::InvalidGrid(_)));
    }

    #[test]
    fn error_on_empty_grid() {
        assert!(TileMap::new(Sheet(32, 32), 0, 4, 32).is_err());
        assert!(TileMap::new(Sheet(32, 32), 4, 4, 0).is_err());
    }

    #[test]
    fn start_camera_is_map_center() {
        let map = demo_map();
        let bounds = map.camera_bounds(640, 320);
        assert_eq!(map.center_camera(&bounds), Camera::new(512, 320));
    }
}
