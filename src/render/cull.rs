use crate::geom::PixelRect;

/// Inclusive block of tile indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    /// Leftmost visible column.
    pub first_col: u32,
    /// Rightmost visible column.
    pub last_col: u32,
    /// Topmost visible row.
    pub first_row: u32,
    /// Bottom visible row.
    pub last_row: u32,
}

impl TileRange {
    /// Number of columns in the range.
    pub fn columns(&self) -> u32 {
        self.last_col - self.first_col + 1
    }

    /// Number of rows in the range.
    pub fn rows(&self) -> u32 {
        self.last_row - self.first_row + 1
    }

    /// Number of tiles in the range; always at least one.
    pub fn tile_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// `(col, row)` pairs, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> {
        let TileRange { first_col, last_col, first_row, last_row } = *self;
        (first_row..=last_row).flat_map(move |row| (first_col..=last_col).map(move |col| (col, row)))
    }
}

/// Tiles of a `columns × rows` grid whose cells intersect `view` (map space).
/// `None` when the view misses the grid entirely.
pub fn visible_tile_range(view: PixelRect, tile_size: u32, columns: u32, rows: u32) -> Option<TileRange> {
    if view.w <= 0 || view.h <= 0 || tile_size == 0 || columns == 0 || rows == 0 {
        return None;
    }

    let ts = tile_size as i32;
    let (first_col, last_col) = axis_span(view.x, view.w, ts, columns)?;
    let (first_row, last_row) = axis_span(view.y, view.h, ts, rows)?;

    Some(TileRange { first_col, last_col, first_row, last_row })
}

// floor(start / ts) ..= floor((start + len - 1) / ts), clamped to the grid.
// Widened to i64 so views touching the i32 limits cannot overflow.
fn axis_span(start: i32, len: i32, ts: i32, count: u32) -> Option<(u32, u32)> {
    let ts = i64::from(ts);
    let first = i64::from(start).div_euclid(ts);
    let last = (i64::from(start) + i64::from(len) - 1).div_euclid(ts);
    let max = i64::from(count) - 1;

    if last < 0 || first > max {
        return None;
    }
    Some((first.max(0) as u32, last.min(max) as u32))
}
