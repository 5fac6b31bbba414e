use crate::config::SCROLL_SPEED;
use crate::input::InputState;

/// Viewport center in map pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Camera {
    /// Horizontal center.
    pub x: i32,
    /// Vertical center.
    pub y: i32,
}

/// Closed interval a camera coordinate may take on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisBounds {
    /// Smallest allowed value.
    pub min: i32,
    /// Largest allowed value.
    pub max: i32,
}

impl AxisBounds {
    /// Keeps a `view`-wide window inside `[0, extent]`. When the map is
    /// narrower than the view the camera is pinned to the map center.
    pub fn new(extent: i32, view: i32) -> Self {
        if extent >= view {
            AxisBounds { min: view / 2, max: extent - view / 2 }
        } else {
            AxisBounds { min: extent / 2, max: extent / 2 }
        }
    }

    /// Pull `v` into the interval.
    #[inline]
    pub fn clamp(&self, v: i32) -> i32 {
        v.clamp(self.min, self.max)
    }
}

/// Per-axis camera limits for a map and viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraBounds {
    /// Horizontal limits.
    pub x: AxisBounds,
    /// Vertical limits.
    pub y: AxisBounds,
}

impl CameraBounds {
    /// Limits for a `map_width × map_height` map seen through a
    /// `view_width × view_height` viewport.
    pub fn new(map_width: i32, map_height: i32, view_width: i32, view_height: i32) -> Self {
        CameraBounds {
            x: AxisBounds::new(map_width, view_width),
            y: AxisBounds::new(map_height, view_height),
        }
    }
}

impl Camera {
    /// Camera centered on `(x, y)`.
    pub const fn new(x: i32, y: i32) -> Self {
        Camera { x, y }
    }

    /// Top-left visible pixel for a viewport centered on the camera.
    /// Saturates at the `i32` limits.
    #[inline]
    pub fn top_left(&self, view_width: u32, view_height: u32) -> (i32, i32) {
        // u32::MAX / 2 == i32::MAX, so the halves always fit
        (
            self.x.saturating_sub((view_width / 2) as i32),
            self.y.saturating_sub((view_height / 2) as i32),
        )
    }

    /// Same camera pulled inside `bounds`.
    pub fn clamped(self, bounds: &CameraBounds) -> Camera {
        Camera {
            x: bounds.x.clamp(self.x),
            y: bounds.y.clamp(self.y),
        }
    }

    /// Advance by `dt` frame ticks of held movement, then clamp.
    pub fn update(self, input: &InputState, bounds: &CameraBounds, dt: u32) -> Camera {
        let step = SCROLL_SPEED.saturating_mul(dt.min(i32::MAX as u32) as i32);
        Camera {
            x: self.x.saturating_add(input.horizontal() * step),
            y: self.y.saturating_add(input.vertical() * step),
        }
        .clamped(bounds)
    }
}
