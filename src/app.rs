use macroquad::input::KeyCode;
use tracing::{debug, info};

use crate::camera::{Camera, CameraBounds};
use crate::input::{Action, InputState, KeyBindings};
use crate::map::TileMap;
use crate::surface::Surface;

/// What the frame loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Render and present another frame.
    Continue,
    /// Leave the loop.
    Quit,
}

/// Per-frame state owned by the loop: camera, its limits and the key table.
#[derive(Debug, Clone)]
pub struct Scroller {
    camera: Camera,
    bounds: CameraBounds,
    bindings: KeyBindings,
    view_width: u32,
    view_height: u32,
}

impl Scroller {
    /// Start at the map's center with the default bindings.
    pub fn new<T>(map: &TileMap<T>, view_width: u32, view_height: u32) -> Self {
        let bounds = map.camera_bounds(view_width, view_height);
        let camera = map.center_camera(&bounds);
        debug!(?camera, ?bounds, "scroller ready");
        Scroller {
            camera,
            bounds,
            bindings: KeyBindings::default(),
            view_width,
            view_height,
        }
    }

    /// Replace the key table.
    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Move the camera to `camera`, clamped.
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera.clamped(&self.bounds);
        self
    }

    /// Current camera.
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Current limits.
    pub fn bounds(&self) -> CameraBounds {
        self.bounds
    }

    /// Advance one frame from the full key table. `quit_requested` is the
    /// window-close signal.
    pub fn tick<F>(&mut self, is_down: F, quit_requested: bool) -> Flow
    where
        F: Fn(KeyCode) -> bool,
    {
        let input = InputState::from_key_table(&self.bindings, is_down);
        if quit_requested || input.is_held(Action::Quit) {
            info!(camera = ?self.camera, "quit requested");
            return Flow::Quit;
        }
        self.camera = self.camera.update(&input, &self.bounds, 1);
        Flow::Continue
    }

    /// Draw the map as seen from the current camera.
    pub fn render<T, S>(&self, map: &TileMap<T>, surface: &mut S)
    where
        S: Surface<Texture = T>,
    {
        map.render(surface, self.camera, self.view_width, self.view_height);
    }
}
