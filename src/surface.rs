//! Drawing surfaces and tile sheet loading.

use std::fs;
use std::path::Path;

use macroquad::prelude::*;
use tracing::debug;

use crate::error::DemoError;
use crate::geom::PixelRect;

/// Anything that can serve as a tile sheet: only its pixel size matters here.
pub trait TileSheet {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);
}

impl TileSheet for Texture2D {
    fn size(&self) -> (u32, u32) {
        (self.width() as u32, self.height() as u32)
    }
}

/// Destination for tile draws. Does not present; the frame loop does that.
pub trait Surface {
    /// Texture type the surface can sample from.
    type Texture;

    /// Copy `src` from `sheet` into `dest`. `dest` may extend past the
    /// surface edges; clipping is the surface's job.
    fn draw_tile(&mut self, sheet: &Self::Texture, src: PixelRect, dest: PixelRect);
}

/// The macroquad back buffer. GL clips partially visible tiles.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacroquadSurface;

impl Surface for MacroquadSurface {
    type Texture = Texture2D;

    fn draw_tile(&mut self, sheet: &Texture2D, src: PixelRect, dest: PixelRect) {
        draw_texture_ex(
            sheet,
            dest.x as f32,
            dest.y as f32,
            WHITE,
            DrawTextureParams {
                source: Some(Rect::new(
                    src.x as f32,
                    src.y as f32,
                    src.w as f32,
                    src.h as f32,
                )),
                dest_size: Some(vec2(dest.w as f32, dest.h as f32)),
                ..Default::default()
            },
        );
    }
}

/// Read and decode a tile sheet, then upload it. Needs a live macroquad context.
pub fn load_tile_sheet(path: &Path) -> Result<Texture2D, DemoError> {
    let asset_err = |message: String| DemoError::AssetLoad {
        path: path.display().to_string(),
        message,
    };

    let bytes = fs::read(path).map_err(|e| asset_err(e.to_string()))?;
    let image = Image::from_file_with_format(&bytes, None)
        .map_err(|e| asset_err(format!("{:?}", e)))?;

    let tex = Texture2D::from_image(&image);
    tex.set_filter(FilterMode::Nearest);

    debug!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        "tile sheet loaded"
    );
    Ok(tex)
}
