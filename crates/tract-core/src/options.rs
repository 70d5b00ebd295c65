// File: crates/tract-core/src/options.rs
// Summary: Per-frame render options (surface size and layer toggles).

use crate::types::{Viewport, HEIGHT, WIDTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    /// Draw segment outlines, centerline markers and the active highlight.
    pub show_segments: bool,
    /// Draw the color-mapped acoustic field under the outlines.
    pub show_field: bool,
    /// Shade field rows on the rayon pool.
    pub parallel_field: bool,
}

impl RenderOptions {
    pub const fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            show_segments: true,
            show_field: false,
            parallel_field: true,
        }
    }
}
