// File: crates/tract-render-skia/src/error.rs
// Summary: Renderer error type.

use thiserror::Error;
use tract_core::ViewError;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    View(#[from] ViewError),

    #[error("failed to create {width}x{height} raster surface")]
    Surface { width: u32, height: u32 },

    #[error("failed to read back surface pixels")]
    ReadPixels,
}
