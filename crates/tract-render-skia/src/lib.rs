// File: crates/tract-render-skia/src/lib.rs
// Summary: Skia renderer crate; paints background, field, bounding box and segment outlines.

pub mod error;
pub mod renderer;
pub mod theme;

pub use error::RenderError;
pub use renderer::{RenderOutcome, RgbaFrame, Scene, SegmentRenderer};
pub use theme::Theme;
