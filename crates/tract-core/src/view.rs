// File: crates/tract-core/src/view.rs
// Summary: Simulation space <-> device pixel mapping (zoom and origin placement per frame).

use tracing::debug;

use crate::error::ViewError;
use crate::geometry::Point2;
use crate::types::{Viewport, WorldBoundingBox};

/// Margin added around the longest bounding-box side.
pub const VIEW_MARGIN: f64 = 1.1;

/// Per-frame mapping between centimeters (y up) and pixels (y down).
///
/// The world origin lands at `(center_x, center_y)` pixels from the bottom-left
/// corner, proportional to how far the box minimum sits from zero. This is not
/// the center of the bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Pixels per centimeter.
    pub zoom: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub viewport: Viewport,
}

impl ViewTransform {
    /// Derive the transform for one frame.
    pub fn compute(bbox: &WorldBoundingBox, viewport: Viewport) -> Result<Self, ViewError> {
        if viewport.is_empty() {
            return Err(ViewError::EmptyViewport { width: viewport.width, height: viewport.height });
        }
        if !bbox.is_valid() {
            return Err(ViewError::DegenerateBoundingBox {
                min_x: bbox.min_x,
                min_y: bbox.min_y,
                max_x: bbox.max_x,
                max_y: bbox.max_y,
            });
        }

        let w = viewport.width as f64;
        let h = viewport.height as f64;
        let max_length = VIEW_MARGIN * bbox.width().max(bbox.height());
        let zoom = w.min(h) / max_length;
        let center_x = w * bbox.min_x.abs() / bbox.width();
        let center_y = h * bbox.min_y.abs() / bbox.height();

        debug!(
            min_x = bbox.min_x, max_x = bbox.max_x, min_y = bbox.min_y, max_y = bbox.max_y,
            width = viewport.width, height = viewport.height,
            zoom, center_x, center_y,
            "view transform"
        );
        Ok(Self { zoom, center_x, center_y, viewport })
    }

    #[inline]
    fn height_px(&self) -> f64 { self.viewport.height as f64 }

    /// World -> pixel, unrounded.
    #[inline]
    pub fn to_pixel(&self, p: Point2) -> (f64, f64) {
        let px = self.zoom * p.x + self.center_x;
        let py = self.height_px() - (self.zoom * p.y + self.center_y);
        (px, py)
    }

    /// World -> nearest integer pixel.
    #[inline]
    pub fn to_pixel_rounded(&self, p: Point2) -> (i32, i32) {
        let (px, py) = self.to_pixel(p);
        (px.round() as i32, py.round() as i32)
    }

    /// Pixel -> world.
    #[inline]
    pub fn to_world(&self, px: f64, py: f64) -> Point2 {
        Point2::new(
            (px - self.center_x) / self.zoom,
            (self.height_px() - py - self.center_y) / self.zoom,
        )
    }

    /// World X of every pixel column, left to right.
    pub fn column_coords(&self) -> Vec<f64> {
        (0..self.viewport.width)
            .map(|j| (j as f64 - self.center_x) / self.zoom)
            .collect()
    }

    /// World Y of every pixel row, top to bottom (top row is the highest Y).
    pub fn row_coords(&self) -> Vec<f64> {
        let h = self.height_px();
        (0..self.viewport.height)
            .map(|i| (h - i as f64 - self.center_y) / self.zoom)
            .collect()
    }
}
