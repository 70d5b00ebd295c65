// File: crates/tract-core/src/types.rs
// Summary: Shared types and constants (viewport size, world bounding box).

/// Default viewport width in pixels.
pub const WIDTH: u32 = 640;
/// Default viewport height in pixels.
pub const HEIGHT: u32 = 640;

/// Device surface size, in pixels.
/// Contract: non-negative by type; a zero dimension yields a no-op render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
    pub const fn is_empty(&self) -> bool { self.width == 0 || self.height == 0 }
    pub const fn pixel_count(&self) -> usize { self.width as usize * self.height as usize }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

/// Sagittal-plane bounding box of the tract geometry, in centimeters (y up).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl WorldBoundingBox {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn width(&self) -> f64 { self.max_x - self.min_x }
    pub fn height(&self) -> f64 { self.max_y - self.min_y }

    /// Both extents strictly positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0 && self.width().is_finite() && self.height().is_finite()
    }

    /// Grow the box so that it covers `(x, y)`.
    pub fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Corners in outline order: bottom-left, bottom-right, top-right, top-left.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.min_x, self.min_y),
            (self.max_x, self.min_y),
            (self.max_x, self.max_y),
            (self.min_x, self.max_y),
        ]
    }
}
