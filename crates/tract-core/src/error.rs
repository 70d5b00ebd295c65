// File: crates/tract-core/src/error.rs
// Summary: Error taxonomy for view computation, geometry access and field sampling.

use thiserror::Error;

/// Errors raised by the core.
///
/// `DegenerateBoundingBox` and `EmptyViewport` are per-frame conditions: the
/// render entry point turns them into a skipped frame. The remaining variants
/// are caller contract violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    #[error("bounding box has no extent: x [{min_x}, {max_x}], y [{min_y}, {max_y}]")]
    DegenerateBoundingBox { min_x: f64, min_y: f64, max_x: f64, max_y: f64 },

    #[error("viewport has zero area ({width}x{height})")]
    EmptyViewport { width: u32, height: u32 },

    #[error("section index {index} out of range (section count {count})")]
    SectionOutOfRange { index: usize, count: usize },

    #[error("field grid shape mismatch: expected {expected} values, got {actual}")]
    FieldShapeMismatch { expected: usize, actual: usize },
}

impl ViewError {
    /// True for conditions that only mean "nothing to draw this frame".
    pub fn is_degenerate(&self) -> bool {
        matches!(self, ViewError::DegenerateBoundingBox { .. } | ViewError::EmptyViewport { .. })
    }
}
