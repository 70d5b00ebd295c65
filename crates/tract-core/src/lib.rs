// File: crates/tract-core/src/lib.rs
// Summary: Core library entry point; exports the view transform, segment geometry, field sampling and picking API.

pub mod types;
pub mod error;
pub mod geometry;
pub mod view;
pub mod colormap;
pub mod field;
pub mod simulation;
pub mod picker;
pub mod options;

pub use types::{Viewport, WorldBoundingBox};
pub use error::ViewError;
pub use geometry::{build_quad, CrossSection, Point2, SegmentQuad, Vec2};
pub use view::ViewTransform;
pub use colormap::{color_lut, Rgb, FIELD_BACKGROUND};
pub use field::{render_field, FieldGrid, FieldImage, GridField, ScalarField};
pub use simulation::{SectionList, TractGeometry};
pub use picker::{pick, pick_segment, SegmentSelection, SelectionEvent, SelectionListener};
pub use options::RenderOptions;
