// File: crates/tract-render-skia/src/renderer.rs
// Summary: Segments picture pipeline (field, bounding box, outlines, highlight) on Skia CPU raster surfaces.

use anyhow::{Context, Result};
use skia_safe as skia;
use tracing::{debug, warn};

use tract_core::{
    render_field, FieldImage, Point2, RenderOptions, ScalarField, SegmentQuad, TractGeometry, ViewTransform,
    WorldBoundingBox,
};

use crate::error::RenderError;
use crate::theme::Theme;

const NO_GEOMETRY_LABEL: &str = "No geometry loaded.";

/// What one frame is made of. The renderer only reads it.
pub struct Scene<'a> {
    pub geometry: &'a dyn TractGeometry,
    pub field: Option<&'a dyn ScalarField>,
    /// Highlighted segment; clamped into range before use.
    pub active_segment: usize,
}

impl<'a> Scene<'a> {
    pub fn new(geometry: &'a dyn TractGeometry) -> Self {
        Self { geometry, field: None, active_segment: 0 }
    }

    pub fn with_field(mut self, field: &'a dyn ScalarField) -> Self {
        self.field = Some(field);
        self
    }

    pub fn with_active_segment(mut self, index: usize) -> Self {
        self.active_segment = index;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Geometry was drawn; `field` tells whether a field layer was painted.
    Drawn { field: bool },
    /// The simulation has no sections; only the placeholder label was drawn.
    NoGeometry,
    /// Degenerate bounding box or viewport; only the background was drawn.
    Skipped,
}

/// RGBA8 (unpremultiplied) pixels read back from the surface.
pub struct RgbaFrame {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub outcome: RenderOutcome,
}

impl RgbaFrame {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y as usize * self.stride + x as usize * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }
}

pub struct SegmentRenderer {
    pub options: RenderOptions,
    pub theme: Theme,
}

impl Default for SegmentRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl SegmentRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options, theme: Theme::default() }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Paint one frame onto `canvas`.
    ///
    /// Degenerate input yields `Ok(RenderOutcome::Skipped)`; only caller
    /// contract violations (bad section index, malformed field grid) are errors.
    pub fn paint(&self, canvas: &skia::Canvas, scene: &Scene<'_>) -> Result<RenderOutcome, RenderError> {
        canvas.clear(self.theme.background);

        // Every layer below reads this one copy, never the live provider.
        let sections = scene.geometry.snapshot()?;
        if sections.is_empty() {
            self.draw_label(canvas, NO_GEOMETRY_LABEL);
            return Ok(RenderOutcome::NoGeometry);
        }

        let Some(bbox) = sections.world_bounding_box() else {
            warn!("geometry has sections but no bounding box; skipping frame");
            return Ok(RenderOutcome::Skipped);
        };
        let view = match ViewTransform::compute(&bbox, self.options.viewport()) {
            Ok(v) => v,
            Err(e) if e.is_degenerate() => {
                warn!(error = %e, "skipping frame");
                return Ok(RenderOutcome::Skipped);
            }
            Err(e) => return Err(e.into()),
        };

        let mut field_drawn = false;
        if self.options.show_field {
            if let Some(field) = scene.field {
                if let Some(img) = render_field(field, &view, self.options.parallel_field)? {
                    field_drawn = blit_field(canvas, &img);
                    if !field_drawn {
                        warn!("failed to upload field pixels");
                    }
                }
            }
        }

        draw_bbox(canvas, &view, &bbox, &stroke(self.theme.bbox, 1.0));

        if self.options.show_segments {
            let outline = stroke(self.theme.outline, 1.0);
            let marker = stroke(self.theme.centerline, 2.0);
            for s in sections.sections() {
                let (cx, cy) = to_px(&view, s.ctr_line_in);
                canvas.draw_circle((cx, cy), 1.0, &marker);
                draw_quad(canvas, &view, &s.quad(), &outline);
            }
            let active = scene.active_segment.min(sections.len() - 1);
            let quad = sections.sections()[active].quad();
            draw_quad(canvas, &view, &quad, &stroke(self.theme.active, 1.0));
        }

        debug!(sections = sections.len(), field = field_drawn, "segments picture painted");
        Ok(RenderOutcome::Drawn { field: field_drawn })
    }

    /// Render into an RGBA8 buffer using a CPU raster surface.
    pub fn render_to_rgba8(&self, scene: &Scene<'_>) -> Result<RgbaFrame, RenderError> {
        let (width, height) = (self.options.width, self.options.height);
        let stride = width as usize * 4;
        if self.options.viewport().is_empty() {
            return Ok(RgbaFrame { pixels: Vec::new(), width, height, stride, outcome: RenderOutcome::Skipped });
        }

        let mut surface = skia::surfaces::raster_n32_premul((width as i32, height as i32))
            .ok_or(RenderError::Surface { width, height })?;
        let outcome = self.paint(surface.canvas(), scene)?;

        let info = rgba_info(width, height);
        let mut pixels = vec![0u8; stride * height as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(RenderError::ReadPixels);
        }
        Ok(RgbaFrame { pixels, width, height, stride, outcome })
    }

    /// Render and encode as PNG in memory.
    pub fn render_to_png_bytes(&self, scene: &Scene<'_>) -> Result<Vec<u8>> {
        let frame = self.render_to_rgba8(scene)?;
        if frame.pixels.is_empty() {
            anyhow::bail!("nothing to encode for a {}x{} viewport", frame.width, frame.height);
        }
        let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.pixels)
            .context("pixel buffer does not match frame size")?;
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .context("encode PNG failed")?;
        Ok(bytes)
    }

    /// Render the picture to a PNG at `output_png_path`.
    pub fn render_to_png(&self, scene: &Scene<'_>, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.render_to_png_bytes(scene)?;
        let path = output_png_path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn draw_label(&self, canvas: &skia::Canvas, text: &str) {
        let mut paint = skia::Paint::default();
        paint.set_color(self.theme.label);
        paint.set_anti_alias(true);
        let mut font = skia::Font::default();
        font.set_size(9.0);
        canvas.draw_str(text, (0.0, 9.0), &font, &paint);
    }
}

// ---- helpers ----------------------------------------------------------------

fn rgba_info(width: u32, height: u32) -> skia::ImageInfo {
    skia::ImageInfo::new(
        (width as i32, height as i32),
        skia::ColorType::RGBA8888,
        skia::AlphaType::Unpremul,
        None,
    )
}

fn stroke(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(false);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint
}

#[inline]
fn to_px(view: &ViewTransform, p: Point2) -> (f32, f32) {
    let (x, y) = view.to_pixel_rounded(p);
    (x as f32, y as f32)
}

fn blit_field(canvas: &skia::Canvas, img: &FieldImage) -> bool {
    let info = rgba_info(img.width, img.height);
    let rgba = img.to_rgba8();
    canvas.write_pixels(&info, &rgba, img.width as usize * 4, (0, 0))
}

fn draw_polyline_closed(canvas: &skia::Canvas, view: &ViewTransform, corners: &[Point2], paint: &skia::Paint) {
    let n = corners.len();
    for i in 0..n {
        let a = to_px(view, corners[i]);
        let b = to_px(view, corners[(i + 1) % n]);
        canvas.draw_line(a, b, paint);
    }
}

fn draw_quad(canvas: &skia::Canvas, view: &ViewTransform, quad: &SegmentQuad, paint: &skia::Paint) {
    draw_polyline_closed(canvas, view, &quad.corners(), paint);
}

fn draw_bbox(canvas: &skia::Canvas, view: &ViewTransform, bbox: &WorldBoundingBox, paint: &skia::Paint) {
    let corners = bbox.corners().map(|(x, y)| Point2::new(x, y));
    draw_polyline_closed(canvas, view, &corners, paint);
}
