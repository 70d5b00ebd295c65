// File: crates/tract-core/src/field.rs
// Summary: Scalar field interface, regular-grid reference field, and pixel-grid resampling to RGB.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::colormap::{amplitude_color, Rgb};
use crate::error::ViewError;
use crate::view::ViewTransform;

/// Acoustic field supplied by the simulation.
pub trait ScalarField {
    /// False when no field has been computed yet.
    fn has_field(&self) -> bool;

    /// Normalization amplitude for the color mapping.
    fn max_amplitude(&self) -> f64;

    /// Evaluate the field on the tensor grid `ys x xs`.
    /// Row `i` of the result corresponds to `ys[i]`, column `j` to `xs[j]`.
    fn interpolate(&self, xs: &[f64], ys: &[f64]) -> FieldGrid;
}

/// Row-major grid of field values.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldGrid {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl FieldGrid {
    pub fn from_vec(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, ViewError> {
        let expected = rows * cols;
        if values.len() != expected {
            return Err(ViewError::FieldShapeMismatch { expected, actual: values.len() });
        }
        Ok(Self { rows, cols, values })
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                values.push(f(i, j));
            }
        }
        Self { rows, cols, values }
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn values(&self) -> &[f64] { &self.values }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols { Some(self.values[row * self.cols + col]) } else { None }
    }
}

/// Field sampled on a regular grid, bilinearly interpolated.
///
/// Node `(ix, iy)` sits at `(origin_x + ix * spacing, origin_y + iy * spacing)`;
/// `values` is stored row by row along Y. Queries outside the grid return 0.
#[derive(Clone, Debug)]
pub struct GridField {
    origin_x: f64,
    origin_y: f64,
    spacing: f64,
    nx: usize,
    ny: usize,
    values: Vec<f64>,
    max_amplitude: f64,
}

impl GridField {
    pub fn new(origin_x: f64, origin_y: f64, spacing: f64, nx: usize, ny: usize, values: Vec<f64>) -> Result<Self, ViewError> {
        let expected = nx * ny;
        if values.len() != expected {
            return Err(ViewError::FieldShapeMismatch { expected, actual: values.len() });
        }
        let max_amplitude = values.iter().copied().filter(|v| v.is_finite()).fold(0.0f64, f64::max);
        Ok(Self { origin_x, origin_y, spacing, nx, ny, values, max_amplitude })
    }

    /// Sample `f(x, y)` on the grid nodes.
    pub fn from_fn(origin_x: f64, origin_y: f64, spacing: f64, nx: usize, ny: usize, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut values = Vec::with_capacity(nx * ny);
        for iy in 0..ny {
            let y = origin_y + iy as f64 * spacing;
            for ix in 0..nx {
                values.push(f(origin_x + ix as f64 * spacing, y));
            }
        }
        let max_amplitude = values.iter().copied().filter(|v| v.is_finite()).fold(0.0f64, f64::max);
        Self { origin_x, origin_y, spacing, nx, ny, values, max_amplitude }
    }

    /// Override the normalization amplitude.
    pub fn with_max_amplitude(mut self, max_amplitude: f64) -> Self {
        self.max_amplitude = max_amplitude;
        self
    }

    pub fn value_at(&self, x: f64, y: f64) -> f64 {
        if self.nx == 0 || self.ny == 0 || !(self.spacing > 0.0) {
            return 0.0;
        }
        let fx = (x - self.origin_x) / self.spacing;
        let fy = (y - self.origin_y) / self.spacing;
        let last_x = (self.nx - 1) as f64;
        let last_y = (self.ny - 1) as f64;
        if !(fx >= 0.0 && fx <= last_x && fy >= 0.0 && fy <= last_y) {
            return 0.0;
        }
        let ix0 = (fx.floor() as usize).min(self.nx - 1);
        let iy0 = (fy.floor() as usize).min(self.ny - 1);
        let ix1 = (ix0 + 1).min(self.nx - 1);
        let iy1 = (iy0 + 1).min(self.ny - 1);
        let wx = fx - ix0 as f64;
        let wy = fy - iy0 as f64;
        let at = |ix: usize, iy: usize| self.values[iy * self.nx + ix];
        at(ix0, iy0) * (1.0 - wx) * (1.0 - wy)
            + at(ix1, iy0) * wx * (1.0 - wy)
            + at(ix0, iy1) * (1.0 - wx) * wy
            + at(ix1, iy1) * wx * wy
    }
}

impl ScalarField for GridField {
    fn has_field(&self) -> bool { !self.values.is_empty() }

    fn max_amplitude(&self) -> f64 { self.max_amplitude }

    fn interpolate(&self, xs: &[f64], ys: &[f64]) -> FieldGrid {
        FieldGrid::from_fn(ys.len(), xs.len(), |i, j| self.value_at(xs[j], ys[i]))
    }
}

/// RGB pixel grid, row-major, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgb>,
}

impl FieldImage {
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Opaque RGBA8 bytes, stride `width * 4`.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            out.extend_from_slice(&[p.r, p.g, p.b, 255]);
        }
        out
    }
}

/// Resample `field` onto the transform's pixel grid.
///
/// Pixel world coordinates are computed once per column and row and
/// handed to the field in a single interpolation call. Returns `Ok(None)` when
/// there is no field to draw. Color mapping runs per row on the rayon pool
/// when `parallel` is set; the output is identical either way.
pub fn render_field<F: ScalarField + ?Sized>(
    field: &F,
    transform: &ViewTransform,
    parallel: bool,
) -> Result<Option<FieldImage>, ViewError> {
    let viewport = transform.viewport;
    if viewport.is_empty() {
        return Err(ViewError::EmptyViewport { width: viewport.width, height: viewport.height });
    }
    if !field.has_field() {
        return Ok(None);
    }
    let max_amp = field.max_amplitude();
    if !(max_amp > 0.0 && max_amp.is_finite()) {
        warn!(max_amp, "field maximum is not positive; drawing no field");
        return Ok(None);
    }

    let xs = transform.column_coords();
    let ys = transform.row_coords();
    let grid = field.interpolate(&xs, &ys);
    if grid.rows() != ys.len() || grid.cols() != xs.len() {
        return Err(ViewError::FieldShapeMismatch {
            expected: viewport.pixel_count(),
            actual: grid.values().len(),
        });
    }

    let width = viewport.width as usize;
    let mut pixels = vec![Rgb::default(); viewport.pixel_count()];
    let shade_row = |(out, vals): (&mut [Rgb], &[f64])| {
        for (px, &v) in out.iter_mut().zip(vals) {
            *px = amplitude_color(v, max_amp);
        }
    };
    if parallel {
        pixels.par_chunks_mut(width).zip(grid.values().par_chunks(width)).for_each(shade_row);
    } else {
        pixels.chunks_mut(width).zip(grid.values().chunks(width)).for_each(shade_row);
    }
    debug!(width = viewport.width, height = viewport.height, parallel, "field sampled");

    Ok(Some(FieldImage { width: viewport.width, height: viewport.height, pixels }))
}
