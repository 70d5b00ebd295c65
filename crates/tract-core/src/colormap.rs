// File: crates/tract-core/src/colormap.rs
// Summary: Process-wide 256-entry amplitude color lookup table.

use std::sync::OnceLock;

/// 8-bit RGB triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Number of entries in the lookup table.
pub const LUT_SIZE: usize = 256;

/// "No field" color. Kept off pure white so it never collides with a field color.
pub const FIELD_BACKGROUND: Rgb = Rgb::new(254, 254, 254);

static COLOR_LUT: OnceLock<[Rgb; LUT_SIZE]> = OnceLock::new();

/// Shared lookup table, built on first use and never mutated afterwards.
pub fn color_lut() -> &'static [Rgb; LUT_SIZE] {
    COLOR_LUT.get_or_init(build_lut)
}

// Blue -> cyan -> green -> yellow -> red ramp.
fn build_lut() -> [Rgb; LUT_SIZE] {
    let mut lut = [Rgb::default(); LUT_SIZE];
    for (i, entry) in lut.iter_mut().enumerate() {
        let t = i as f64 / (LUT_SIZE - 1) as f64;
        let r = ramp(4.0 * t - 2.0);
        let g = ramp(2.0 - (4.0 * t - 2.0).abs());
        let b = ramp(2.0 - 4.0 * t);
        *entry = Rgb::new(to_u8(r), to_u8(g), to_u8(b));
    }
    lut
}

#[inline]
fn ramp(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

#[inline]
fn to_u8(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Map a raw field value to a lookup-table index, or `None` for "no field".
///
/// Positive values map to `floor(256 * v / max_amplitude)` clamped into
/// `[1, 255]`; zero, negative and NaN values have no index.
#[inline]
pub fn amplitude_index(value: f64, max_amplitude: f64) -> Option<u8> {
    if value > 0.0 {
        Some((256.0 * value / max_amplitude).floor().clamp(1.0, 255.0) as u8)
    } else {
        None
    }
}

/// Color for a raw field value.
#[inline]
pub fn amplitude_color(value: f64, max_amplitude: f64) -> Rgb {
    match amplitude_index(value, max_amplitude) {
        Some(idx) => color_lut()[idx as usize],
        None => FIELD_BACKGROUND,
    }
}
