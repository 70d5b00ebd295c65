// File: crates/tract-render-skia/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic bent tube (with and without field) to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use tract_core::{CrossSection, GridField, Point2, RenderOptions, SectionList, Vec2};
use tract_render_skia::{Scene, SegmentRenderer};

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn write_or_compare(path: &std::path::Path, bytes: &[u8]) {
    if bless_mode() {
        if let Some(parent) = path.parent() { std::fs::create_dir_all(parent).ok(); }
        std::fs::write(path, bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), bytes.len());
        return;
    }
    if path.exists() {
        let want = std::fs::read(path).expect("read snapshot");
        let got_img = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "Pixels differ: {}", path.display());
    } else {
        eprintln!("[snapshot] Missing {}; set UPDATE_SNAPSHOTS=1 to bless.", path.display());
    }
}

/// Quarter bend of radius 4 cm split into eight segments with a narrowing contour.
fn bend() -> SectionList {
    let n = 8;
    let step = std::f64::consts::FRAC_PI_2 / n as f64;
    (0..n)
        .map(|i| {
            let a0 = i as f64 * step;
            let a1 = a0 + step;
            let radial = |a: f64| Vec2::new(a.cos(), a.sin());
            let at = |a: f64| Point2::new(4.0 * a.cos(), 4.0 * a.sin());
            CrossSection {
                ctr_line_in: at(a0),
                ctr_line_out: at(a1),
                normal_in: radial(a0),
                normal_out: radial(a1),
                scale_in: 1.0 - 0.05 * i as f64,
                scale_out: 1.0 - 0.05 * (i + 1) as f64,
                contour_y_min: -1.0,
                contour_y_max: 1.0,
            }
        })
        .collect::<Vec<_>>()
        .into()
}

fn render_bytes(show_field: bool) -> Vec<u8> {
    let geometry = bend();
    let field = GridField::from_fn(0.0, 0.0, 0.1, 56, 56, |x, y| ((x * x + y * y).sqrt() - 4.0).cos().max(0.0));
    let opts = RenderOptions { width: 160, height: 160, show_field, ..RenderOptions::default() };
    let scene = Scene::new(&geometry).with_field(&field).with_active_segment(5);
    SegmentRenderer::new(opts).render_to_png_bytes(&scene).expect("render bytes")
}

#[test]
fn golden_segments() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__/segments.png");
    write_or_compare(&path, &render_bytes(false));
}

#[test]
fn golden_segments_with_field() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__/segments_field.png");
    write_or_compare(&path, &render_bytes(true));
}
