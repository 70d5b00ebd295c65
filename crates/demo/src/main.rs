// File: crates/demo/src/main.rs
// Summary: Demo loads cross-sections from CSV (or builds a synthetic tract), renders segment/field PNGs and picks a segment.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use tract_core::{
    CrossSection, GridField, Point2, RenderOptions, SectionList, SegmentSelection, SelectionEvent, TractGeometry,
    Vec2, ViewTransform,
};
use tract_render_skia::{theme, Scene, SegmentRenderer};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Usage: tract-demo [sections.csv] [out_dir] [theme]
    let mut args = std::env::args().skip(1);
    let input = args.next();
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "target/out".to_string()));
    let palette = theme::find(&args.next().unwrap_or_else(|| "light".to_string()));

    let geometry = match input.as_deref() {
        Some(raw) => {
            let path = Path::new(raw);
            let sections = load_sections_csv(path)
                .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            if sections.is_empty() {
                anyhow::bail!("no sections loaded from {} (check headers/delimiter)", path.display());
            }
            info!("Loaded {} sections from {}", sections.len(), path.display());
            sections
        }
        None => {
            let sections = synthetic_tract();
            info!("No input given; using synthetic tract with {} sections", sections.len());
            sections
        }
    };

    let field = synthetic_field(&geometry);
    let opts = RenderOptions { width: 640, height: 640, ..RenderOptions::default() };
    let mut renderer = SegmentRenderer::new(opts).with_theme(palette);

    // Sample pick at the middle of the tract, as a click on its centerline would.
    let mut selection = SegmentSelection::new();
    let target = geometry.len() / 2;
    if let Some(bbox) = geometry.world_bounding_box() {
        let view = ViewTransform::compute(&bbox, opts.viewport())?;
        let s = geometry.cross_section(target)?;
        let mid = Point2::new(
            0.5 * (s.ctr_line_in.x + s.ctr_line_out.x),
            0.5 * (s.ctr_line_in.y + s.ctr_line_out.y),
        );
        let listener = |e: SelectionEvent| info!(?e, "selection changed");
        match selection.pick(view.to_pixel(mid), &view, &geometry, &listener) {
            Some(idx) => info!("Picked segment {idx} (expected {target})"),
            None => warn!("Pick at segment {target} midpoint found nothing"),
        }
    }

    let scene = Scene::new(&geometry)
        .with_field(&field)
        .with_active_segment(selection.active());

    let out_segments = out_dir.join("segments.png");
    renderer.render_to_png(&scene, &out_segments)?;
    info!("Wrote {}", out_segments.display());

    renderer.options.show_field = true;
    let out_field = out_dir.join("segments_field.png");
    renderer.render_to_png(&scene, &out_field)?;
    info!("Wrote {}", out_field.display());

    Ok(())
}

/// Load cross-section descriptors, one row per segment in centerline order.
///
/// Expected headers: ctr_in_x, ctr_in_y, ctr_out_x, ctr_out_y, normal_in_x,
/// normal_in_y, normal_out_x, normal_out_y, scale_in, scale_out, y_min, y_max.
fn load_sections_csv(path: &Path) -> Result<SectionList> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>();

    let idx = |names: &[&str]| -> Result<usize> {
        headers
            .iter()
            .position(|h| names.contains(&h.as_str()))
            .with_context(|| format!("missing column {:?} (headers: {:?})", names, headers))
    };
    let cols = [
        idx(&["ctr_in_x"])?,
        idx(&["ctr_in_y"])?,
        idx(&["ctr_out_x"])?,
        idx(&["ctr_out_y"])?,
        idx(&["normal_in_x"])?,
        idx(&["normal_in_y"])?,
        idx(&["normal_out_x"])?,
        idx(&["normal_out_y"])?,
        idx(&["scale_in"])?,
        idx(&["scale_out"])?,
        idx(&["y_min", "contour_y_min"])?,
        idx(&["y_max", "contour_y_max"])?,
    ];

    let mut out = SectionList::default();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let mut v = [0.0f64; 12];
        for (slot, &col) in v.iter_mut().zip(&cols) {
            let raw = rec.get(col).unwrap_or("");
            *slot = raw
                .parse::<f64>()
                .with_context(|| format!("row {}: bad number {:?} in column {}", row + 1, raw, headers[col]))?;
        }
        out.push(CrossSection {
            ctr_line_in: Point2::new(v[0], v[1]),
            ctr_line_out: Point2::new(v[2], v[3]),
            normal_in: Vec2::new(v[4], v[5]),
            normal_out: Vec2::new(v[6], v[7]),
            scale_in: v[8],
            scale_out: v[9],
            contour_y_min: v[10],
            contour_y_max: v[11],
        });
    }
    Ok(out)
}

/// Rough adult tract: vertical pharynx, quarter bend, horizontal oral cavity.
fn synthetic_tract() -> SectionList {
    let mut centerline = Vec::new();
    for i in 0..=8 {
        centerline.push(Point2::new(0.0, i as f64));
    }
    let bend_radius = 2.5;
    let center = Point2::new(bend_radius, 8.0);
    for k in 1..=6 {
        let a = std::f64::consts::PI - k as f64 * std::f64::consts::FRAC_PI_2 / 6.0;
        centerline.push(center + bend_radius * Vec2::new(a.cos(), a.sin()));
    }
    let end = *centerline.last().unwrap_or(&center);
    for i in 1..=6 {
        centerline.push(Point2::new(end.x + i as f64, end.y));
    }

    // Normals follow the local tangent rotated a quarter turn.
    let n = centerline.len();
    let normal_at = |i: usize| {
        let prev = centerline[i.saturating_sub(1)];
        let next = centerline[(i + 1).min(n - 1)];
        (next - prev).normalized().perp()
    };
    let half_width = |i: usize| {
        let t = i as f64 / (n - 1) as f64;
        0.7 + 0.5 * (t * std::f64::consts::TAU).sin().abs()
    };

    (0..n - 1)
        .map(|i| {
            let hw = half_width(i);
            CrossSection {
                ctr_line_in: centerline[i],
                ctr_line_out: centerline[i + 1],
                normal_in: normal_at(i),
                normal_out: normal_at(i + 1),
                scale_in: 1.0,
                scale_out: half_width(i + 1) / hw,
                contour_y_min: -hw,
                contour_y_max: hw,
            }
        })
        .collect::<Vec<_>>()
        .into()
}

/// Standing-wave-like amplitude, zero outside the tract.
fn synthetic_field(geometry: &SectionList) -> GridField {
    let Some(bbox) = geometry.world_bounding_box() else {
        return GridField::from_fn(0.0, 0.0, 1.0, 0, 0, |_, _| 0.0);
    };
    let spacing = 0.05;
    let nx = (bbox.width() / spacing).ceil() as usize + 1;
    let ny = (bbox.height() / spacing).ceil() as usize + 1;
    GridField::from_fn(bbox.min_x, bbox.min_y, spacing, nx, ny, |x, y| {
        match geometry.find_segment_containing(Point2::new(x, y)) {
            Some(i) => (0.35 * i as f64).cos().abs() * (1.0 + 0.2 * (3.0 * x).sin()),
            None => 0.0,
        }
    })
}
