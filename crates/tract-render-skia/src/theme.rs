// File: crates/tract-render-skia/src/theme.rs
// Summary: Color presets for the segments picture.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub bbox: skia::Color,
    pub outline: skia::Color,
    pub active: skia::Color,
    pub centerline: skia::Color,
    pub label: skia::Color,
}

impl Theme {
    /// Original look: white page, black outlines, red highlight.
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::WHITE,
            bbox: skia::Color::BLACK,
            outline: skia::Color::BLACK,
            active: skia::Color::from_argb(255, 255, 0, 0),
            centerline: skia::Color::from_argb(255, 255, 0, 0),
            label: skia::Color::BLACK,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            bbox: skia::Color::from_argb(255, 110, 110, 120),
            outline: skia::Color::from_argb(255, 220, 220, 230),
            active: skia::Color::from_argb(255, 255, 80, 80),
            centerline: skia::Color::from_argb(255, 255, 200, 60),
            label: skia::Color::from_argb(255, 235, 235, 245),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
