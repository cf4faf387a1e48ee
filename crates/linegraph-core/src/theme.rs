// File: crates/linegraph-core/src/theme.rs
// Summary: Light/Dark theming for default graph colors.

use crate::scene::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub grid: Color,
    pub axis_label: Color,
    pub title: Color,
    pub line_stroke: Color,
    pub dot_fill: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::from_argb(255, 18, 18, 20),
            grid: Color::from_argb(255, 40, 40, 45),
            axis_label: Color::from_argb(255, 235, 235, 245),
            title: Color::from_argb(255, 245, 245, 250),
            line_stroke: Color::from_argb(255, 64, 160, 255),
            dot_fill: Color::from_argb(255, 64, 160, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::from_argb(255, 250, 250, 252),
            grid: Color::from_argb(255, 230, 230, 235),
            axis_label: Color::from_argb(255, 20, 20, 30),
            title: Color::from_argb(255, 10, 10, 20),
            line_stroke: Color::from_argb(255, 32, 120, 200),
            dot_fill: Color::from_argb(255, 32, 120, 200),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::dark()
}
