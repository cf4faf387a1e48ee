// File: crates/linegraph-core/src/text.rs
// Summary: Text styles and a small composition helper that stacks styled spans into text shapes.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::scene::{Color, TextShape};

/// Line advance as a multiple of font size.
pub const LINE_HEIGHT: f32 = 1.2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TextStyle {
    pub font_size: f32,
    pub color: Color,
    pub anchor: TextAnchor,
    pub bold: bool,
    /// Prefer tabular digits (axis labels).
    pub mono_numeric: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            color: Color::rgb(0, 0, 0),
            anchor: TextAnchor::Start,
            bold: false,
            mono_numeric: false,
        }
    }
}

/// Partial style; `None` fields keep the base value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyleOverride {
    pub font_size: Option<f32>,
    pub color: Option<Color>,
    pub anchor: Option<TextAnchor>,
    pub bold: Option<bool>,
}

impl TextStyle {
    pub fn merged(&self, o: &TextStyleOverride) -> TextStyle {
        TextStyle {
            font_size: o.font_size.unwrap_or(self.font_size),
            color: o.color.unwrap_or(self.color),
            anchor: o.anchor.unwrap_or(self.anchor),
            bold: o.bold.unwrap_or(self.bold),
            mono_numeric: self.mono_numeric,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub style: TextStyleOverride,
}

/// Lines of text stacked downward from an origin, each line its own span.
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedText {
    origin: Point,
    base: TextStyle,
    spans: Vec<TextSpan>,
}

impl ComposedText {
    pub fn new(origin: Point, base: TextStyle) -> Self {
        Self { origin, base, spans: Vec::new() }
    }

    pub fn push(mut self, text: impl Into<String>, style: TextStyleOverride) -> Self {
        self.spans.push(TextSpan { text: text.into(), style });
        self
    }

    /// Baselines advance by each line's own height; empty spans still take their line.
    pub fn layout(&self) -> Vec<TextShape> {
        let mut y = self.origin.y;
        let mut out = Vec::with_capacity(self.spans.len());
        for span in &self.spans {
            let style = self.base.merged(&span.style);
            y += style.font_size;
            if !span.text.is_empty() {
                out.push(TextShape { text: span.text.clone(), origin: Point::new(self.origin.x, y), style });
            }
            y += style.font_size * (LINE_HEIGHT - 1.0);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_merge_over_base() {
        let base = TextStyle { font_size: 12.0, ..TextStyle::default() };
        let o = TextStyleOverride { bold: Some(true), ..Default::default() };
        let m = base.merged(&o);
        assert_eq!(m.font_size, 12.0);
        assert!(m.bold);
    }

    #[test]
    fn lines_stack_down() {
        let shapes = ComposedText::new(Point::new(10.0, 0.0), TextStyle::default())
            .push("Title", TextStyleOverride { font_size: Some(20.0), ..Default::default() })
            .push("sub", TextStyleOverride::default())
            .layout();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].origin, Point::new(10.0, 20.0));
        // 20 * 1.2 for the first line, then the 10px second baseline.
        assert!((shapes[1].origin.y - 34.0).abs() < 1e-4);
    }
}
