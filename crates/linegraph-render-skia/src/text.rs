// File: crates/linegraph-render-skia/src/text.rs
// Summary: Text shaper using Skia textlayout; places label shapes by anchor and baseline.

use linegraph_core::scene::TextShape;
use linegraph_core::text::{TextAnchor, TextStyle as LabelStyle};
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};
use skia_safe as skia;

use crate::to_skia_color;

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(style: &LabelStyle) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(style.font_size.max(1.0));
        ts.set_color(to_skia_color(style.color));
        if style.bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        if style.mono_numeric {
            // Tabular digits keep axis labels aligned.
            ts.set_font_families(&["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"]);
        } else {
            ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        }
        ts
    }

    pub fn layout(&self, text: &str, style: &LabelStyle) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(style));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Paint a text shape whose origin is the baseline anchor point.
    pub fn draw(&self, canvas: &skia::Canvas, shape: &TextShape) {
        let mut p = self.layout(&shape.text, &shape.style);
        let width = p.longest_line();
        let x = match shape.style.anchor {
            TextAnchor::Start => shape.origin.x,
            TextAnchor::Middle => shape.origin.x - width / 2.0,
            TextAnchor::End => shape.origin.x - width,
        };
        // Paragraphs paint from the top-left; approximate the ascent.
        p.paint(canvas, (x, shape.origin.y - shape.style.font_size * 0.8));
    }
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}
