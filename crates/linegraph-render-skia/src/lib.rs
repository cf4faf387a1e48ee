// File: crates/linegraph-render-skia/src/lib.rs
// Summary: Headless Skia renderer turning a GraphScene into PNG bytes, files or RGBA buffers.

use anyhow::{anyhow, Context, Result};
use linegraph_core::scene::{CircleShape, GraphScene, LineShape, PathCommand, PathShape, Shape, Stroke};
use linegraph_core::Color;
use skia_safe as skia;
use tracing::{debug, trace};

pub mod text;

pub use text::TextShaper;

pub(crate) fn to_skia_color(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn stroke_paint(stroke: &Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(to_skia_color(stroke.color));
    paint.set_anti_alias(true);
    paint.set_stroke_width(stroke.width);
    paint.set_style(skia::paint::Style::Stroke);
    if !stroke.dash.is_empty() {
        paint.set_path_effect(skia::PathEffect::dash(&stroke.dash, 0.0));
    }
    paint
}

fn fill_paint(color: Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(to_skia_color(color));
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint
}

fn to_skia_path(commands: &[PathCommand]) -> skia::Path {
    let mut path = skia::Path::new();
    for c in commands {
        match *c {
            PathCommand::MoveTo(p) => { path.move_to((p.x, p.y)); }
            PathCommand::LineTo(p) => { path.line_to((p.x, p.y)); }
            PathCommand::CubicTo(a, b, p) => { path.cubic_to((a.x, a.y), (b.x, b.y), (p.x, p.y)); }
        }
    }
    path
}

/// CPU raster renderer for graph scenes.
pub struct SkiaRenderer {
    shaper: TextShaper,
    /// Skip text shapes; keeps output independent of installed fonts.
    pub draw_text: bool,
}

impl SkiaRenderer {
    pub fn new() -> Self { Self { shaper: TextShaper::new(), draw_text: true } }

    pub fn without_text() -> Self { Self { draw_text: false, ..Self::new() } }

    fn surface(scene: &GraphScene) -> Result<skia::Surface> {
        let w = scene.width.ceil() as i32;
        let h = scene.height.ceil() as i32;
        if w <= 0 || h <= 0 {
            return Err(anyhow!("scene size must be positive, got {}x{}", scene.width, scene.height));
        }
        skia::surfaces::raster_n32_premul((w, h)).ok_or_else(|| anyhow!("failed to create {w}x{h} raster surface"))
    }

    /// Paint every shape in order onto `canvas`.
    pub fn paint(&self, canvas: &skia::Canvas, scene: &GraphScene) {
        canvas.clear(to_skia_color(scene.background));
        for shape in &scene.shapes {
            self.paint_shape(canvas, shape);
        }
    }

    fn paint_shape(&self, canvas: &skia::Canvas, shape: &Shape) {
        match shape {
            Shape::Line(LineShape { from, to, stroke }) => {
                canvas.draw_line((from.x, from.y), (to.x, to.y), &stroke_paint(stroke));
            }
            Shape::Path(PathShape { path, stroke, fill }) => {
                let sk = to_skia_path(&path.commands);
                if let Some(fill) = fill {
                    canvas.draw_path(&sk, &fill_paint(*fill));
                }
                if let Some(stroke) = stroke {
                    canvas.draw_path(&sk, &stroke_paint(stroke));
                }
            }
            Shape::Circle(CircleShape { center, radius, fill, stroke }) => {
                if let Some(fill) = fill {
                    canvas.draw_circle((center.x, center.y), *radius, &fill_paint(*fill));
                }
                if let Some(stroke) = stroke {
                    canvas.draw_circle((center.x, center.y), *radius, &stroke_paint(stroke));
                }
            }
            Shape::Text(t) => {
                if self.draw_text && !t.text.is_empty() {
                    self.shaper.draw(canvas, t);
                }
            }
            Shape::Group(children) => {
                for c in children { self.paint_shape(canvas, c); }
            }
        }
    }

    fn rasterize(&self, scene: &GraphScene) -> Result<skia::Surface> {
        let mut surface = Self::surface(scene)?;
        self.paint(surface.canvas(), scene);
        trace!(shapes = scene.shapes.len(), "scene painted");
        Ok(surface)
    }

    /// Encode the scene as PNG bytes.
    pub fn render_png_bytes(&self, scene: &GraphScene) -> Result<Vec<u8>> {
        let mut surface = self.rasterize(scene)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        debug!(bytes = data.len(), "png encoded");
        Ok(data.as_bytes().to_vec())
    }

    /// Render to a PNG file, creating parent directories as needed.
    pub fn render_to_png(&self, scene: &GraphScene, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_png_bytes(scene)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Unpremultiplied RGBA pixels as `(pixels, width, height, stride)`.
    pub fn render_to_rgba8(&self, scene: &GraphScene) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.rasterize(scene)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut px = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut px, stride, (0, 0)) {
            return Err(anyhow!("reading back surface pixels failed"));
        }
        Ok((px, w as u32, h as u32, stride))
    }
}

impl Default for SkiaRenderer {
    fn default() -> Self { Self::new() }
}
