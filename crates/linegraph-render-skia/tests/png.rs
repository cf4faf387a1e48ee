// File: crates/linegraph-render-skia/tests/png.rs
// Purpose: Render smoke tests: PNG bytes decode to the scene size, files are written, RGBA buffer shape.

use linegraph_core::series::from_pairs;
use linegraph_core::{AxisConfig, GuideLineOverlay, LineGraph, StrokeStyle, Theme, TitleBlock};
use linegraph_render_skia::SkiaRenderer;

fn graph() -> LineGraph {
    LineGraph::new(from_pairs(&[(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.5), (4.0, 2.5)]))
        .with_size(240.0, 160.0)
        .with_x_axis(AxisConfig::x().with_grid(StrokeStyle::Dotted))
        .with_y_axis(AxisConfig::y().with_grid(StrokeStyle::Dashed).with_nice(true))
        .with_title(TitleBlock::new("Smoke"))
        .with_overlay(GuideLineOverlay::new(2.0))
}

#[test]
fn png_bytes_decode_to_scene_size() {
    let scene = graph().render().expect("scene");
    let bytes = SkiaRenderer::new().render_png_bytes(&scene).expect("png bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let img = image::load_from_memory(&bytes).expect("decode png");
    assert_eq!((img.width(), img.height()), (240, 160));
}

#[test]
fn png_file_written() {
    let scene = graph().render().unwrap();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    SkiaRenderer::without_text().render_to_png(&scene, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
}

#[test]
fn rgba_buffer_has_background() {
    let scene = graph().with_theme(Theme::dark()).render().unwrap();
    let (px, w, h, stride) = SkiaRenderer::without_text().render_to_rgba8(&scene).expect("rgba render");
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, w as usize * 4);
    // Top-left corner lies in the padding: background only.
    let bg = Theme::dark().background;
    assert_eq!(&px[0..4], &[bg.r, bg.g, bg.b, 255]);
}
