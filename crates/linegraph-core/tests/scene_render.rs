// File: crates/linegraph-core/tests/scene_render.rs
// Purpose: End-to-end render pass: paint order, curves, dot/line overrides, title and overlays.

use linegraph_core::scene::{CircleShape, PathShape, TextShape};
use linegraph_core::series::from_pairs;
use linegraph_core::{
    AxisConfig, CurveChoice, DotStyle, Frame, GraphError, GraphScene, GuideLineOverlay, LineGraph, LineStyle, Padding,
    Path, PathCommand, Point, ScalePair, ScaleTransform, Shape, StrokeStyle, TextAnchor, TitleBlock,
};

fn graph() -> LineGraph {
    LineGraph::new(from_pairs(&[(0.0, 0.0), (5.0, 8.0), (10.0, 10.0)]))
        .with_size(100.0, 100.0)
        .with_padding(Padding::uniform(0.0))
}

fn paths(scene: &GraphScene) -> Vec<&PathShape> {
    scene.leaves().into_iter().filter_map(|s| match s { Shape::Path(p) => Some(p), _ => None }).collect()
}

fn circles(scene: &GraphScene) -> Vec<&CircleShape> {
    scene.leaves().into_iter().filter_map(|s| match s { Shape::Circle(c) => Some(c), _ => None }).collect()
}

#[test]
fn paint_order_grid_line_dots_labels() {
    let scene = graph().with_y_axis(AxisConfig::y().with_grid(StrokeStyle::Solid)).render().unwrap();
    assert_eq!(scene.width, 100.0);

    let kinds: Vec<&str> = scene
        .shapes
        .iter()
        .map(|s| match s {
            Shape::Group(children) => match children.first() {
                Some(Shape::Line(_)) => "grid",
                Some(Shape::Circle(_)) => "dots",
                Some(Shape::Text(_)) => "labels",
                _ => "other",
            },
            Shape::Path(_) => "line",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["grid", "line", "dots", "labels"]);
    assert_eq!(circles(&scene).len(), 3);
}

#[test]
fn line_follows_projected_points() {
    let scene = graph().render().unwrap();
    let line = paths(&scene)[0];
    assert_eq!(line.path.to_svg(), "M0,100L50,20L100,0");
    assert!(line.stroke.is_some());
}

#[test]
fn named_and_custom_curves() {
    let scene = graph().with_curve(CurveChoice::named("stepAfter").unwrap()).render().unwrap();
    assert_eq!(paths(&scene)[0].path.to_svg(), "M0,100L50,100L50,20L100,20L100,0");

    let reversed = CurveChoice::custom(|pts: &[Point]| {
        let mut p = Path::new();
        for (i, pt) in pts.iter().rev().enumerate() {
            if i == 0 { p.move_to(pt.x, pt.y) } else { p.line_to(pt.x, pt.y) }
        }
        p
    });
    let scene = graph().with_curve(reversed).render().unwrap();
    assert_eq!(paths(&scene)[0].path.commands[0], PathCommand::MoveTo(Point::new(100.0, 0.0)));

    let scene = graph().with_curve(CurveChoice::named("monotoneX").unwrap()).render().unwrap();
    let cmds = &paths(&scene)[0].path.commands;
    assert!(matches!(cmds[0], PathCommand::MoveTo(_)));
    assert!(cmds[1..].iter().all(|c| matches!(c, PathCommand::CubicTo(..))));
}

#[test]
fn element_overrides_replace_default_shapes() {
    let scene = graph()
        .with_dots(DotStyle::element(|p| {
            Some(Shape::Text(TextShape {
                text: format!("#{}", p.index),
                origin: p.pixel,
                style: Default::default(),
            }))
        }))
        .with_line(LineStyle::element(|pts, path| {
            assert_eq!(pts.len(), 3);
            Some(Shape::Group(vec![Shape::Path(PathShape { path: path.clone(), stroke: None, fill: None })]))
        }))
        .render()
        .unwrap();
    assert!(circles(&scene).is_empty());
    assert!(scene.texts().any(|t| t.text == "#2"));
    assert!(paths(&scene)[0].stroke.is_none());
}

#[test]
fn hidden_dots_and_line() {
    let scene = graph().with_dots(DotStyle::Hidden).with_line(LineStyle::Hidden).render().unwrap();
    assert!(circles(&scene).is_empty());
    assert!(paths(&scene).is_empty());
}

#[test]
fn title_sits_in_top_padding() {
    let g = LineGraph::new(from_pairs(&[(0.0, 0.0), (1.0, 1.0)]))
        .with_padding(Padding::new(40.0, 16.0, 48.0, 28.0))
        .with_title(TitleBlock::new("Revenue").with_subtitle("per quarter").with_anchor(TextAnchor::Middle));
    let scene = g.render().unwrap();
    let title = scene.texts().find(|t| t.text == "Revenue").expect("title");
    let sub = scene.texts().find(|t| t.text == "per quarter").expect("subtitle");
    let frame = g.frame();

    assert!(title.style.bold);
    assert_eq!(title.style.anchor, TextAnchor::Middle);
    assert_eq!(title.origin.x, (frame.plot.left + frame.plot.right) / 2.0);
    assert!(title.origin.y < sub.origin.y);
    assert!(sub.origin.y < frame.plot.top);
}

#[test]
fn overlays_draw_last_with_scales() {
    let scene = graph()
        .with_overlay(GuideLineOverlay::new(5.0).with_label("target"))
        .with_overlay(|scales: &ScalePair, frame: &Frame| {
            let x = scales.x.to_px(5.0);
            vec![Shape::Line(linegraph_core::scene::LineShape {
                from: Point::new(x, frame.plot.top),
                to: Point::new(x, frame.plot.bottom),
                stroke: linegraph_core::Stroke::solid(linegraph_core::Color::rgb(0, 0, 0), 1.0),
            })]
        })
        .render()
        .unwrap();

    let n = scene.shapes.len();
    let Shape::Group(guide) = &scene.shapes[n - 2] else { panic!("guide group") };
    match &guide[0] {
        Shape::Line(l) => {
            assert_eq!((l.from.y, l.to.y), (50.0, 50.0));
            assert_eq!((l.from.x, l.to.x), (0.0, 100.0));
            assert_eq!(l.stroke.dash, vec![4.0, 4.0]);
        }
        other => panic!("unexpected {other:?}"),
    }
    let Shape::Group(cb) = &scene.shapes[n - 1] else { panic!("callback group") };
    assert!(matches!(&cb[0], Shape::Line(l) if l.from.x == 50.0));
}

#[test]
fn empty_data_is_an_error() {
    assert!(matches!(LineGraph::new(Vec::new()).render(), Err(GraphError::EmptyData)));
}
