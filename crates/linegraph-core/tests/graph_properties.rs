// File: crates/linegraph-core/tests/graph_properties.rs
// Purpose: Scale construction properties: pixel mapping, chart-rect containment, range override, nicing.

use chrono::{TimeZone, Utc};
use linegraph_core::series::from_pairs;
use linegraph_core::{AxisConfig, Datum, LineGraph, Padding, ScaleKind, ScaleTransform, StrokeStyle};

fn wave(n: usize) -> Vec<Datum> {
    (0..n)
        .map(|i| {
            let x = i as f64 * 0.5;
            Datum::xy(x, (x * 0.7).sin() * 12.0 + x * 0.1)
        })
        .collect()
}

#[test]
fn square_example_maps_corners() {
    let graph = LineGraph::new(from_pairs(&[(0.0, 0.0), (10.0, 10.0)]))
        .with_size(100.0, 100.0)
        .with_padding(Padding::uniform(0.0));
    let s = graph.scales().expect("scales");

    assert_eq!(s.x.to_px(0.0), 0.0);
    assert_eq!(s.x.to_px(10.0), 100.0);
    assert_eq!(s.y.to_px(0.0), 100.0);
    assert_eq!(s.y.to_px(10.0), 0.0);
    assert_eq!(s.x.kind(), ScaleKind::Linear);
}

#[test]
fn projected_points_stay_inside_chart_rect() {
    let graph = LineGraph::new(wave(200)).with_size(640.0, 360.0);
    let s = graph.scales().unwrap();
    let plot = graph.frame().plot;
    for p in graph.points(&s) {
        assert!(plot.contains(p.pixel), "point {} at {:?} outside {:?}", p.index, p.pixel, plot);
    }
}

#[test]
fn niced_points_stay_inside_chart_rect() {
    let graph = LineGraph::new(wave(37))
        .with_x_axis(AxisConfig::x().with_nice(true))
        .with_y_axis(AxisConfig::y().with_nice(true));
    let s = graph.scales().unwrap();
    let plot = graph.frame().plot;
    assert!(graph.points(&s).iter().all(|p| plot.contains(p.pixel)));
}

#[test]
fn visible_range_overrides_inferred_domain() {
    let graph = LineGraph::new(from_pairs(&[(0.0, 1.0), (10.0, 3.0)]))
        .with_x_axis(AxisConfig::x().with_range(-5.0, 20.0))
        .with_y_axis(AxisConfig::y().with_range(0.0, 4.0));
    let s = graph.scales().unwrap();
    assert_eq!(s.x.domain(), (-5.0, 20.0));
    assert_eq!(s.y.domain(), (0.0, 4.0));
}

#[test]
fn nice_widens_never_narrows() {
    let data = from_pairs(&[(0.13, -0.37), (9.87, 9.42)]);
    let plain = LineGraph::new(data.clone()).scales().unwrap();
    let niced = LineGraph::new(data)
        .with_x_axis(AxisConfig::x().with_nice(true))
        .with_y_axis(AxisConfig::y().with_nice(true))
        .scales()
        .unwrap();

    for (a, b) in [(plain.x.domain(), niced.x.domain()), (plain.y.domain(), niced.y.domain())] {
        assert!(b.0 <= a.0 && b.1 >= a.1, "{b:?} should contain {a:?}");
    }
    assert_eq!(niced.x.domain(), (0.0, 10.0));
    assert_eq!(niced.y.domain(), (-2.0, 10.0));
}

#[test]
fn single_point_maps_to_midpoint() {
    let graph = LineGraph::new(from_pairs(&[(3.0, 3.0)]))
        .with_size(100.0, 100.0)
        .with_padding(Padding::uniform(0.0));
    let s = graph.scales().unwrap();
    let p = graph.points(&s)[0].pixel;
    assert_eq!((p.x, p.y), (50.0, 50.0));
}

#[test]
fn nan_values_degrade_to_nan_pixels() {
    let graph = LineGraph::new(from_pairs(&[(0.0, 1.0), (1.0, f64::NAN), (2.0, 3.0)]));
    let s = graph.scales().unwrap();
    let pts = graph.points(&s);
    assert!(pts[1].pixel.y.is_nan());
    assert!(pts[0].pixel.is_finite() && pts[2].pixel.is_finite());
}

fn utc_ms(d: u32, h: u32, mi: u32) -> f64 {
    Utc.with_ymd_and_hms(2024, 1, d, h, mi, 0).unwrap().timestamp_millis() as f64
}

fn dated(points: &[((u32, u32, u32), f64)]) -> Vec<Datum> {
    points
        .iter()
        .map(|&((d, h, mi), y)| Datum::new(Utc.with_ymd_and_hms(2024, 1, d, h, mi, 0).unwrap(), y))
        .collect()
}

#[test]
fn time_nice_rounds_to_calendar_boundaries() {
    let data = dated(&[((1, 10, 7), 1.0), ((2, 8, 0), 4.0), ((3, 15, 0), 2.0)]);
    let raw = LineGraph::new(data.clone()).scales().unwrap();
    let niced = LineGraph::new(data).with_x_axis(AxisConfig::x().with_nice(true)).scales().unwrap();

    assert_eq!(niced.x.kind(), ScaleKind::Time);
    assert_eq!(raw.x.domain(), (utc_ms(1, 10, 7), utc_ms(3, 15, 0)));
    assert_eq!(niced.x.domain(), (utc_ms(1, 0, 0), utc_ms(4, 0, 0)));
    let (a, b) = (raw.x.domain(), niced.x.domain());
    assert!(b.0 <= a.0 && b.1 >= a.1);
}

#[test]
fn date_axis_past_the_calendar_renders_without_ticks() {
    let graph = LineGraph::new(dated(&[((1, 0, 0), 1.0), ((2, 0, 0), 3.0)]))
        .with_x_axis(AxisConfig::x().with_range(0.0, 1e19).with_nice(true).with_grid(StrokeStyle::Solid));
    let s = graph.scales().expect("scales");
    assert_eq!(s.x.domain(), (0.0, 1e19));
    assert!(s.x.ticks(5).is_empty());

    let scene = graph.render().expect("render");
    assert!(!scene.shapes.is_empty());
    let (x_ticks, _) = graph.ticks(&s);
    assert!(x_ticks.is_empty());
}
