// File: crates/linegraph-core/tests/axis_ticks.rs
// Purpose: Tick placement, label text, offsets and the gridlines derived from ticks.

use chrono::{TimeZone, Utc};
use linegraph_core::series::from_pairs;
use linegraph_core::{
    AxisConfig, AxisLabel, Datum, GridExtend, LabelOffset, LineGraph, NumberFormat, Padding, ScaleTransform,
    StrokeStyle, TickFormat,
};

fn square(data: &[(f64, f64)]) -> LineGraph {
    LineGraph::new(from_pairs(data)).with_size(100.0, 100.0).with_padding(Padding::uniform(0.0))
}

#[test]
fn auto_labels_follow_tick_step() {
    let graph = LineGraph::new(from_pairs(&[(0.0, 0.0), (1.0, 1000.0)]));
    let s = graph.scales().unwrap();
    let (x, y) = graph.ticks(&s);
    let xs: Vec<&str> = x.iter().map(|t| t.text.as_str()).collect();
    let ys: Vec<&str> = y.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(xs, ["0.0", "0.2", "0.4", "0.6", "0.8", "1.0"]);
    assert_eq!(ys, ["0", "200", "400", "600", "800", "1,000"]);
}

#[test]
fn gridlines_cross_axis_at_tick_position() {
    let graph = square(&[(0.0, 0.0), (10.0, 10.0)])
        .with_x_axis(AxisConfig::x().with_grid(StrokeStyle::Solid))
        .with_y_axis(AxisConfig::y().with_grid(StrokeStyle::Dashed));
    let s = graph.scales().unwrap();
    let (x, y) = graph.ticks(&s);
    assert!(!x.is_empty() && !y.is_empty());

    for t in &x {
        let g = t.gridline.as_ref().expect("x gridline");
        assert_eq!(g.start.pixel.x, t.position);
        assert_eq!(g.end.pixel.x, t.position);
        assert_eq!(g.start.pixel.y, 100.0);
        assert_eq!(g.end.pixel.y, 0.0);
        assert!(g.stroke.dash.is_empty());
    }
    for t in &y {
        let g = t.gridline.as_ref().expect("y gridline");
        assert_eq!(g.start.pixel.y, t.position);
        assert_eq!(g.end.pixel.y, t.position);
        assert_eq!(g.stroke.dash, vec![4.0, 4.0]);
        assert_eq!(s.y.to_px(t.value.as_f64()), t.position);
    }
}

#[test]
fn gridline_extension_and_domain_ends() {
    let mut x_axis = AxisConfig::x().with_grid(StrokeStyle::Dotted);
    x_axis.grid.extend = GridExtend { start: 5.0, end: 3.0 };
    let graph = square(&[(0.0, 0.0), (10.0, 10.0)]).with_x_axis(x_axis);
    let s = graph.scales().unwrap();
    let (x, _) = graph.ticks(&s);
    let g = x[0].gridline.as_ref().unwrap();

    assert_eq!(g.start.pixel.y, 105.0);
    assert_eq!(g.end.pixel.y, -3.0);
    assert!((g.start.domain.1.as_f64() - -0.5).abs() < 1e-6);
    assert!((g.end.domain.1.as_f64() - 10.3).abs() < 1e-4);
    assert_eq!(g.stroke.dash, vec![1.0, 2.0]);
}

#[test]
fn no_gridlines_by_default() {
    let graph = square(&[(0.0, 0.0), (10.0, 10.0)]);
    let s = graph.scales().unwrap();
    let (x, y) = graph.ticks(&s);
    assert!(x.iter().chain(&y).all(|t| t.gridline.is_none()));
}

#[test]
fn explicit_labels_and_text() {
    let graph = square(&[(0.0, 0.0), (10.0, 10.0)]).with_x_axis(AxisConfig::x().with_labels(vec![
        AxisLabel::with_text(0.0, "start"),
        AxisLabel::new(5.0),
        AxisLabel::with_text(10.0, "end"),
    ]));
    let s = graph.scales().unwrap();
    let (x, _) = graph.ticks(&s);
    let texts: Vec<&str> = x.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["start", "5", "end"]);
    assert_eq!(x[1].position, 50.0);
}

#[test]
fn static_and_computed_offsets() {
    let graph = square(&[(0.0, 0.0), (10.0, 10.0)])
        .with_y_axis(AxisConfig::y().with_offset(LabelOffset::computed(|_, i| (-2.0, i as f32))));
    let s = graph.scales().unwrap();
    let (x, y) = graph.ticks(&s);
    for t in &x {
        assert_eq!(t.origin.x, t.position);
        assert_eq!(t.origin.y, 100.0 + 14.0);
    }
    for (i, t) in y.iter().enumerate() {
        assert_eq!(t.origin.x, -2.0);
        assert_eq!(t.origin.y, t.position + i as f32);
    }
}

#[test]
fn explicit_number_and_custom_formats() {
    let graph = square(&[(0.0, 0.0), (1.0, 1.0)])
        .with_x_axis(AxisConfig::x().with_count(2).with_format(TickFormat::Number(NumberFormat::parse(".0%").unwrap())))
        .with_y_axis(AxisConfig::y().with_count(2).with_format(TickFormat::custom(|v| format!("<{}>", v.as_f64()))));
    let s = graph.scales().unwrap();
    let (x, y) = graph.ticks(&s);
    assert_eq!(x.iter().map(|t| t.text.clone()).collect::<Vec<_>>(), ["0%", "50%", "100%"]);
    assert_eq!(y[0].text, "<0>");
}

#[test]
fn time_axis_uses_calendar_labels() {
    let data: Vec<Datum> = (0..8)
        .map(|d| Datum::new(Utc.with_ymd_and_hms(2024, 1, 1 + d, 0, 0, 0).unwrap(), d as f64))
        .collect();
    let graph = LineGraph::new(data);
    let s = graph.scales().unwrap();
    let (x, _) = graph.ticks(&s);
    let (d0, d1) = s.x.domain();

    assert!(x.len() >= 4 && x.len() <= 10, "{} ticks", x.len());
    assert!(x.iter().all(|t| (d0..=d1).contains(&t.value.as_f64())));
    assert_eq!(x[0].text, "2024");
    assert!(x.iter().all(|t| !t.text.is_empty()));
}

#[test]
fn time_axis_strftime_format() {
    let data = vec![
        Datum::new(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(), 1.0),
        Datum::new(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap(), 2.0),
    ];
    let graph = LineGraph::new(data).with_x_axis(AxisConfig::x().with_format(TickFormat::Time("%m/%d".into())));
    let s = graph.scales().unwrap();
    let (x, _) = graph.ticks(&s);
    assert_eq!(x[0].text, "03/01");
}
