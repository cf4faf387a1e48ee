// File: crates/linegraph-core/src/scene.rs
// Summary: Renderer-agnostic shape descriptors produced by a render pass.

use std::fmt::Write as _;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::geometry::Point;
use crate::text::TextStyle;

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let h = s.strip_prefix('#').unwrap_or(s);
        let byte = |i: usize| u8::from_str_radix(h.get(i..i + 2)?, 16).ok();
        match h.len() {
            3 => {
                let n = |i: usize| u8::from_str_radix(h.get(i..i + 1)?, 16).ok().map(|v| v * 17);
                Some(Self::rgb(n(0)?, n(1)?, n(2)?))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        let mut s = format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b);
        if self.a != 255 {
            let _ = write!(s, "{:02x}", self.a);
        }
        s
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color `{s}`")))
    }
}

/// Stroke paint; an empty dash list means a solid line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub dash: Vec<f32>,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, width, dash: Vec::new() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
}

/// Sequence of drawing commands, as emitted by a curve.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Path {
    pub commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self { Self::default() }

    pub fn move_to(&mut self, x: f32, y: f32) { self.commands.push(PathCommand::MoveTo(Point::new(x, y))); }
    pub fn line_to(&mut self, x: f32, y: f32) { self.commands.push(PathCommand::LineTo(Point::new(x, y))); }
    pub fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::CubicTo(Point::new(x1, y1), Point::new(x2, y2), Point::new(x, y)));
    }
    /// SVG path data (`d` attribute).
    pub fn to_svg(&self) -> String {
        let mut d = String::new();
        for c in &self.commands {
            let _ = match c {
                PathCommand::MoveTo(p) => write!(d, "M{},{}", p.x, p.y),
                PathCommand::LineTo(p) => write!(d, "L{},{}", p.x, p.y),
                PathCommand::CubicTo(a, b, p) => write!(d, "C{},{},{},{},{},{}", a.x, a.y, b.x, b.y, p.x, p.y),
            };
        }
        d
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineShape {
    pub from: Point,
    pub to: Point,
    pub stroke: Stroke,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PathShape {
    pub path: Path,
    pub stroke: Option<Stroke>,
    pub fill: Option<Color>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CircleShape {
    pub center: Point,
    pub radius: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

/// Text anchored at `origin` (baseline); horizontal alignment comes from the style.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextShape {
    pub text: String,
    pub origin: Point,
    pub style: TextStyle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Shape {
    Line(LineShape),
    Path(PathShape),
    Circle(CircleShape),
    Text(TextShape),
    Group(Vec<Shape>),
}

impl Shape {
    /// Call `f` on this shape and, for groups, every nested shape (depth first).
    pub fn visit<'a>(&'a self, f: &mut dyn FnMut(&'a Shape)) {
        f(self);
        if let Shape::Group(children) = self {
            for c in children { c.visit(f); }
        }
    }
}

/// Output of one render pass, handed to a renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphScene {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    pub shapes: Vec<Shape>,
}

impl GraphScene {
    /// All leaf shapes in paint order.
    pub fn leaves(&self) -> Vec<&Shape> {
        let mut out = Vec::new();
        for s in &self.shapes {
            s.visit(&mut |shape| if !matches!(shape, Shape::Group(_)) { out.push(shape) });
        }
        out
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextShape> {
        self.leaves().into_iter().filter_map(|s| match s {
            Shape::Text(t) => Some(t),
            _ => None,
        })
    }
}
