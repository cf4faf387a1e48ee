// File: crates/linegraph-core/src/curve.rs
// Summary: Curve interpolation strategies turning projected points into a path.

use std::fmt;

use crate::error::{GraphError, Result};
use crate::geometry::Point;
use crate::scene::Path;

const EPSILON: f64 = 1e-12;

/// Built-in interpolation strategies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    Linear,
    /// Horizontal steps changing at the midpoint between points.
    Step,
    /// Vertical change first, then horizontal.
    StepBefore,
    /// Horizontal first, then vertical change.
    StepAfter,
    /// Cubic B-spline; passes through the end points only.
    Basis,
    Cardinal { tension: f32 },
    CatmullRom { alpha: f32 },
    /// Monotone in x; preserves monotonicity of y.
    MonotoneX,
    /// Natural cubic spline (second derivative zero at the ends).
    Natural,
}

impl Curve {
    /// Look up a curve by name; case, `-` and `_` are ignored.
    pub fn from_name(name: &str) -> Result<Curve> {
        let key: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let curve = match key.as_str() {
            "linear" => Curve::Linear,
            "step" => Curve::Step,
            "stepbefore" => Curve::StepBefore,
            "stepafter" => Curve::StepAfter,
            "basis" => Curve::Basis,
            "cardinal" => Curve::Cardinal { tension: 0.0 },
            "catmullrom" => Curve::CatmullRom { alpha: 0.5 },
            "monotonex" | "monotone" => Curve::MonotoneX,
            "natural" => Curve::Natural,
            _ => return Err(GraphError::UnknownCurve(name.to_string())),
        };
        Ok(curve)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Curve::Linear => "linear",
            Curve::Step => "step",
            Curve::StepBefore => "stepBefore",
            Curve::StepAfter => "stepAfter",
            Curve::Basis => "basis",
            Curve::Cardinal { .. } => "cardinal",
            Curve::CatmullRom { .. } => "catmullRom",
            Curve::MonotoneX => "monotoneX",
            Curve::Natural => "natural",
        }
    }

    pub fn build(&self, points: &[Point]) -> Path {
        match *self {
            Curve::Linear => linear(points),
            Curve::Step => step(points, 0.5),
            Curve::StepBefore => step(points, 0.0),
            Curve::StepAfter => step(points, 1.0),
            Curve::Basis => basis(points),
            Curve::Cardinal { tension } => cardinal(points, tension),
            Curve::CatmullRom { alpha } => catmull_rom(points, alpha),
            Curve::MonotoneX => monotone_x(points),
            Curve::Natural => natural(points),
        }
    }
}

/// Anything that can turn projected points into a path.
pub trait CurveFactory {
    fn build(&self, points: &[Point]) -> Path;
}

impl CurveFactory for Curve {
    fn build(&self, points: &[Point]) -> Path { Curve::build(self, points) }
}

impl<F> CurveFactory for F
where
    F: Fn(&[Point]) -> Path,
{
    fn build(&self, points: &[Point]) -> Path { self(points) }
}

/// Curve selection on a graph: a named built-in or a caller-supplied factory.
pub enum CurveChoice {
    Named(Curve),
    Custom(Box<dyn CurveFactory>),
}

impl CurveChoice {
    pub fn named(name: &str) -> Result<Self> {
        Curve::from_name(name).map(CurveChoice::Named)
    }

    pub fn custom(factory: impl CurveFactory + 'static) -> Self {
        CurveChoice::Custom(Box::new(factory))
    }

    pub fn build(&self, points: &[Point]) -> Path {
        match self {
            CurveChoice::Named(c) => c.build(points),
            CurveChoice::Custom(f) => f.build(points),
        }
    }
}

impl Default for CurveChoice {
    fn default() -> Self { CurveChoice::Named(Curve::Linear) }
}

impl fmt::Debug for CurveChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveChoice::Named(c) => f.debug_tuple("Named").field(c).finish(),
            CurveChoice::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// ---- strategies --------------------------------------------------------------

fn linear(pts: &[Point]) -> Path {
    let mut path = Path::new();
    let Some(first) = pts.first() else { return path };
    path.move_to(first.x, first.y);
    for p in &pts[1..] {
        path.line_to(p.x, p.y);
    }
    path
}

/// `t` is where along each segment the vertical change happens (0 = before, 1 = after).
fn step(pts: &[Point], t: f32) -> Path {
    let mut path = Path::new();
    let Some(first) = pts.first() else { return path };
    path.move_to(first.x, first.y);
    for w in pts.windows(2) {
        let (a, b) = (w[0], w[1]);
        if t <= 0.0 {
            path.line_to(a.x, b.y);
            path.line_to(b.x, b.y);
        } else {
            let x1 = a.x * (1.0 - t) + b.x * t;
            path.line_to(x1, a.y);
            path.line_to(x1, b.y);
        }
    }
    if t > 0.0 && t < 1.0 && pts.len() >= 2 {
        let last = pts[pts.len() - 1];
        path.line_to(last.x, last.y);
    }
    path
}

fn basis(pts: &[Point]) -> Path {
    let mut path = Path::new();
    let n = pts.len();
    let Some(p0) = pts.first() else { return path };
    path.move_to(p0.x, p0.y);
    match n {
        1 => return path,
        2 => {
            path.line_to(pts[1].x, pts[1].y);
            return path;
        }
        _ => {}
    }
    let bezier = |path: &mut Path, a: Point, b: Point, c: Point| {
        path.cubic_to(
            (2.0 * a.x + b.x) / 3.0,
            (2.0 * a.y + b.y) / 3.0,
            (a.x + 2.0 * b.x) / 3.0,
            (a.y + 2.0 * b.y) / 3.0,
            (a.x + 4.0 * b.x + c.x) / 6.0,
            (a.y + 4.0 * b.y + c.y) / 6.0,
        );
    };
    path.line_to((5.0 * pts[0].x + pts[1].x) / 6.0, (5.0 * pts[0].y + pts[1].y) / 6.0);
    for i in 2..n {
        bezier(&mut path, pts[i - 2], pts[i - 1], pts[i]);
    }
    bezier(&mut path, pts[n - 2], pts[n - 1], pts[n - 1]);
    path.line_to(pts[n - 1].x, pts[n - 1].y);
    path
}

fn cardinal(pts: &[Point], tension: f32) -> Path {
    let mut path = Path::new();
    let n = pts.len();
    let Some(p0) = pts.first() else { return path };
    path.move_to(p0.x, p0.y);
    if n == 1 { return path; }
    if n == 2 {
        path.line_to(pts[1].x, pts[1].y);
        return path;
    }
    let k = (1.0 - tension) / 6.0;
    // End tangents are zero: neighbours outside the data mirror onto the inner point.
    let at = |i: isize| -> Point {
        if i < 0 {
            pts[1]
        } else if i as usize >= n {
            pts[n - 2]
        } else {
            pts[i as usize]
        }
    };
    for j in 0..n - 1 {
        let (a, b) = (pts[j], pts[j + 1]);
        let prev = at(j as isize - 1);
        let next = at(j as isize + 2);
        path.cubic_to(
            a.x + k * (b.x - prev.x),
            a.y + k * (b.y - prev.y),
            b.x + k * (a.x - next.x),
            b.y + k * (a.y - next.y),
            b.x,
            b.y,
        );
    }
    path
}

/// Centripetal (alpha = 0.5) and chordal (alpha = 1) Catmull-Rom; alpha = 0 falls back to cardinal.
fn catmull_rom(pts: &[Point], alpha: f32) -> Path {
    if alpha == 0.0 { return cardinal(pts, 0.0); }
    let mut path = Path::new();
    let mut state = CatmullRomState::new(alpha as f64);
    for p in pts {
        state.point(&mut path, p.x as f64, p.y as f64);
    }
    state.line_end(&mut path);
    path
}

struct CatmullRomState {
    alpha: f64,
    state: u8,
    x: [f64; 3],
    y: [f64; 3],
    l01_a: f64,
    l12_a: f64,
    l23_a: f64,
    l01_2a: f64,
    l12_2a: f64,
    l23_2a: f64,
}

impl CatmullRomState {
    fn new(alpha: f64) -> Self {
        Self {
            alpha,
            state: 0,
            x: [f64::NAN; 3],
            y: [f64::NAN; 3],
            l01_a: 0.0,
            l12_a: 0.0,
            l23_a: 0.0,
            l01_2a: 0.0,
            l12_2a: 0.0,
            l23_2a: 0.0,
        }
    }

    fn segment(&self, path: &mut Path, x: f64, y: f64) {
        let [x0, x1, x2] = self.x;
        let [y0, y1, y2] = self.y;
        let (mut cx1, mut cy1, mut cx2, mut cy2) = (x1, y1, x2, y2);
        if self.l01_a > EPSILON {
            let a = 2.0 * self.l01_2a + 3.0 * self.l01_a * self.l12_a + self.l12_2a;
            let n = 3.0 * self.l01_a * (self.l01_a + self.l12_a);
            cx1 = (x1 * a - x0 * self.l12_2a + x2 * self.l01_2a) / n;
            cy1 = (y1 * a - y0 * self.l12_2a + y2 * self.l01_2a) / n;
        }
        if self.l23_a > EPSILON {
            let b = 2.0 * self.l23_2a + 3.0 * self.l23_a * self.l12_a + self.l12_2a;
            let m = 3.0 * self.l23_a * (self.l23_a + self.l12_a);
            cx2 = (x2 * b + x1 * self.l23_2a - x * self.l12_2a) / m;
            cy2 = (y2 * b + y1 * self.l23_2a - y * self.l12_2a) / m;
        }
        path.cubic_to(cx1 as f32, cy1 as f32, cx2 as f32, cy2 as f32, x2 as f32, y2 as f32);
    }

    fn point(&mut self, path: &mut Path, x: f64, y: f64) {
        if self.state > 0 {
            let x23 = self.x[2] - x;
            let y23 = self.y[2] - y;
            self.l23_2a = (x23 * x23 + y23 * y23).powf(self.alpha);
            self.l23_a = self.l23_2a.sqrt();
        }
        match self.state {
            0 => {
                self.state = 1;
                path.move_to(x as f32, y as f32);
            }
            1 => self.state = 2,
            2 => {
                self.state = 3;
                self.segment(path, x, y);
            }
            _ => self.segment(path, x, y),
        }
        self.l01_a = self.l12_a;
        self.l12_a = self.l23_a;
        self.l01_2a = self.l12_2a;
        self.l12_2a = self.l23_2a;
        self.x = [self.x[1], self.x[2], x];
        self.y = [self.y[1], self.y[2], y];
    }

    fn line_end(&mut self, path: &mut Path) {
        match self.state {
            2 => path.line_to(self.x[2] as f32, self.y[2] as f32),
            3 => {
                let (x, y) = (self.x[2], self.y[2]);
                self.point(path, x, y);
            }
            _ => {}
        }
    }
}

fn monotone_x(pts: &[Point]) -> Path {
    let mut path = Path::new();
    let mut state = MonotoneState::new();
    for p in pts {
        state.point(&mut path, p.x as f64, p.y as f64);
    }
    state.line_end(&mut path);
    path
}

struct MonotoneState {
    state: u8,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    t0: f64,
}

#[inline]
fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Minimum that propagates NaN.
fn min_nan(vals: [f64; 3]) -> f64 {
    if vals.iter().any(|v| v.is_nan()) { return f64::NAN; }
    vals[0].min(vals[1]).min(vals[2])
}

impl MonotoneState {
    fn new() -> Self {
        Self { state: 0, x0: f64::NAN, y0: f64::NAN, x1: f64::NAN, y1: f64::NAN, t0: f64::NAN }
    }

    /// Tangent at the middle point of (x0,y0), (x1,y1), (x2,y2) (Steffen's method).
    fn slope3(&self, x2: f64, y2: f64) -> f64 {
        let h0 = self.x1 - self.x0;
        let h1 = x2 - self.x1;
        let d0 = if h0 != 0.0 { h0 } else if h1 < 0.0 { -0.0 } else { 0.0 };
        let d1 = if h1 != 0.0 { h1 } else if h0 < 0.0 { -0.0 } else { 0.0 };
        let s0 = (self.y1 - self.y0) / d0;
        let s1 = (y2 - self.y1) / d1;
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        let t = (sign(s0) + sign(s1)) * min_nan([s0.abs(), s1.abs(), 0.5 * p.abs()]);
        if t.is_nan() { 0.0 } else { t }
    }

    /// One-sided tangent from the given tangent at the other end.
    fn slope2(&self, t: f64) -> f64 {
        let h = self.x1 - self.x0;
        if h != 0.0 && !h.is_nan() { (3.0 * (self.y1 - self.y0) / h - t) / 2.0 } else { t }
    }

    fn segment(&self, path: &mut Path, t0: f64, t1: f64) {
        let dx = (self.x1 - self.x0) / 3.0;
        path.cubic_to(
            (self.x0 + dx) as f32,
            (self.y0 + dx * t0) as f32,
            (self.x1 - dx) as f32,
            (self.y1 - dx * t1) as f32,
            self.x1 as f32,
            self.y1 as f32,
        );
    }

    fn point(&mut self, path: &mut Path, x: f64, y: f64) {
        let mut t1 = f64::NAN;
        if x == self.x1 && y == self.y1 { return; }
        match self.state {
            0 => {
                self.state = 1;
                path.move_to(x as f32, y as f32);
            }
            1 => self.state = 2,
            2 => {
                self.state = 3;
                t1 = self.slope3(x, y);
                let t0 = self.slope2(t1);
                self.segment(path, t0, t1);
            }
            _ => {
                t1 = self.slope3(x, y);
                self.segment(path, self.t0, t1);
            }
        }
        self.x0 = self.x1;
        self.x1 = x;
        self.y0 = self.y1;
        self.y1 = y;
        self.t0 = t1;
    }

    fn line_end(&mut self, path: &mut Path) {
        match self.state {
            2 => path.line_to(self.x1 as f32, self.y1 as f32),
            3 => {
                let t1 = self.slope2(self.t0);
                self.segment(path, self.t0, t1);
            }
            _ => {}
        }
    }
}

fn natural(pts: &[Point]) -> Path {
    let mut path = Path::new();
    let n = pts.len();
    let Some(p0) = pts.first() else { return path };
    path.move_to(p0.x, p0.y);
    if n == 1 { return path; }
    if n == 2 {
        path.line_to(pts[1].x, pts[1].y);
        return path;
    }
    let xs: Vec<f64> = pts.iter().map(|p| p.x as f64).collect();
    let ys: Vec<f64> = pts.iter().map(|p| p.y as f64).collect();
    let (ax, bx) = control_points(&xs);
    let (ay, by) = control_points(&ys);
    for i in 0..n - 1 {
        path.cubic_to(ax[i] as f32, ay[i] as f32, bx[i] as f32, by[i] as f32, pts[i + 1].x, pts[i + 1].y);
    }
    path
}

/// Solve the tridiagonal system for the natural spline's control points along one axis.
fn control_points(x: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = x.len() - 1;
    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    let mut r = vec![0.0; n];
    a[0] = 0.0;
    b[0] = 2.0;
    r[0] = x[0] + 2.0 * x[1];
    for i in 1..n - 1 {
        a[i] = 1.0;
        b[i] = 4.0;
        r[i] = 4.0 * x[i] + 2.0 * x[i + 1];
    }
    a[n - 1] = 2.0;
    b[n - 1] = 7.0;
    r[n - 1] = 8.0 * x[n - 1] + x[n];
    for i in 1..n {
        let m = a[i] / b[i - 1];
        b[i] -= m;
        r[i] -= m * r[i - 1];
    }
    a[n - 1] = r[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        a[i] = (r[i] - a[i + 1]) / b[i];
    }
    b[n - 1] = (x[n] + a[n - 1]) / 2.0;
    for i in 0..n - 1 {
        b[i] = 2.0 * x[i + 1] - a[i + 1];
    }
    (a, b)
}
