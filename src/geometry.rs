//! Triangle shape and the affine frame changes that walk it around a fan.
//!
//! All transforms follow 2d-canvas composition rules: a new operation is
//! post-multiplied, i.e. it acts in the current local frame.

use std::f64::consts::PI;

/// One third of a turn. Every fan step rotates by `-FAN_ANGLE`.
pub const FAN_ANGLE: f64 = 2.0 * PI / 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn approx_eq(self, other: Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

/// 2D affine matrix in canvas layout:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    /// `self * other`
    pub fn then(&self, o: &Affine) -> Affine {
        Affine {
            a: self.a * o.a + self.c * o.b,
            b: self.b * o.a + self.d * o.b,
            c: self.a * o.c + self.c * o.d,
            d: self.b * o.c + self.d * o.d,
            e: self.a * o.e + self.c * o.f + self.e,
            f: self.b * o.e + self.d * o.f + self.f,
        }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Affine {
        self.then(&Affine { e: dx, f: dy, ..Self::IDENTITY })
    }

    pub fn rotate(&self, angle: f64) -> Affine {
        let (sin, cos) = angle.sin_cos();
        self.then(&Affine { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 })
    }

    pub fn scale(&self, sx: f64, sy: f64) -> Affine {
        self.then(&Affine { a: sx, d: sy, ..Self::IDENTITY })
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(self.a * p.x + self.c * p.y + self.e, self.b * p.x + self.d * p.y + self.f)
    }

    pub fn approx_eq(&self, o: &Affine, eps: f64) -> bool {
        [
            self.a - o.a,
            self.b - o.b,
            self.c - o.c,
            self.d - o.d,
            self.e - o.e,
            self.f - o.f,
        ]
        .iter()
        .all(|v| v.abs() <= eps)
    }
}

/// Equilateral triangle cut from the square pattern: side `S`, height `S*sqrt(3)/2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    side: f64,
    height: f64,
}

impl Triangle {
    pub fn new(side: f64) -> Self {
        Self { side, height: 3f64.sqrt() / 2.0 * side }
    }

    pub fn side(&self) -> f64 {
        self.side
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Vertices of the downward-pointing triangle, lifted by `offset`.
    ///
    /// The fan frames are translated down by the same offset, so the shape
    /// stays put on screen while the pattern anchored to the frame slides.
    pub fn vertices(&self, offset: f64) -> [Point; 3] {
        [
            Point::new(0.0, -offset),
            Point::new(self.side, -offset),
            Point::new(0.5 * self.side, self.height - offset),
        ]
    }

    pub fn pivot(&self, pivot: Pivot, offset: f64) -> Point {
        let [left, right, apex] = self.vertices(offset);
        match pivot {
            Pivot::Left => left,
            Pivot::Right => right,
            Pivot::Apex => apex,
        }
    }
}

/// The vertex a fan step turns the frame around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivot {
    Left,
    Right,
    Apex,
}

/// Sequence of frame operations, as a surface would receive them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOp {
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
}

impl FrameOp {
    pub fn apply_to(self, m: &Affine) -> Affine {
        match self {
            FrameOp::Translate(dx, dy) => m.translate(dx, dy),
            FrameOp::Rotate(angle) => m.rotate(angle),
            FrameOp::Scale(sx, sy) => m.scale(sx, sy),
        }
    }
}

/// Rotate the frame by `angle` about a triangle vertex.
pub fn turn_about(tri: &Triangle, pivot: Pivot, offset: f64, angle: f64) -> [FrameOp; 3] {
    let p = tri.pivot(pivot, offset);
    [
        FrameOp::Translate(p.x, p.y),
        FrameOp::Rotate(angle),
        FrameOp::Translate(-p.x, -p.y),
    ]
}

/// Extra hop that staggers alternate rows by three triangle widths along
/// the rotated axis.
pub fn alternate_shift(tri: &Triangle) -> [FrameOp; 3] {
    [
        FrameOp::Rotate(FAN_ANGLE),
        FrameOp::Translate(-3.0 * tri.side(), 0.0),
        FrameOp::Rotate(-FAN_ANGLE),
    ]
}

/// Entry into the mirrored frame after a normal pass that visited
/// `positions` triangles.
pub fn mirror_entry(tri: &Triangle, positions: usize, offset: f64) -> [FrameOp; 5] {
    let lead = match positions % 3 {
        0 => 0.5,
        1 => 1.5,
        _ => -0.5,
    };
    let [t0, r, t1] = turn_about(tri, Pivot::Left, offset, FAN_ANGLE);
    [
        FrameOp::Scale(-1.0, -1.0),
        FrameOp::Translate((lead - positions as f64) * tri.side(), -tri.height() + offset),
        t0,
        r,
        t1,
    ]
}

/// True when `p` lies inside or on the edge of the triangle `t`.
pub fn contains(t: &[Point; 3], p: Point, eps: f64) -> bool {
    let cross = |a: Point, b: Point| (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    let d1 = cross(t[0], t[1]);
    let d2 = cross(t[1], t[2]);
    let d3 = cross(t[2], t[0]);
    (d1 >= -eps && d2 >= -eps && d3 >= -eps) || (d1 <= eps && d2 <= eps && d3 <= eps)
}
