// File: crates/tract-core/src/geometry.rs
// Summary: Plain 2-D vector math, cross-section descriptors and segment quad construction.

use std::ops::{Add, Mul, Sub};

/// A point in simulation space (centimeters, y up).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A displacement in simulation space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Z component of the 3-D cross product.
    pub fn cross(&self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Rotated a quarter turn counter-clockwise.
    pub fn perp(&self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    pub fn normalized(&self) -> Vec2 {
        let len = self.length();
        if len > 0.0 { Vec2::new(self.x / len, self.y / len) } else { *self }
    }
}

impl Add<Vec2> for Point2 {
    type Output = Point2;
    fn add(self, rhs: Vec2) -> Point2 { Point2::new(self.x + rhs.x, self.y + rhs.y) }
}

impl Sub for Point2 {
    type Output = Vec2;
    fn sub(self, rhs: Point2) -> Vec2 { Vec2::new(self.x - rhs.x, self.y - rhs.y) }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, k: f64) -> Vec2 { Vec2::new(self.x * k, self.y * k) }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;
    fn mul(self, v: Vec2) -> Vec2 { v * self }
}

/// One tube segment as described by the acoustic simulation.
///
/// The segment spans an inlet and an outlet plane. Each plane has its own
/// centerline point, unit normal (the in-plane lateral axis as seen in the
/// sagittal projection) and lateral scale factor. The contour's extent along
/// its local Y axis is shared by both planes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossSection {
    pub ctr_line_in: Point2,
    pub ctr_line_out: Point2,
    pub normal_in: Vec2,
    pub normal_out: Vec2,
    pub scale_in: f64,
    pub scale_out: f64,
    pub contour_y_min: f64,
    pub contour_y_max: f64,
}

impl CrossSection {
    /// Straight segment with the same normal, scale and symmetric half-width on both planes.
    pub fn straight(ctr_in: Point2, ctr_out: Point2, normal: Vec2, half_width: f64) -> Self {
        Self {
            ctr_line_in: ctr_in,
            ctr_line_out: ctr_out,
            normal_in: normal,
            normal_out: normal,
            scale_in: 1.0,
            scale_out: 1.0,
            contour_y_min: -half_width,
            contour_y_max: half_width,
        }
    }

    pub fn quad(&self) -> SegmentQuad {
        build_quad(self)
    }
}

/// Renderable outline of a segment, in simulation space.
///
/// Traversal order is `in_min -> in_max -> out_max -> out_min -> in_min`;
/// outline drawing and containment testing both rely on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentQuad {
    pub in_min: Point2,
    pub in_max: Point2,
    pub out_max: Point2,
    pub out_min: Point2,
}

/// Offset each plane's centerline point along its normal by `scale * extent`,
/// once for the contour's minimum and once for its maximum.
pub fn build_quad(section: &CrossSection) -> SegmentQuad {
    let s = section;
    SegmentQuad {
        in_min: s.ctr_line_in + s.scale_in * s.contour_y_min * s.normal_in,
        in_max: s.ctr_line_in + s.scale_in * s.contour_y_max * s.normal_in,
        out_max: s.ctr_line_out + s.scale_out * s.contour_y_max * s.normal_out,
        out_min: s.ctr_line_out + s.scale_out * s.contour_y_min * s.normal_out,
    }
}

impl SegmentQuad {
    /// Corners in traversal order.
    pub fn corners(&self) -> [Point2; 4] {
        [self.in_min, self.in_max, self.out_max, self.out_min]
    }

    /// Closed outline edges `(start, end)` in traversal order.
    pub fn edges(&self) -> [(Point2, Point2); 4] {
        let c = self.corners();
        [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
    }

    /// Closed containment: points on an edge count as inside, the interior
    /// is resolved by even-odd ray casting over the corners.
    pub fn contains(&self, p: Point2) -> bool {
        self.edges().iter().any(|&(a, b)| on_edge(p, a, b)) || point_in_polygon(p, &self.corners())
    }

    /// Opposite edges do not cross each other.
    pub fn is_simple(&self) -> bool {
        let [a, b, c, d] = self.corners();
        !segments_cross(a, b, c, d) && !segments_cross(b, c, d, a)
    }

    /// Signed shoelace area; the sign gives the winding direction.
    pub fn signed_area(&self) -> f64 {
        let c = self.corners();
        let mut twice = 0.0;
        for i in 0..4 {
            let p = c[i];
            let q = c[(i + 1) % 4];
            twice += p.x * q.y - q.x * p.y;
        }
        twice * 0.5
    }
}

pub(crate) fn point_in_polygon(p: Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = polygon[i];
        let vj = polygon[j];
        if ((vi.y > p.y) != (vj.y > p.y))
            && (p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Tolerance for boundary hits, in simulation units (cm).
const EDGE_EPS: f64 = 1e-9;

fn on_edge(p: Point2, a: Point2, b: Point2) -> bool {
    let ab = b - a;
    if (ab.cross(p - a)).abs() > EDGE_EPS * ab.length().max(1.0) {
        return false;
    }
    p.x >= a.x.min(b.x) - EDGE_EPS
        && p.x <= a.x.max(b.x) + EDGE_EPS
        && p.y >= a.y.min(b.y) - EDGE_EPS
        && p.y <= a.y.max(b.y) + EDGE_EPS
}

/// Proper crossing of segments `ab` and `cd` (touching endpoints do not count).
fn segments_cross(a: Point2, b: Point2, c: Point2, d: Point2) -> bool {
    let d1 = (b - a).cross(c - a);
    let d2 = (b - a).cross(d - a);
    let d3 = (d - c).cross(a - c);
    let d4 = (d - c).cross(b - c);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}
