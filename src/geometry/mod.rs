//! Geometry kernel
//!
//! Pure, stateless predicates on 2D points and segments used by the
//! visibility graph builder:
//!
//! - orientation of an ordered point triple
//! - proper crossing of two segments, where a shared endpoint is not a crossing
//! - point equality within [`EPSILON`]
//! - point-in-polygon containment (even-odd rule) and boundary membership

use crate::common::{Point2D, Polygon};

/// Absolute tolerance for coordinate equality and collinearity
pub const EPSILON: f64 = 1e-9;

/// Turn direction of an ordered point triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
}

/// Orientation of the triple `(p1, p2, p3)`.
///
/// Sign of the cross product `(p2 - p1) x (p3 - p2)`; magnitudes within
/// [`EPSILON`] resolve to [`Orientation::Collinear`].
pub fn orientation(p1: Point2D, p2: Point2D, p3: Point2D) -> Orientation {
    let first = p2.to_vector() - p1.to_vector();
    let second = p3.to_vector() - p2.to_vector();
    let cross = first.perp(&second);

    if cross.abs() <= EPSILON {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// Coordinate equality within [`EPSILON`]
pub fn points_equal(p: Point2D, q: Point2D) -> bool {
    (p.x - q.x).abs() <= EPSILON && (p.y - q.y).abs() <= EPSILON
}

/// Returns true if segments `[a1, a2]` and `[b1, b2]` properly cross.
///
/// Segments sharing an endpoint never intersect, so a sightline may end on
/// a polygon corner. A segment passing exactly through a vertex of the other
/// segment does intersect. Collinear overlaps fall out of the
/// four-orientation test as non-intersecting.
pub fn segments_intersect(a1: Point2D, a2: Point2D, b1: Point2D, b2: Point2D) -> bool {
    if points_equal(a1, b1)
        || points_equal(a1, b2)
        || points_equal(a2, b1)
        || points_equal(a2, b2)
    {
        return false;
    }

    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);

    o1 != o2 && o3 != o4
}

/// Returns true if segment `[a, b]` crosses any boundary edge of `polygon`
pub fn segment_crosses_polygon(a: Point2D, b: Point2D, polygon: &Polygon) -> bool {
    polygon.edges().any(|(e1, e2)| segments_intersect(a, b, e1, e2))
}

/// Returns true if `p` lies on the closed segment `[a, b]`
pub fn point_on_segment(p: Point2D, a: Point2D, b: Point2D) -> bool {
    orientation(a, b, p) == Orientation::Collinear
        && p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

/// Returns true if `p` lies on any edge of `polygon`, corners included
pub fn point_on_boundary(polygon: &Polygon, p: Point2D) -> bool {
    polygon.edges().any(|(a, b)| point_on_segment(p, a, b))
}

/// Strict interior test: boundary points are never inside
pub fn polygon_interior_contains(polygon: &Polygon, point: Point2D) -> bool {
    !point_on_boundary(polygon, point) && polygon_contains(polygon, point)
}

/// Even-odd containment test.
///
/// Points exactly on the boundary may land on either side.
pub fn polygon_contains(polygon: &Polygon, point: Point2D) -> bool {
    let vertices = &polygon.vertices;
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];

        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}
