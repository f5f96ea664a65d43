//! Visibility graph construction.
//!
//! Every unordered vertex pair is tested once against every polygon edge,
//! which costs O(V^2 * E) and dominates preprocessing. Start and goal are
//! inserted afterwards as free points, testing only their own pairs.

use itertools::Itertools;
use log::{debug, info, trace};

use crate::common::{PlanningError, PlanningResult, Point2D, Polygon};
use crate::geometry::{points_equal, polygon_interior_contains, segment_crosses_polygon};

use super::graph::{PolygonTag, Vertex, VertexId, VisibilityGraph};

impl VisibilityGraph {
    /// Build the visibility graph of a set of simple polygon obstacles.
    ///
    /// Polygons must not overlap, share vertices or edges, or touch through
    /// a vertex lying on another polygon's edge; this is not checked.
    ///
    /// # Errors
    /// [`PlanningError::InvalidPolygon`] if a polygon has fewer than three
    /// vertices or a non-finite coordinate.
    pub fn build(polygons: &[Polygon]) -> PlanningResult<Self> {
        for (id, polygon) in polygons.iter().enumerate() {
            validate_polygon(id, polygon)?;
        }

        let mut graph = Self::with_polygons(polygons.to_vec());

        for (polygon_id, polygon) in polygons.iter().enumerate() {
            let size = polygon.len();
            for (index, &position) in polygon.vertices.iter().enumerate() {
                let tag = PolygonTag { polygon_id, index, size };
                graph.push_vertex(Vertex::polygon_corner(position, tag));
            }
        }

        let visible_pairs: Vec<(VertexId, VertexId)> = (0..graph.vertex_count())
            .tuple_combinations()
            .filter(|&(v, w)| graph.vertices_visible(v, w))
            .collect();
        for (v, w) in visible_pairs {
            graph.push_edge(v, w);
        }

        info!(
            "[VisGraph] built from {} polygons: {} vertices, {} edges",
            polygons.len(),
            graph.vertex_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Mutual visibility of two graph vertices.
    ///
    /// Corners of the same polygon see each other only when adjacent on its
    /// ring. A free point enclosed by an obstacle sees no polygon corner, and
    /// two free points see each other only when enclosed alike. Every other
    /// pair is visible when the segment between them properly
    /// crosses no polygon edge. Unknown ids are never visible.
    pub fn vertices_visible(&self, v: VertexId, w: VertexId) -> bool {
        if v == w {
            return false;
        }
        let (a, b) = match (self.vertices.get(v), self.vertices.get(w)) {
            (Some(a), Some(b)) => (a, b),
            _ => return false,
        };

        match (&a.tag, &b.tag) {
            (Some(ta), Some(tb)) if ta.polygon_id == tb.polygon_id => {
                return ta.is_adjacent(tb);
            }
            (None, Some(_)) if a.enclosed_by.is_some() => return false,
            (Some(_), None) if b.enclosed_by.is_some() => return false,
            (None, None) if a.enclosed_by != b.enclosed_by => return false,
            _ => {}
        }

        !self.segment_blocked(a.position, b.position)
    }

    /// Line of sight between two arbitrary points.
    ///
    /// Used for the direct start-to-goal shortcut before any graph
    /// augmentation. Each point is resolved against the existing vertices
    /// first, so a point on a polygon corner obeys the same rules as that
    /// corner in [`vertices_visible`](Self::vertices_visible).
    pub fn is_visible(&self, from: Point2D, to: Point2D) -> bool {
        match (self.find_vertex(from), self.find_vertex(to)) {
            (Some(v), Some(w)) => v == w || self.vertices_visible(v, w),
            (Some(v), None) => self.vertex_sees_point(v, to),
            (None, Some(w)) => self.vertex_sees_point(w, from),
            (None, None) => {
                self.enclosing_polygon(from) == self.enclosing_polygon(to)
                    && !self.segment_blocked(from, to)
            }
        }
    }

    /// Index of the obstacle whose interior strictly contains `point`
    pub fn enclosing_polygon(&self, point: Point2D) -> Option<usize> {
        self.polygons
            .iter()
            .position(|polygon| polygon_interior_contains(polygon, point))
    }

    fn vertex_sees_point(&self, v: VertexId, point: Point2D) -> bool {
        let vertex = match self.vertices.get(v) {
            Some(vertex) => vertex,
            None => return false,
        };
        let enclosed_by = self.enclosing_polygon(point);
        let sealed = match vertex.tag {
            Some(_) => enclosed_by.is_some(),
            None => vertex.enclosed_by != enclosed_by,
        };
        !sealed && !self.segment_blocked(vertex.position, point)
    }

    /// Add a free point and connect it to every vertex it can see.
    ///
    /// Existing pairs are unaffected by a new free point, so only the new
    /// vertex's pairs are tested. A point coinciding with an existing vertex
    /// reuses that vertex.
    ///
    /// # Errors
    /// [`PlanningError::PreconditionViolation`] for non-finite coordinates.
    pub fn insert_free_point(&mut self, point: Point2D) -> PlanningResult<VertexId> {
        if !point.is_finite() {
            return Err(PlanningError::PreconditionViolation(format!(
                "free point {} has a non-finite coordinate",
                point
            )));
        }
        if let Some(existing) = self.find_vertex(point) {
            debug!("[VisGraph] free point {} coincides with vertex {}", point, existing);
            return Ok(existing);
        }

        let enclosed_by = self.enclosing_polygon(point);
        if let Some(polygon_id) = enclosed_by {
            debug!("[VisGraph] free point {} is enclosed by polygon {}", point, polygon_id);
        }

        let id = self.push_vertex(Vertex::free(point, enclosed_by));
        let visible: Vec<VertexId> = (0..id)
            .filter(|&other| self.vertices_visible(other, id))
            .collect();
        for &other in &visible {
            self.push_edge(other, id);
        }

        trace!(
            "[VisGraph] free point {} -> vertex {} sees {} vertices",
            point,
            id,
            visible.len()
        );
        Ok(id)
    }

    fn segment_blocked(&self, from: Point2D, to: Point2D) -> bool {
        if points_equal(from, to) {
            return false;
        }
        self.polygons
            .iter()
            .any(|polygon| segment_crosses_polygon(from, to, polygon))
    }
}

fn validate_polygon(id: usize, polygon: &Polygon) -> PlanningResult<()> {
    if polygon.len() < 3 {
        return Err(PlanningError::InvalidPolygon(format!(
            "polygon {} has {} vertices, at least 3 required",
            id,
            polygon.len()
        )));
    }
    if let Some(bad) = polygon.vertices.iter().find(|p| !p.is_finite()) {
        return Err(PlanningError::InvalidPolygon(format!(
            "polygon {} has non-finite vertex {}",
            id, bad
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::segments_intersect;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn triangle() -> Polygon {
        Polygon::new(vec![p(-2.0, -2.0), p(2.0, -2.0), p(0.0, 4.0)])
    }

    fn square(cx: f64, cy: f64, half: f64) -> Polygon {
        Polygon::new(vec![
            p(cx - half, cy - half),
            p(cx + half, cy - half),
            p(cx + half, cy + half),
            p(cx - half, cy + half),
        ])
    }

    /// Axis-aligned squares on a jittered lattice, never touching
    fn random_squares(rng: &mut StdRng, count: usize) -> Vec<Polygon> {
        (0..count)
            .map(|i| {
                let cx = (i % 4) as f64 * 10.0 + rng.gen_range(-2.0..2.0);
                let cy = (i / 4) as f64 * 10.0 + rng.gen_range(-2.0..2.0);
                square(cx, cy, rng.gen_range(0.5..2.5))
            })
            .collect()
    }

    #[test]
    fn test_rejects_degenerate_polygon() {
        let result = VisibilityGraph::build(&[Polygon::new(vec![p(0.0, 0.0), p(1.0, 0.0)])]);
        assert!(matches!(result, Err(PlanningError::InvalidPolygon(_))));

        let nan = Polygon::new(vec![p(0.0, 0.0), p(1.0, f64::NAN), p(0.0, 1.0)]);
        let result = VisibilityGraph::build(&[nan]);
        assert!(matches!(result, Err(PlanningError::InvalidPolygon(_))));
    }

    #[test]
    fn test_empty_input() {
        let graph = VisibilityGraph::build(&[]).unwrap();
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_visible(p(-10.0, 0.0), p(10.0, 0.0)));
    }

    #[test]
    fn test_vertices_tagged_in_order() {
        let graph = VisibilityGraph::build(&[triangle(), square(10.0, 0.0, 1.0)]).unwrap();
        assert_eq!(graph.vertex_count(), 7);
        let tag = graph.vertex(4).unwrap().tag.unwrap();
        assert_eq!(tag, PolygonTag { polygon_id: 1, index: 1, size: 4 });
        assert_eq!(graph.position(0), Some(p(-2.0, -2.0)));
    }

    #[test]
    fn test_same_polygon_adjacency_only() {
        let graph = VisibilityGraph::build(&[square(0.0, 0.0, 1.0)]).unwrap();
        // Four ring edges, no diagonals
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.are_connected(0, 1));
        assert!(graph.are_connected(3, 0));
        assert!(!graph.are_connected(0, 2));
        assert!(!graph.are_connected(1, 3));
    }

    #[test]
    fn test_occluded_corners() {
        // A square far right of a tall wall; the wall hides the square's
        // far corners from the wall's left corners
        let wall = Polygon::new(vec![p(0.0, -5.0), p(1.0, -5.0), p(1.0, 5.0), p(0.0, 5.0)]);
        let graph = VisibilityGraph::build(&[wall, square(10.0, 0.0, 1.0)]).unwrap();
        // Wall corner (0, -5) and square corner (11, 1): segment crosses the wall
        assert!(!graph.vertices_visible(0, 6));
        // Wall corner (1, -5) sees square corner (9, -1)
        assert!(graph.vertices_visible(1, 4));
    }

    #[test]
    fn test_triangle_between_free_points() {
        let mut graph = VisibilityGraph::build(&[triangle()]).unwrap();
        assert!(!graph.is_visible(p(-10.0, 0.0), p(10.0, 0.0)));

        let start = graph.insert_free_point(p(-10.0, 0.0)).unwrap();
        let goal = graph.insert_free_point(p(10.0, 0.0)).unwrap();
        assert!(!graph.are_connected(start, goal));

        // Start sees the near corners only
        assert!(graph.are_connected(start, 0));
        assert!(graph.are_connected(start, 2));
        assert!(!graph.are_connected(start, 1));
        // Goal mirrors it
        assert!(graph.are_connected(goal, 1));
        assert!(graph.are_connected(goal, 2));
        assert!(!graph.are_connected(goal, 0));
    }

    #[test]
    fn test_insert_coincident_point_reuses_vertex() {
        let mut graph = VisibilityGraph::build(&[triangle()]).unwrap();
        let edges_before = graph.edge_count();
        let id = graph.insert_free_point(p(2.0, -2.0)).unwrap();
        assert_eq!(id, 1);
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), edges_before);
    }

    #[test]
    fn test_insert_rejects_non_finite() {
        let mut graph = VisibilityGraph::build(&[]).unwrap();
        let result = graph.insert_free_point(p(f64::INFINITY, 0.0));
        assert!(matches!(result, Err(PlanningError::PreconditionViolation(_))));
    }

    #[test]
    fn test_enclosed_point_is_sealed() {
        let mut graph = VisibilityGraph::build(&[square(0.0, 0.0, 5.0)]).unwrap();
        let inside = graph.insert_free_point(p(0.0, 0.0)).unwrap();
        assert_eq!(graph.vertex(inside).unwrap().enclosed_by, Some(0));
        assert!(graph.neighbors(inside).is_empty());

        let outside = graph.insert_free_point(p(20.0, 0.0)).unwrap();
        assert!(!graph.are_connected(inside, outside));
        assert!(!graph.is_visible(p(0.0, 0.0), p(20.0, 0.0)));
        assert!(graph.is_visible(p(0.0, 0.0), p(1.0, 1.0)));
    }

    #[test]
    fn test_line_of_sight_between_corners_follows_ring() {
        let graph = VisibilityGraph::build(&[square(0.0, 0.0, 1.0)]).unwrap();

        // Diagonal corners: every edge touches an endpoint, yet the segment
        // runs through the interior
        assert!(!graph.is_visible(p(1.0, -1.0), p(-1.0, 1.0)));
        assert!(!graph.is_visible(p(-1.0, -1.0), p(1.0, 1.0)));
        // Adjacent corners see each other along the edge
        assert!(graph.is_visible(p(1.0, -1.0), p(1.0, 1.0)));
        // A corner and an outside point
        assert!(graph.is_visible(p(1.0, -1.0), p(5.0, -3.0)));
        assert!(!graph.is_visible(p(1.0, -1.0), p(-5.0, 3.0)));
        // A corner never sees into the interior
        assert!(!graph.is_visible(p(1.0, 1.0), p(0.2, 0.1)));
    }

    #[test]
    fn test_boundary_point_is_not_enclosed() {
        let graph = VisibilityGraph::build(&[square(0.0, 0.0, 1.0)]).unwrap();
        assert_eq!(graph.enclosing_polygon(p(1.0, 1.0)), None);
        assert_eq!(graph.enclosing_polygon(p(1.0, 0.5)), None);
        assert_eq!(graph.enclosing_polygon(p(0.5, 0.5)), Some(0));
    }

    #[test]
    fn test_free_points_enclosed_differently_never_connect() {
        let mut graph = VisibilityGraph::build(&[square(0.0, 0.0, 5.0)]).unwrap();
        let inside = graph.insert_free_point(p(1.0, 1.0)).unwrap();
        let also_inside = graph.insert_free_point(p(-1.0, -1.0)).unwrap();
        let outside = graph.insert_free_point(p(20.0, 0.0)).unwrap();

        assert!(graph.are_connected(inside, also_inside));
        assert!(!graph.vertices_visible(inside, outside));
    }

    #[test]
    fn test_visibility_symmetry_random() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5 {
            let polygons = random_squares(&mut rng, 8);
            let mut graph = VisibilityGraph::build(&polygons).unwrap();
            graph.insert_free_point(p(-8.0, -8.0)).unwrap();
            graph.insert_free_point(p(38.0, 18.0)).unwrap();

            let n = graph.vertex_count();
            for v in 0..n {
                for w in 0..n {
                    assert_eq!(graph.vertices_visible(v, w), graph.vertices_visible(w, v));
                }
            }
        }
    }

    #[test]
    fn test_edges_never_cross_polygons_random() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..5 {
            let polygons = random_squares(&mut rng, 8);
            let graph = VisibilityGraph::build(&polygons).unwrap();

            for edge in graph.edges() {
                let a = graph.position(edge.a).unwrap();
                let b = graph.position(edge.b).unwrap();
                for polygon in &polygons {
                    for (e1, e2) in polygon.edges() {
                        assert!(!segments_intersect(a, b, e1, e2));
                    }
                }
            }
        }
    }

    #[test]
    fn test_same_polygon_rule_random() {
        let mut rng = StdRng::seed_from_u64(3);
        let polygons = random_squares(&mut rng, 6);
        let graph = VisibilityGraph::build(&polygons).unwrap();

        for (v, vertex) in graph.vertices().iter().enumerate() {
            let tv = vertex.tag.unwrap();
            for (w, other) in graph.vertices().iter().enumerate() {
                let tw = other.tag.unwrap();
                if v != w && tv.polygon_id == tw.polygon_id {
                    assert_eq!(graph.are_connected(v, w), tv.is_adjacent(&tw));
                }
            }
        }
    }

    #[test]
    fn test_no_duplicate_edges() {
        let graph = VisibilityGraph::build(&[triangle(), square(10.0, 0.0, 1.0)]).unwrap();
        let mut pairs: Vec<(usize, usize)> =
            graph.edges().iter().map(|e| (e.a, e.b)).collect();
        let total = pairs.len();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), total);
        assert!(graph.edges().iter().all(|e| e.a < e.b));
    }
}
