//! Visibility graph data model.
//!
//! Vertices are kept in insertion order: polygon corners first, in polygon
//! and ring order, followed by any free points (start, goal) inserted later.
//! That order is the canonical enumeration used when pairing vertices.

use crate::common::{Point2D, Polygon};

/// Index of a vertex in [`VisibilityGraph::vertices`]
pub type VertexId = usize;

/// Membership of a vertex in an obstacle polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolygonTag {
    /// Position of the polygon in the input list
    pub polygon_id: usize,
    /// Position of the vertex in the polygon ring
    pub index: usize,
    /// Number of vertices in the polygon ring
    pub size: usize,
}

impl PolygonTag {
    /// True if `other` is the previous or next corner of the same ring
    pub fn is_adjacent(&self, other: &PolygonTag) -> bool {
        if self.polygon_id != other.polygon_id || self.index == other.index {
            return false;
        }
        let next = (self.index + 1) % self.size;
        let prev = (self.index + self.size - 1) % self.size;
        other.index == next || other.index == prev
    }
}

/// Graph vertex
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub position: Point2D,
    /// Owning polygon; `None` for free points
    pub tag: Option<PolygonTag>,
    /// Polygon whose interior strictly contains this free point
    pub enclosed_by: Option<usize>,
}

impl Vertex {
    pub fn polygon_corner(position: Point2D, tag: PolygonTag) -> Self {
        Self { position, tag: Some(tag), enclosed_by: None }
    }

    pub fn free(position: Point2D, enclosed_by: Option<usize>) -> Self {
        Self { position, tag: None, enclosed_by }
    }

    pub fn is_free(&self) -> bool {
        self.tag.is_none()
    }
}

/// Undirected visibility edge, stored with `a < b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: VertexId,
    pub b: VertexId,
    /// Euclidean distance between the endpoints
    pub length: f64,
}

impl Edge {
    /// The endpoint opposite `v`, if `v` is an endpoint
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if v == self.a {
            Some(self.b)
        } else if v == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Vertices and mutual-visibility edges among polygon obstacles.
///
/// Edges are mirrored into a per-vertex adjacency list so successor
/// expansion does not scan the whole edge set.
#[derive(Debug, Clone)]
pub struct VisibilityGraph {
    pub(super) polygons: Vec<Polygon>,
    pub(super) vertices: Vec<Vertex>,
    pub(super) edges: Vec<Edge>,
    pub(super) adjacency: Vec<Vec<(VertexId, f64)>>,
}

impl VisibilityGraph {
    pub(super) fn with_polygons(polygons: Vec<Polygon>) -> Self {
        Self {
            polygons,
            vertices: Vec::new(),
            edges: Vec::new(),
            adjacency: Vec::new(),
        }
    }

    pub(super) fn push_vertex(&mut self, vertex: Vertex) -> VertexId {
        self.vertices.push(vertex);
        self.adjacency.push(Vec::new());
        self.vertices.len() - 1
    }

    pub(super) fn push_edge(&mut self, v: VertexId, w: VertexId) {
        let (a, b) = if v < w { (v, w) } else { (w, v) };
        let length = self.vertices[a].position.distance(&self.vertices[b].position);
        self.edges.push(Edge { a, b, length });
        self.adjacency[a].push((b, length));
        self.adjacency[b].push((a, length));
    }

    /// Obstacle polygons the graph was built from
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn position(&self, id: VertexId) -> Option<Point2D> {
        self.vertices.get(id).map(|v| v.position)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Visible neighbours of `id` with edge lengths; empty for unknown ids
    pub fn neighbors(&self, id: VertexId) -> &[(VertexId, f64)] {
        self.adjacency.get(id).map(|n| n.as_slice()).unwrap_or(&[])
    }

    pub fn are_connected(&self, v: VertexId, w: VertexId) -> bool {
        self.neighbors(v).iter().any(|&(n, _)| n == w)
    }

    /// First vertex whose position equals `point` within tolerance
    pub fn find_vertex(&self, point: Point2D) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|v| crate::geometry::points_equal(v.position, point))
    }
}
