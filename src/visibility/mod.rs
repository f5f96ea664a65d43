//! Visibility graph among polygonal obstacles

pub mod graph;
pub mod builder;

pub use graph::{Edge, PolygonTag, Vertex, VertexId, VisibilityGraph};
