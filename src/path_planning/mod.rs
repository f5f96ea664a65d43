//! Path planning algorithms

pub mod visibility_graph_planner;

pub use visibility_graph_planner::*;
