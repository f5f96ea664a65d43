//! Visibility graph path planning
//!
//! Shortest any-angle paths among simple polygonal obstacles: a visibility
//! graph over obstacle corners searched by a generic, reusable A* engine.

// Core modules
pub mod common;
pub mod geometry;
pub mod utils;

// Algorithm modules
pub mod visibility;
pub mod search;
pub mod path_planning;

// Re-export common types for convenience
pub use common::{Path2D, Point2D, Polygon};
pub use common::{PathPlanner, SearchProblem, Visualizable};
pub use common::{PlanningError, PlanningResult};
pub use path_planning::{PlanResult, VisibilityGraphConfig, VisibilityGraphPlanner};
pub use search::{a_star_search, AStarSearch, SearchOutcome, SearchStats};
pub use visibility::VisibilityGraph;
