//! Visibility graph path planner
//!
//! Plans a shortest any-angle path among polygonal obstacles:
//!
//! 1. If start sees goal directly, return the straight segment.
//! 2. Otherwise copy the prebuilt obstacle graph, insert start and goal as
//!    free points, and run A* over it with the straight-line distance to the
//!    goal as heuristic.
//!
//! The obstacle graph is built once per planner and reused across queries.

use log::{debug, info, warn};

use crate::common::{
    Path2D, PathPlanner, PlanningError, PlanningResult, Point2D, Polygon, SearchProblem,
};
use crate::geometry::points_equal;
use crate::search::{AStarSearch, SearchStats, SearchStatus, FAILURE_COST};
use crate::visibility::{VertexId, VisibilityGraph};

/// Configuration for the visibility graph planner
#[derive(Debug, Clone)]
pub struct VisibilityGraphConfig {
    /// Heuristic weight (1.0 = optimal, >1.0 = faster but suboptimal)
    pub heuristic_weight: f64,
    /// Give up after this many node expansions
    pub max_expansions: Option<usize>,
    /// Return the straight segment when start sees goal, skipping search
    pub direct_shortcut: bool,
}

impl Default for VisibilityGraphConfig {
    fn default() -> Self {
        Self {
            heuristic_weight: 1.0,
            max_expansions: None,
            direct_shortcut: true,
        }
    }
}

/// Search domain over a visibility graph with start and goal inserted
pub struct VisibilityGraphProblem<'g> {
    graph: &'g VisibilityGraph,
    start: VertexId,
    goal: VertexId,
    goal_position: Point2D,
    heuristic_weight: f64,
}

impl<'g> VisibilityGraphProblem<'g> {
    /// # Errors
    /// [`PlanningError::PreconditionViolation`] if `start` or `goal` is not
    /// a vertex of `graph`.
    pub fn new(
        graph: &'g VisibilityGraph,
        start: VertexId,
        goal: VertexId,
        heuristic_weight: f64,
    ) -> PlanningResult<Self> {
        if graph.vertex(start).is_none() {
            return Err(PlanningError::PreconditionViolation(format!(
                "start vertex {} is not in the graph",
                start
            )));
        }
        let goal_position = graph.position(goal).ok_or_else(|| {
            PlanningError::PreconditionViolation(format!(
                "goal vertex {} is not in the graph",
                goal
            ))
        })?;

        Ok(Self { graph, start, goal, goal_position, heuristic_weight })
    }
}

impl<'g> SearchProblem for VisibilityGraphProblem<'g> {
    type State = VertexId;

    fn initial_state(&self) -> VertexId {
        self.start
    }

    fn is_goal(&self, state: &VertexId) -> bool {
        *state == self.goal
    }

    fn heuristic(&self, state: &VertexId) -> f64 {
        self.graph
            .position(*state)
            .map(|p| self.heuristic_weight * p.distance(&self.goal_position))
            .unwrap_or(0.0)
    }

    fn successors(&self, state: &VertexId) -> Vec<(VertexId, f64)> {
        self.graph.neighbors(*state).to_vec()
    }
}

/// Outcome of one planning query
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// Waypoints from start to goal; empty on failure
    pub path: Path2D,
    /// Total path length, or [`FAILURE_COST`] on failure
    pub cost: f64,
    pub stats: SearchStats,
    /// True if the direct start-goal segment was returned without search
    pub used_shortcut: bool,
    /// True if the search stopped at `max_expansions`
    pub budget_exceeded: bool,
}

impl PlanResult {
    fn direct(points: Vec<Point2D>, cost: f64) -> Self {
        Self {
            path: Path2D::from_points(points),
            cost,
            stats: SearchStats::default(),
            used_shortcut: true,
            budget_exceeded: false,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Visibility graph path planner
pub struct VisibilityGraphPlanner {
    graph: VisibilityGraph,
    config: VisibilityGraphConfig,
}

impl VisibilityGraphPlanner {
    /// Build the obstacle visibility graph and create a planner over it
    pub fn new(polygons: &[Polygon], config: VisibilityGraphConfig) -> PlanningResult<Self> {
        let graph = VisibilityGraph::build(polygons)?;
        Ok(Self { graph, config })
    }

    /// Create with default configuration
    pub fn from_polygons(polygons: &[Polygon]) -> PlanningResult<Self> {
        Self::new(polygons, VisibilityGraphConfig::default())
    }

    /// Obstacle-only graph, without any query points
    pub fn graph(&self) -> &VisibilityGraph {
        &self.graph
    }

    pub fn config(&self) -> &VisibilityGraphConfig {
        &self.config
    }

    /// Obstacle graph with `start` and `goal` inserted, plus their ids
    pub fn query_graph(
        &self,
        start: Point2D,
        goal: Point2D,
    ) -> PlanningResult<(VisibilityGraph, VertexId, VertexId)> {
        let mut graph = self.graph.clone();
        let start_id = graph.insert_free_point(start)?;
        let goal_id = graph.insert_free_point(goal)?;
        Ok((graph, start_id, goal_id))
    }

    /// Plan from `start` to `goal`, reporting failure in the result.
    ///
    /// # Errors
    /// Only for invalid input such as non-finite coordinates; an unreachable
    /// goal is a failed [`PlanResult`], not an error.
    pub fn search(&self, start: Point2D, goal: Point2D) -> PlanningResult<PlanResult> {
        if !start.is_finite() || !goal.is_finite() {
            return Err(PlanningError::PreconditionViolation(format!(
                "start {} and goal {} must be finite",
                start, goal
            )));
        }

        if points_equal(start, goal) {
            return Ok(PlanResult::direct(vec![start], 0.0));
        }

        if self.config.direct_shortcut && self.graph.is_visible(start, goal) {
            debug!("[VisGraph] direct line of sight from {} to {}", start, goal);
            return Ok(PlanResult::direct(vec![start, goal], start.distance(&goal)));
        }

        let (graph, start_id, goal_id) = self.query_graph(start, goal)?;
        if start_id == goal_id {
            return Ok(PlanResult::direct(vec![start], 0.0));
        }

        let weight = self.config.heuristic_weight;
        let problem = VisibilityGraphProblem::new(&graph, start_id, goal_id, weight)?;
        let mut search = AStarSearch::new(&problem)?;
        let mut budget_exceeded = false;

        while search.status() == SearchStatus::Searching {
            if let Some(max) = self.config.max_expansions {
                if search.stats().nodes_expanded >= max {
                    warn!("[AStar] stopped after {} expansions without reaching the goal", max);
                    budget_exceeded = true;
                    break;
                }
            }
            search.step()?;
        }

        let outcome = search.outcome();
        let points: Vec<Point2D> = outcome
            .path
            .iter()
            .filter_map(|&id| graph.position(id))
            .collect();

        if outcome.is_success() {
            info!(
                "[VisGraph] path found: {} waypoints, cost={:.3}, expanded={}",
                points.len(),
                outcome.cost,
                outcome.stats.nodes_expanded
            );
        } else {
            info!(
                "[VisGraph] no path from {} to {} after {} expansions",
                start, goal, outcome.stats.nodes_expanded
            );
        }

        Ok(PlanResult {
            path: Path2D::from_points(points),
            cost: if outcome.is_success() { outcome.cost } else { FAILURE_COST },
            stats: outcome.stats,
            used_shortcut: false,
            budget_exceeded,
        })
    }
}

impl PathPlanner for VisibilityGraphPlanner {
    fn plan(&self, start: Point2D, goal: Point2D) -> Result<Path2D, PlanningError> {
        let result = self.search(start, goal)?;
        if result.is_success() {
            Ok(result.path)
        } else if result.budget_exceeded {
            Err(PlanningError::NoPathFound(format!(
                "expansion budget of {} exhausted",
                result.stats.nodes_expanded
            )))
        } else {
            Err(PlanningError::NoPathFound(format!("goal {} unreachable from {}", goal, start)))
        }
    }
}
