//! Common traits defining interfaces for planning algorithms

use std::fmt::Debug;
use std::hash::Hash;

use crate::common::types::*;
use crate::common::error::PlanningError;

/// Trait for path planning algorithms
pub trait PathPlanner {
    /// Plan a path from start to goal
    fn plan(&self, start: Point2D, goal: Point2D) -> Result<Path2D, PlanningError>;
}

/// Domain-dependent half of a best-first search.
///
/// Each search domain supplies its state type and these four operations;
/// the A* driver in [`crate::search`] is written once against this trait.
/// States are compared by value, so two nodes holding equal states are
/// treated as duplicates.
pub trait SearchProblem {
    /// State held by each search node
    type State: Clone + Eq + Hash + Debug;

    /// State the search starts from
    fn initial_state(&self) -> Self::State;

    /// Returns true if `state` satisfies the goal
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Nonnegative estimate of the remaining cost from `state`.
    ///
    /// Must never overestimate for the returned path to be optimal.
    fn heuristic(&self, state: &Self::State) -> f64;

    /// States reachable from `state` in one step, with their step costs
    fn successors(&self, state: &Self::State) -> Vec<(Self::State, f64)>;
}

/// Trait for visualizable structures
pub trait Visualizable {
    /// Draw current state to visualizer
    fn visualize(&self, vis: &mut crate::utils::Visualizer);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that traits compile correctly
    struct DummyPlanner;

    impl PathPlanner for DummyPlanner {
        fn plan(&self, start: Point2D, goal: Point2D) -> Result<Path2D, PlanningError> {
            Ok(Path2D::from_points(vec![start, goal]))
        }
    }

    struct CountDown;

    impl SearchProblem for CountDown {
        type State = u32;

        fn initial_state(&self) -> u32 {
            3
        }

        fn is_goal(&self, state: &u32) -> bool {
            *state == 0
        }

        fn heuristic(&self, state: &u32) -> f64 {
            *state as f64
        }

        fn successors(&self, state: &u32) -> Vec<(u32, f64)> {
            if *state == 0 {
                Vec::new()
            } else {
                vec![(state - 1, 1.0)]
            }
        }
    }

    #[test]
    fn test_path_planner_trait() {
        let planner = DummyPlanner;
        let result = planner.plan(Point2D::origin(), Point2D::new(1.0, 1.0));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 2);
    }

    #[test]
    fn test_search_problem_trait() {
        let problem = CountDown;
        let start = problem.initial_state();
        assert!(!problem.is_goal(&start));
        assert_eq!(problem.successors(&start), vec![(2, 1.0)]);
        assert!(problem.successors(&0).is_empty());
    }
}
