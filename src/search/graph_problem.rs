//! Explicit weighted graph as a search problem.
//!
//! Nodes are plain integer ids joined by weighted edges, with an optional
//! per-node heuristic table. Nodes without an entry estimate zero, which
//! degrades the search to uniform-cost.

use std::collections::HashMap;

use crate::common::SearchProblem;

/// Weighted graph search domain
#[derive(Debug, Clone)]
pub struct WeightedGraphProblem {
    adjacency: HashMap<usize, Vec<(usize, f64)>>,
    heuristics: HashMap<usize, f64>,
    start: usize,
    goal: usize,
}

impl WeightedGraphProblem {
    pub fn new(start: usize, goal: usize) -> Self {
        Self {
            adjacency: HashMap::new(),
            heuristics: HashMap::new(),
            start,
            goal,
        }
    }

    /// Add an undirected edge
    pub fn add_edge(&mut self, a: usize, b: usize, cost: f64) -> &mut Self {
        self.add_directed_edge(a, b, cost);
        self.add_directed_edge(b, a, cost)
    }

    pub fn add_directed_edge(&mut self, from: usize, to: usize, cost: f64) -> &mut Self {
        self.adjacency.entry(from).or_insert_with(Vec::new).push((to, cost));
        self
    }

    pub fn set_heuristic(&mut self, node: usize, estimate: f64) -> &mut Self {
        self.heuristics.insert(node, estimate);
        self
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn goal(&self) -> usize {
        self.goal
    }
}

impl SearchProblem for WeightedGraphProblem {
    type State = usize;

    fn initial_state(&self) -> usize {
        self.start
    }

    fn is_goal(&self, state: &usize) -> bool {
        *state == self.goal
    }

    fn heuristic(&self, state: &usize) -> f64 {
        self.heuristics.get(state).copied().unwrap_or(0.0)
    }

    fn successors(&self, state: &usize) -> Vec<(usize, f64)> {
        self.adjacency.get(state).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undirected_edges() {
        let mut problem = WeightedGraphProblem::new(0, 2);
        problem.add_edge(0, 1, 1.5).add_edge(1, 2, 2.0);

        assert_eq!(problem.successors(&0), vec![(1, 1.5)]);
        assert_eq!(problem.successors(&1), vec![(0, 1.5), (2, 2.0)]);
        assert!(problem.successors(&7).is_empty());
    }

    #[test]
    fn test_heuristic_defaults_to_zero() {
        let mut problem = WeightedGraphProblem::new(0, 1);
        problem.set_heuristic(0, 4.0);
        assert!((problem.heuristic(&0) - 4.0).abs() < 1e-10);
        assert_eq!(problem.heuristic(&1), 0.0);
        assert!(problem.is_goal(&1));
        assert_eq!(problem.initial_state(), 0);
        assert_eq!((problem.start(), problem.goal()), (0, 1));
    }
}
