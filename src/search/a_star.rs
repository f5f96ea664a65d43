//! A* best-first search over any [`SearchProblem`].
//!
//! The driver owns a [`SearchTree`] of nodes, an [`OpenList`] of frontier
//! handles, and a closed set of expanded states. Each [`AStarSearch::step`]
//! pops the cheapest frontier node and either finishes or expands it.
//!
//! Duplicate detection is by state equality against both the closed set
//! and the states currently on the open list. A state already open is not
//! re-costed when a cheaper path to it turns up later (no decrease-key), so
//! the result is optimal only when the first path found to each open state
//! is also its cheapest. Nodes whose successors are all duplicates are
//! pruned from the tree together with any ancestors left childless.

use std::collections::HashSet;

use log::{debug, trace};

use crate::common::{PlanningError, PlanningResult, SearchProblem};

use super::open_list::OpenList;
use super::tree::{NodeId, SearchTree};

/// Cost reported when no path exists
pub const FAILURE_COST: f64 = -1.0;

/// Driver state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Searching,
    Succeeded,
    Failed,
}

/// Effort counters for one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the open list and expanded
    pub nodes_expanded: usize,
    /// Child nodes created, root excluded
    pub nodes_generated: usize,
    /// Nodes removed as dead ends
    pub nodes_pruned: usize,
    /// Largest search tree held at once
    pub max_tree_size: usize,
}

/// Result of a finished (or abandoned) search
#[derive(Debug, Clone)]
pub struct SearchOutcome<S> {
    /// States from start to goal; empty on failure
    pub path: Vec<S>,
    /// Total path cost, or [`FAILURE_COST`] on failure
    pub cost: f64,
    pub stats: SearchStats,
}

impl<S> SearchOutcome<S> {
    pub fn failure(stats: SearchStats) -> Self {
        Self { path: Vec::new(), cost: FAILURE_COST, stats }
    }

    pub fn is_success(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Steppable A* search
pub struct AStarSearch<'p, P: SearchProblem> {
    problem: &'p P,
    tree: SearchTree<P::State>,
    open: OpenList,
    open_states: HashSet<P::State>,
    closed: HashSet<P::State>,
    status: SearchStatus,
    goal_node: Option<NodeId>,
    stats: SearchStats,
}

impl<'p, P: SearchProblem> AStarSearch<'p, P> {
    /// Create the root from the problem's initial state and open it
    pub fn new(problem: &'p P) -> PlanningResult<Self> {
        let initial = problem.initial_state();
        let f_cost = problem.heuristic(&initial);
        let tree = SearchTree::new(initial.clone(), f_cost);

        let mut open = OpenList::new();
        open.insert(tree.root(), f_cost)?;
        let mut open_states = HashSet::new();
        open_states.insert(initial);

        Ok(Self {
            problem,
            tree,
            open,
            open_states,
            closed: HashSet::new(),
            status: SearchStatus::Searching,
            goal_node: None,
            stats: SearchStats { max_tree_size: 1, ..SearchStats::default() },
        })
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn tree(&self) -> &SearchTree<P::State> {
        &self.tree
    }

    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// Advance by one expansion.
    ///
    /// Once the search has finished, further calls return the final status.
    pub fn step(&mut self) -> PlanningResult<SearchStatus> {
        if self.status != SearchStatus::Searching {
            return Ok(self.status);
        }

        let current = match self.open.pop_min() {
            Some(id) => id,
            None => {
                debug!(
                    "[AStar] FAILED: open list exhausted after {} expansions",
                    self.stats.nodes_expanded
                );
                self.status = SearchStatus::Failed;
                return Ok(self.status);
            }
        };

        let (state, path_cost) = match self.tree.get(current) {
            Some(node) => (node.state.clone(), node.path_cost),
            None => {
                return Err(PlanningError::InvalidNode(format!(
                    "open list referenced freed node {:?}",
                    current
                )))
            }
        };
        self.open_states.remove(&state);

        if self.problem.is_goal(&state) {
            debug!(
                "[AStar] goal reached: cost={:.3}, expanded={}, tree peak={}",
                path_cost, self.stats.nodes_expanded, self.stats.max_tree_size
            );
            self.goal_node = Some(current);
            self.status = SearchStatus::Succeeded;
            return Ok(self.status);
        }

        // Closed before expansion so the node cannot be its own successor
        self.closed.insert(state.clone());
        self.stats.nodes_expanded += 1;
        self.expand(current, &state, path_cost)?;

        Ok(self.status)
    }

    /// Step until the search succeeds or fails
    pub fn run(mut self) -> PlanningResult<SearchOutcome<P::State>> {
        while self.step()? == SearchStatus::Searching {}
        Ok(self.outcome())
    }

    /// Path and cost for the current status; failure unless succeeded
    pub fn outcome(&self) -> SearchOutcome<P::State> {
        let goal = match (self.status, self.goal_node) {
            (SearchStatus::Succeeded, Some(goal)) => goal,
            _ => return SearchOutcome::failure(self.stats),
        };

        match (self.tree.path_to_root(goal), self.tree.get(goal)) {
            (Some(path), Some(node)) => SearchOutcome {
                path,
                cost: node.path_cost,
                stats: self.stats,
            },
            _ => SearchOutcome::failure(self.stats),
        }
    }

    fn expand(&mut self, current: NodeId, state: &P::State, path_cost: f64) -> PlanningResult<()> {
        let mut added = 0;

        for (successor, step_cost) in self.problem.successors(state) {
            if self.closed.contains(&successor) || self.open_states.contains(&successor) {
                continue;
            }

            let child_cost = path_cost + step_cost;
            let f_cost = child_cost + self.problem.heuristic(&successor);
            let child = self.tree.add_child(current, successor.clone(), child_cost, f_cost)?;
            self.open.insert(child, f_cost)?;
            self.open_states.insert(successor);
            added += 1;
        }

        self.stats.nodes_generated += added;
        self.stats.max_tree_size = self.stats.max_tree_size.max(self.tree.peak_len());

        // The root stays even when it has nowhere to go
        if added == 0 && current != self.tree.root() {
            let pruned = self.tree.prune_if_dead(current)?;
            self.stats.nodes_pruned += pruned;
            trace!("[AStar] dead end {:?}: pruned {} nodes", state, pruned);
        } else {
            trace!("[AStar] expanded {:?}: {} children", state, added);
        }
        Ok(())
    }
}

/// Run A* on `problem` to completion
pub fn a_star_search<P: SearchProblem>(problem: &P) -> PlanningResult<SearchOutcome<P::State>> {
    AStarSearch::new(problem)?.run()
}
