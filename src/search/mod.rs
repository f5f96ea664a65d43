//! Generic A* search engine
//!
//! - `tree`: arena-backed search tree with dead-branch pruning
//! - `open_list`: f-cost ordered frontier with FIFO tie-breaking
//! - `a_star`: the search driver
//! - `graph_problem`: explicit weighted graph domain

pub mod tree;
pub mod open_list;
pub mod a_star;
pub mod graph_problem;

pub use tree::{NodeId, SearchNode, SearchTree};
pub use open_list::OpenList;
pub use a_star::{
    a_star_search, AStarSearch, SearchOutcome, SearchStats, SearchStatus, FAILURE_COST,
};
pub use graph_problem::WeightedGraphProblem;
