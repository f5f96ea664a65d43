//! Open list: frontier nodes ordered by ascending f-cost.
//!
//! Backed by a binary heap keyed on `(f_cost, insertion sequence)`, so
//! equal-cost entries come out in the order they went in. Entries hold
//! non-owning [`NodeId`] handles; a removed handle is dropped lazily when
//! it reaches the top of the heap.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use ordered_float::OrderedFloat;

use crate::common::{PlanningError, PlanningResult};

use super::tree::NodeId;

#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f_cost: OrderedFloat<f64>,
    sequence: u64,
    node: NodeId,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.sequence == other.sequence
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority frontier of search-tree handles
#[derive(Debug, Clone, Default)]
pub struct OpenList {
    heap: BinaryHeap<OpenEntry>,
    /// Live handles mapped to the sequence number of their current entry
    members: HashMap<NodeId, u64>,
    next_sequence: u64,
}

impl OpenList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` keyed by `f_cost`, after any entries with an equal key.
    ///
    /// # Errors
    /// [`PlanningError::PreconditionViolation`] if `node` is already open.
    pub fn insert(&mut self, node: NodeId, f_cost: f64) -> PlanningResult<()> {
        if self.members.contains_key(&node) {
            return Err(PlanningError::PreconditionViolation(format!(
                "node {:?} is already on the open list",
                node
            )));
        }
        self.members.insert(node, self.next_sequence);
        self.heap.push(OpenEntry {
            f_cost: OrderedFloat(f_cost),
            sequence: self.next_sequence,
            node,
        });
        self.next_sequence += 1;
        Ok(())
    }

    /// Pop the entry with the smallest f-cost, if any
    pub fn pop_min(&mut self) -> Option<NodeId> {
        while let Some(entry) = self.heap.pop() {
            if self.members.get(&entry.node) == Some(&entry.sequence) {
                self.members.remove(&entry.node);
                return Some(entry.node);
            }
        }
        None
    }

    /// Pop the entry with the smallest f-cost.
    ///
    /// # Errors
    /// [`PlanningError::PreconditionViolation`] on an empty list.
    pub fn remove_min(&mut self) -> PlanningResult<NodeId> {
        self.pop_min().ok_or_else(|| {
            PlanningError::PreconditionViolation("remove_min on an empty open list".to_string())
        })
    }

    /// Invalidate the entry for `node`; returns false if it was not open
    pub fn remove(&mut self, node: NodeId) -> bool {
        self.members.remove(&node).is_some()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::tree::SearchTree;

    /// Distinct live handles from a throwaway tree
    fn handles(count: usize) -> Vec<NodeId> {
        let mut tree = SearchTree::new(0usize, 0.0);
        let root = tree.root();
        (0..count)
            .map(|i| tree.add_child(root, i + 1, 0.0, 0.0).unwrap())
            .collect()
    }

    #[test]
    fn test_pops_in_ascending_cost() {
        let ids = handles(4);
        let mut open = OpenList::new();
        open.insert(ids[0], 3.0).unwrap();
        open.insert(ids[1], 1.0).unwrap();
        open.insert(ids[2], 4.0).unwrap();
        open.insert(ids[3], 2.0).unwrap();

        let order: Vec<NodeId> = std::iter::from_fn(|| open.pop_min()).collect();
        assert_eq!(order, vec![ids[1], ids[3], ids[0], ids[2]]);
        assert!(open.is_empty());
    }

    #[test]
    fn test_equal_costs_are_fifo() {
        let ids = handles(5);
        let mut open = OpenList::new();
        open.insert(ids[0], 2.0).unwrap();
        open.insert(ids[1], 1.0).unwrap();
        open.insert(ids[2], 2.0).unwrap();
        open.insert(ids[3], 1.0).unwrap();
        open.insert(ids[4], 2.0).unwrap();

        let order: Vec<NodeId> = std::iter::from_fn(|| open.pop_min()).collect();
        assert_eq!(order, vec![ids[1], ids[3], ids[0], ids[2], ids[4]]);
    }

    #[test]
    fn test_remove_min_on_empty_is_error() {
        let mut open = OpenList::new();
        assert!(matches!(open.remove_min(), Err(PlanningError::PreconditionViolation(_))));
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let ids = handles(1);
        let mut open = OpenList::new();
        open.insert(ids[0], 1.0).unwrap();
        assert!(open.insert(ids[0], 0.5).is_err());
        assert_eq!(open.len(), 1);
    }

    #[test]
    fn test_removed_entry_is_skipped() {
        let ids = handles(3);
        let mut open = OpenList::new();
        open.insert(ids[0], 1.0).unwrap();
        open.insert(ids[1], 2.0).unwrap();
        open.insert(ids[2], 3.0).unwrap();

        assert!(open.remove(ids[0]));
        assert!(!open.remove(ids[0]));
        assert!(!open.contains(ids[0]));
        assert_eq!(open.len(), 2);
        assert_eq!(open.remove_min().unwrap(), ids[1]);
    }

    #[test]
    fn test_reinsert_after_remove_uses_new_key() {
        let ids = handles(2);
        let mut open = OpenList::new();
        open.insert(ids[0], 1.0).unwrap();
        open.insert(ids[1], 2.0).unwrap();
        open.remove(ids[0]);
        open.insert(ids[0], 3.0).unwrap();

        assert_eq!(open.pop_min(), Some(ids[1]));
        assert_eq!(open.pop_min(), Some(ids[0]));
        assert_eq!(open.pop_min(), None);
    }

    #[test]
    fn test_reinsert_after_pop() {
        let ids = handles(1);
        let mut open = OpenList::new();
        open.insert(ids[0], 1.0).unwrap();
        assert_eq!(open.pop_min(), Some(ids[0]));
        open.insert(ids[0], 5.0).unwrap();
        assert_eq!(open.pop_min(), Some(ids[0]));
        assert_eq!(open.pop_min(), None);
    }
}
