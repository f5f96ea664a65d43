//! Search tree arena.
//!
//! Nodes live in a slot vector and are addressed by generational
//! [`NodeId`] handles. Parent links are plain handles, children lists are
//! handle vectors, and freeing a node bumps its slot generation so any
//! handle still pointing at it is rejected instead of dangling. Each tree
//! stamps its handles with its own id, so a handle from another tree is
//! rejected even when its slot index happens to be valid here.

use std::sync::atomic::{AtomicU32, Ordering};

use log::trace;

use crate::common::{PlanningError, PlanningResult};

/// Handle to a node owned by a [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: u32,
    index: usize,
    generation: u32,
}

static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(0);

/// Search node
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    pub state: S,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub depth: usize,
    /// Accumulated cost from the root
    pub path_cost: f64,
    /// `path_cost` plus the heuristic estimate
    pub f_cost: f64,
}

impl<S> SearchNode<S> {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Slot<S> {
    generation: u32,
    node: Option<SearchNode<S>>,
}

/// Rooted tree that exclusively owns every search node.
///
/// The root is created with the tree and lives until the tree is dropped.
/// A clone keeps the original's id, so handles stay valid in both copies.
#[derive(Debug, Clone)]
pub struct SearchTree<S> {
    id: u32,
    slots: Vec<Slot<S>>,
    free: Vec<usize>,
    root: NodeId,
    live: usize,
    peak: usize,
}

impl<S> SearchTree<S> {
    /// Create a tree holding only a root node for `state`
    pub fn new(state: S, f_cost: f64) -> Self {
        let root_node = SearchNode {
            state,
            parent: None,
            children: Vec::new(),
            depth: 0,
            path_cost: 0.0,
            f_cost,
        };
        let id = NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            slots: vec![Slot { generation: 0, node: Some(root_node) }],
            free: Vec::new(),
            root: NodeId { tree: id, index: 0, generation: 0 },
            live: 1,
            peak: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.live
    }

    /// Always false: the root outlives every other node
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Largest number of nodes alive at once
    pub fn peak_len(&self) -> usize {
        self.peak
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&SearchNode<S>> {
        if id.tree != self.id {
            return None;
        }
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut SearchNode<S>> {
        if id.tree != self.id {
            return None;
        }
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Allocate a child of `parent`.
    ///
    /// # Errors
    /// [`PlanningError::InvalidNode`] if `parent` is not live in this tree.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        state: S,
        path_cost: f64,
        f_cost: f64,
    ) -> PlanningResult<NodeId> {
        let depth = match self.get(parent) {
            Some(node) => node.depth + 1,
            None => {
                return Err(PlanningError::InvalidNode(format!(
                    "parent {:?} is not owned by this tree",
                    parent
                )))
            }
        };

        let node = SearchNode {
            state,
            parent: Some(parent),
            children: Vec::new(),
            depth,
            path_cost,
            f_cost,
        };

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                NodeId { tree: self.id, index, generation: slot.generation }
            }
            None => {
                self.slots.push(Slot { generation: 0, node: Some(node) });
                NodeId { tree: self.id, index: self.slots.len() - 1, generation: 0 }
            }
        };

        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.push(id);
        }
        self.live += 1;
        self.peak = self.peak.max(self.live);
        Ok(id)
    }

    /// Remove a dead-end leaf and every ancestor it leaves childless.
    ///
    /// Walks upward from `id`, freeing each childless non-root node, and
    /// stops at the first ancestor that still has children or at the root.
    /// The root itself is never freed. Returns the number of nodes freed.
    ///
    /// # Errors
    /// [`PlanningError::InvalidNode`] for a stale handle, and
    /// [`PlanningError::PreconditionViolation`] if `id` still has children.
    pub fn prune_if_dead(&mut self, id: NodeId) -> PlanningResult<usize> {
        match self.get(id) {
            None => {
                return Err(PlanningError::InvalidNode(format!(
                    "node {:?} is not owned by this tree",
                    id
                )))
            }
            Some(node) if !node.is_leaf() => {
                return Err(PlanningError::PreconditionViolation(format!(
                    "cannot prune node {:?} with {} children",
                    id,
                    node.children.len()
                )))
            }
            Some(_) => {}
        }

        let mut pruned = 0;
        let mut current = id;
        while current != self.root {
            let parent = match self.get(current) {
                Some(node) if node.is_leaf() => node.parent,
                _ => break,
            };
            self.release(current);
            pruned += 1;

            match parent {
                Some(parent_id) => {
                    if let Some(parent_node) = self.get_mut(parent_id) {
                        parent_node.children.retain(|&child| child != current);
                    }
                    current = parent_id;
                }
                None => break,
            }
        }

        trace!("[SearchTree] pruned {} nodes, {} live", pruned, self.live);
        Ok(pruned)
    }

    /// States from `id` up to the root, then reversed into root-first order
    pub fn path_to_root(&self, id: NodeId) -> Option<Vec<S>>
    where
        S: Clone,
    {
        let mut states = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id)?;
            states.push(node.state.clone());
            current = node.parent;
        }
        states.reverse();
        Some(states)
    }

    /// Live node handles in child-before-parent order
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.live);
        let mut stack = vec![(self.root, false)];
        while let Some((id, visited)) = stack.pop() {
            if visited {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            if let Some(node) = self.get(id) {
                for &child in node.children.iter().rev() {
                    stack.push((child, false));
                }
            }
        }
        order
    }

    fn release(&mut self, id: NodeId) {
        let slot = &mut self.slots[id.index];
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
    }
}
