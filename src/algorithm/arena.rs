//! Append-only node storage for the best-first search
//!
//! Nodes refer to their parent through integer handles, so the search tree
//! never holds references into itself. A node keeps its mask snapshot only
//! while it sits on the frontier; expanding or pruning it frees the boxed
//! mask and leaves the (parent, placement, cost) record needed for path
//! reconstruction. Memory for masks is therefore bounded by the frontier, not
//! by the number of nodes ever created.

use crate::spatial::Mask;
use crate::spatial::Placement;

/// Handle into a `NodeArena`; also the node's creation index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Creation index of the node
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Lifecycle of a node's mask snapshot
#[derive(Debug, Clone)]
pub enum NodeState {
    /// On the frontier, holding its own heap-allocated mask
    Open(Box<Mask>),
    /// Popped and expanded; mask released
    Expanded,
    /// Dropped from the frontier by width capping; mask released
    Pruned,
}

/// One partial tiling in the search tree
#[derive(Debug, Clone)]
pub struct SearchNode {
    state: NodeState,
    placement: Option<Placement>,
    cost: u32,
    open_cells: usize,
    parent: Option<NodeId>,
}

impl SearchNode {
    /// Accumulated search cost from the root
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Cells still requiring coverage
    pub const fn open_cells(&self) -> usize {
        self.open_cells
    }

    /// Placement that produced this node; `None` for the root
    pub const fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Parent handle; `None` for the root
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Mask snapshot, while the node is still open
    pub fn mask(&self) -> Option<&Mask> {
        match &self.state {
            NodeState::Open(mask) => Some(mask.as_ref()),
            NodeState::Expanded | NodeState::Pruned => None,
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> &NodeState {
        &self.state
    }

    /// True once all cells are covered
    pub const fn is_goal(&self) -> bool {
        self.open_cells == 0
    }
}

/// Growing table of search nodes addressed by `NodeId`
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
    live_masks: usize,
}

impl NodeArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the root node holding the complete input mask
    pub fn push_root(&mut self, mask: Mask) -> NodeId {
        let open_cells = mask.open_count();
        self.push(SearchNode {
            state: NodeState::Open(Box::new(mask)),
            placement: None,
            cost: 0,
            open_cells,
            parent: None,
        })
    }

    /// Insert a child created by applying `placement` to the parent's mask
    ///
    /// Cost and open-cell count are derived from the parent record and the
    /// brick, so they stay consistent with `mask` by construction.
    pub fn push_child(&mut self, parent: NodeId, placement: Placement, mask: Mask) -> NodeId {
        let (parent_cost, parent_open) = self
            .get(parent)
            .map_or((0, mask.open_count()), |node| (node.cost, node.open_cells));
        let open_cells = parent_open.saturating_sub(placement.shape.cells() as usize);
        debug_assert_eq!(open_cells, mask.open_count());
        self.push(SearchNode {
            state: NodeState::Open(Box::new(mask)),
            placement: Some(placement),
            cost: parent_cost + placement.search_cost(),
            open_cells,
            parent: Some(parent),
        })
    }

    fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.live_masks += 1;
        id
    }

    /// Look up a node
    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    /// Mark a node expanded and hand its mask to the caller
    ///
    /// Returns `None` if the node is unknown or no longer open.
    pub fn expand(&mut self, id: NodeId) -> Option<Mask> {
        self.release(id, NodeState::Expanded)
    }

    /// Mark a frontier node as pruned, dropping its mask
    pub fn prune(&mut self, id: NodeId) {
        let _ = self.release(id, NodeState::Pruned);
    }

    fn release(&mut self, id: NodeId, next: NodeState) -> Option<Mask> {
        let node = self.nodes.get_mut(id.0)?;
        if !matches!(node.state, NodeState::Open(_)) {
            return None;
        }
        self.live_masks -= 1;
        match std::mem::replace(&mut node.state, next) {
            NodeState::Open(mask) => Some(*mask),
            NodeState::Expanded | NodeState::Pruned => None,
        }
    }

    /// Placements from the root down to `id`, in application order
    pub fn path_to(&self, id: NodeId) -> Vec<Placement> {
        let mut path = Vec::new();
        let mut current = self.get(id);
        while let Some(node) = current {
            if let Some(placement) = node.placement {
                path.push(placement);
            }
            current = node.parent.and_then(|parent| self.get(parent));
        }
        path.reverse();
        path
    }

    /// Total nodes ever created
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no node was created yet
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes still holding a mask snapshot
    pub const fn live_masks(&self) -> usize {
        self.live_masks
    }
}
