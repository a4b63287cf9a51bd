//! Priority-ordered frontier of unexpanded search nodes

use crate::algorithm::arena::NodeId;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Heap entry ordering a node handle by its priority bound
///
/// Ordering is lexicographic on (bound, node), so among equal bounds the
/// earliest-created node compares smallest and is popped first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierEntry {
    /// `cost + open_cells * per_cell_bound`
    pub bound: u64,
    /// Node this entry refers to
    pub node: NodeId,
}

/// Priority bound of a node
pub const fn priority(cost: u32, open_cells: usize, per_cell_bound: u32) -> u64 {
    cost as u64 + open_cells as u64 * per_cell_bound as u64
}

/// Min-heap of node handles keyed by (bound, creation index)
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
    peak: usize,
}

impl Frontier {
    /// Create an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node handle
    pub fn push(&mut self, entry: FrontierEntry) {
        self.heap.push(Reverse(entry));
        self.peak = self.peak.max(self.heap.len());
    }

    /// Remove the entry with the smallest (bound, creation index)
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    /// Number of queued handles
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the frontier ever reached
    pub const fn peak_len(&self) -> usize {
        self.peak
    }

    /// Keep only the `width` best entries, returning the dropped handles
    pub fn prune_to(&mut self, width: usize) -> Vec<NodeId> {
        if self.heap.len() <= width {
            return Vec::new();
        }
        let mut entries: Vec<FrontierEntry> = std::mem::take(&mut self.heap)
            .into_iter()
            .map(|Reverse(entry)| entry)
            .collect();
        entries.sort_unstable();
        let dropped = entries.split_off(width);
        self.heap = entries.into_iter().map(Reverse).collect();
        dropped.into_iter().map(|entry| entry.node).collect()
    }
}
