//! Best-first search for a minimum-cost brick tiling
//!
//! States are partial tilings represented by the mask of still-open cells.
//! Every expansion places one brick at the first open cell in row-major
//! order, which yields exactly one canonical decomposition order while still
//! reaching every tiling: the anchor must be covered by some brick whose
//! top-left cell it is. Nodes are ranked by
//! `cost + open_cells * per_cell_bound`; when the bound never exceeds the
//! cheapest per-cell cost in the catalog, the first goal popped is optimal.

use crate::algorithm::arena::{NodeArena, NodeId};
use crate::algorithm::frontier::{Frontier, FrontierEntry, priority};
use crate::io::error::{AbortReason, Result, invalid_parameter, search_aborted};
use crate::spatial::Mask;
use crate::spatial::Placement;
use crate::spatial::placement::{apply_placement, fitting_placements};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Cooperative limits checked between frontier pops
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    /// Abort once this much wall-clock time has passed
    pub time_limit: Option<Duration>,
    /// Prune the frontier back to this many entries when it doubles past it
    ///
    /// Capping trades optimality for bounded memory; the search still
    /// terminates because the unit brick keeps every kept node extendable.
    pub max_frontier: Option<usize>,
    /// Abort once this many nodes have been expanded
    pub max_expansions: Option<usize>,
    /// Abort as soon as this flag is raised
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    /// No limits, matching an unbounded exhaustive search
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Limit wall-clock time per search
    #[must_use]
    pub const fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Cap the frontier width
    #[must_use]
    pub const fn with_max_frontier(mut self, width: usize) -> Self {
        self.max_frontier = Some(width);
        self
    }

    /// Limit the number of node expansions per search
    #[must_use]
    pub const fn with_max_expansions(mut self, expansions: usize) -> Self {
        self.max_expansions = Some(expansions);
        self
    }

    /// Attach a cancellation flag
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Check limits for consistency
    ///
    /// # Errors
    ///
    /// Returns an error if the frontier cap is zero
    pub fn validate(&self) -> Result<()> {
        if self.max_frontier == Some(0) {
            return Err(invalid_parameter(
                "max_frontier",
                &0,
                &"frontier cap must keep at least one node",
            ));
        }
        Ok(())
    }
}

/// Counters describing one search run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes created, including the root
    pub nodes_created: usize,
    /// Nodes popped and expanded
    pub nodes_expanded: usize,
    /// Largest frontier size observed
    pub peak_frontier: usize,
    /// Nodes discarded by frontier capping
    pub pruned: usize,
}

/// A complete tiling found by the search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Placements in path order, root first
    pub placements: Vec<Placement>,
    /// Sum of the placements' search costs
    pub cost: u32,
    /// Run counters
    pub stats: SearchStats,
}

/// Outcome of popping one frontier node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStep {
    /// The node was expanded into its children
    Expanded(NodeId),
    /// The node covers every cell
    Goal(NodeId),
}

/// Single best-first search over one mask
///
/// Owns its node arena and frontier, so independent searches share nothing.
pub struct TilingSearch {
    arena: NodeArena,
    frontier: Frontier,
    per_cell_bound: u32,
    limits: SearchLimits,
    stats: SearchStats,
}

impl TilingSearch {
    /// Prepare a search rooted at `mask`
    pub fn new(mask: &Mask, per_cell_bound: u32, limits: SearchLimits) -> Self {
        let mut arena = NodeArena::new();
        let mut frontier = Frontier::new();
        let open_cells = mask.open_count();
        let root = arena.push_root(mask.clone());
        frontier.push(FrontierEntry {
            bound: priority(0, open_cells, per_cell_bound),
            node: root,
        });
        Self {
            arena,
            frontier,
            per_cell_bound,
            limits,
            stats: SearchStats {
                nodes_created: 1,
                ..SearchStats::default()
            },
        }
    }

    /// Pop and expand nodes until a goal node is popped
    ///
    /// # Errors
    ///
    /// Returns `SearchAborted` if the time limit elapses, the expansion
    /// budget runs out, the cancellation flag is raised, or the frontier
    /// empties
    pub fn run(mut self) -> Result<Solution> {
        self.limits.validate()?;
        let started = Instant::now();

        loop {
            self.check_limits(started)?;
            if let SearchStep::Goal(goal) = self.step()? {
                return Ok(self.finish(goal));
            }
        }
    }

    /// Pop one node; expand it unless it is a goal
    ///
    /// # Errors
    ///
    /// Returns `SearchAborted` if the frontier is empty
    pub fn step(&mut self) -> Result<SearchStep> {
        let Some(entry) = self.frontier.pop() else {
            return Err(self.abort(AbortReason::FrontierExhausted));
        };

        if self.arena.get(entry.node).is_some_and(|node| node.is_goal()) {
            return Ok(SearchStep::Goal(entry.node));
        }

        self.expand(entry.node);
        Ok(SearchStep::Expanded(entry.node))
    }

    fn check_limits(&self, started: Instant) -> Result<()> {
        let cancelled = self
            .limits
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        if cancelled {
            return Err(self.abort(AbortReason::Cancelled));
        }
        if let Some(limit) = self
            .limits
            .time_limit
            .filter(|&limit| started.elapsed() >= limit)
        {
            return Err(self.abort(AbortReason::TimeLimit(limit)));
        }
        if let Some(limit) = self
            .limits
            .max_expansions
            .filter(|&limit| self.stats.nodes_expanded >= limit)
        {
            return Err(self.abort(AbortReason::ExpansionLimit(limit)));
        }
        Ok(())
    }

    fn expand(&mut self, id: NodeId) {
        let Some(mask) = self.arena.expand(id) else {
            return;
        };
        let Some(anchor) = mask.first_open() else {
            return;
        };

        for placement in fitting_placements(&mask, anchor) {
            let child = self
                .arena
                .push_child(id, placement, apply_placement(&mask, placement));
            if let Some(node) = self.arena.get(child) {
                self.frontier.push(FrontierEntry {
                    bound: priority(node.cost(), node.open_cells(), self.per_cell_bound),
                    node: child,
                });
            }
            self.stats.nodes_created += 1;
        }
        self.stats.nodes_expanded += 1;

        let overflowing = self
            .limits
            .max_frontier
            .filter(|&width| self.frontier.len() > width.saturating_mul(2));
        if let Some(width) = overflowing {
            for dropped in self.frontier.prune_to(width) {
                self.arena.prune(dropped);
                self.stats.pruned += 1;
            }
        }
    }

    fn finish(&self, goal: NodeId) -> Solution {
        let cost = self.arena.get(goal).map_or(0, |node| node.cost());
        Solution {
            placements: self.arena.path_to(goal),
            cost,
            stats: self.stats(),
        }
    }

    const fn abort(&self, reason: AbortReason) -> crate::io::error::AlgorithmError {
        search_aborted(reason, self.stats.nodes_expanded)
    }

    /// Node storage, for inspecting memory behavior
    pub const fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Number of handles waiting on the frontier
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Placements leading to a node, root first
    pub fn path_to(&self, id: NodeId) -> Vec<Placement> {
        self.arena.path_to(id)
    }

    /// Counters accumulated so far
    pub const fn stats(&self) -> SearchStats {
        let mut stats = self.stats;
        stats.peak_frontier = self.frontier.peak_len();
        stats
    }
}

/// Find a minimum-cost tiling of `mask` without limits
///
/// # Errors
///
/// Only fails if the catalog stops offering a brick for some open anchor
pub fn solve(mask: &Mask, per_cell_bound: u32) -> Result<Solution> {
    solve_with_limits(mask, per_cell_bound, &SearchLimits::unlimited())
}

/// Find a minimum-cost tiling of `mask` under cooperative limits
///
/// # Errors
///
/// Returns `SearchAborted` if a limit stops the search and `InvalidParameter`
/// if the limits are inconsistent
pub fn solve_with_limits(
    mask: &Mask,
    per_cell_bound: u32,
    limits: &SearchLimits,
) -> Result<Solution> {
    TilingSearch::new(mask, per_cell_bound, limits.clone()).run()
}
