//! Windowed re-optimization of a complete tiling
//!
//! Anchor-first search tends to leave small bricks scattered over the parts
//! of the grid it decides last. This pass slides an 8x8 window over the grid
//! in steps of 4, lifts every brick anchored inside the window, and re-solves
//! exactly the lifted cells in isolation. Windows overlap, and each one sees
//! the result of all earlier windows.

use crate::algorithm::search::{SearchLimits, solve_with_limits};
use crate::io::configuration::{WINDOW_SIZE, WINDOW_STRIDE};
use crate::spatial::mask::{Cell, GRID_HEIGHT, GRID_WIDTH};
use crate::spatial::placement::{coverage, total_cost};
use crate::spatial::Placement;

/// Origins of all windows in row-major order
pub fn window_origins() -> Vec<Cell> {
    (0..GRID_HEIGHT)
        .step_by(WINDOW_STRIDE)
        .flat_map(|row| {
            (0..GRID_WIDTH)
                .step_by(WINDOW_STRIDE)
                .map(move |col| Cell::new(row, col))
        })
        .collect()
}

/// Test whether a cell lies in the window starting at `origin`
pub const fn in_window(origin: Cell, cell: Cell) -> bool {
    cell.row >= origin.row
        && cell.row < origin.row + WINDOW_SIZE
        && cell.col >= origin.col
        && cell.col < origin.col + WINDOW_SIZE
}

/// Counters describing one optimization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStats {
    /// Windows processed
    pub windows_visited: usize,
    /// Windows that contained bricks and were re-solved
    pub windows_searched: usize,
    /// Windows whose search hit a limit and kept their bricks
    pub windows_aborted: usize,
    /// Total search cost before the pass
    pub cost_before: u32,
    /// Total search cost after the windows processed so far
    pub cost_after: u32,
}

/// Step-wise window optimizer over a running solution
pub struct WindowOptimizer {
    solution: Vec<Placement>,
    origins: Vec<Cell>,
    next: usize,
    per_cell_bound: u32,
    limits: SearchLimits,
    stats: WindowStats,
}

impl WindowOptimizer {
    /// Start a pass over `solution` using `per_cell_bound` for every window
    pub fn new(solution: Vec<Placement>, per_cell_bound: u32, limits: SearchLimits) -> Self {
        let cost = total_cost(&solution);
        Self {
            solution,
            origins: window_origins(),
            next: 0,
            per_cell_bound,
            limits,
            stats: WindowStats {
                cost_before: cost,
                cost_after: cost,
                ..WindowStats::default()
            },
        }
    }

    /// Windows not yet processed
    pub fn remaining(&self) -> usize {
        self.origins.len().saturating_sub(self.next)
    }

    /// Re-solve the next window
    ///
    /// Returns whether any windows remain afterwards. A window whose search
    /// is stopped by the limits keeps its bricks unchanged, and so does one
    /// whose capped search comes back more expensive than what it lifted.
    pub fn step(&mut self) -> bool {
        let Some(&origin) = self.origins.get(self.next) else {
            return false;
        };
        self.next += 1;
        self.stats.windows_visited += 1;

        let lifted: Vec<Placement> = self
            .solution
            .iter()
            .copied()
            .filter(|placement| in_window(origin, placement.anchor))
            .collect();

        if !lifted.is_empty() {
            self.stats.windows_searched += 1;
            match solve_with_limits(&coverage(&lifted), self.per_cell_bound, &self.limits) {
                Ok(local) if local.cost <= total_cost(&lifted) => {
                    self.splice(origin, local.placements);
                    self.stats.cost_after = total_cost(&self.solution);
                }
                Ok(_) => {}
                Err(_) => self.stats.windows_aborted += 1,
            }
        }

        self.next < self.origins.len()
    }

    // Replacements take the position of the first lifted brick
    fn splice(&mut self, origin: Cell, replacement: Vec<Placement>) {
        let mut spliced = Vec::with_capacity(self.solution.len() + replacement.len());
        let mut pending = Some(replacement);
        for placement in self.solution.drain(..) {
            if in_window(origin, placement.anchor) {
                if let Some(local) = pending.take() {
                    spliced.extend(local);
                }
            } else {
                spliced.push(placement);
            }
        }
        if let Some(local) = pending {
            spliced.extend(local);
        }
        self.solution = spliced;
    }

    /// Process every remaining window
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Current running solution
    pub fn solution(&self) -> &[Placement] {
        &self.solution
    }

    /// Counters for the windows processed so far
    pub const fn stats(&self) -> WindowStats {
        self.stats
    }

    /// Finish the pass and return the improved solution
    pub fn into_solution(mut self) -> (Vec<Placement>, WindowStats) {
        self.run();
        (self.solution, self.stats)
    }
}

/// Run a complete window pass over `solution`
///
/// The set of covered cells is unchanged by the pass.
pub fn optimize_windows(
    solution: Vec<Placement>,
    per_cell_bound: u32,
    limits: SearchLimits,
) -> (Vec<Placement>, WindowStats) {
    WindowOptimizer::new(solution, per_cell_bound, limits).into_solution()
}
