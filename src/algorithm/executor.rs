use crate::{
    algorithm::search::{SearchLimits, SearchStats, solve_with_limits},
    algorithm::window::{WindowOptimizer, WindowStats},
    io::configuration::{COARSE_BOUND, FINE_BOUND, WINDOW_MAX_EXPANSIONS, WINDOW_MAX_FRONTIER},
    io::error::{Result, invalid_parameter},
    spatial::Mask,
    spatial::Placement,
    spatial::placement::total_cost,
    spatial::shapes::is_admissible,
};

/// Parameters controlling the search and re-optimization passes
#[derive(Clone, Debug)]
pub struct TilingConfig {
    /// Per-cell bound for the initial full-grid solve
    pub coarse_bound: u32,
    /// Per-cell bound for window re-optimization; must be admissible
    pub fine_bound: u32,
    /// Whether to run the window pass at all
    pub optimize: bool,
    /// Limits for the initial full-grid solve
    pub limits: SearchLimits,
    /// Limits for each window search
    ///
    /// An exact window search on a dense region can grow without bound, and a
    /// window that hits its limits simply keeps its bricks.
    pub window_limits: SearchLimits,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            coarse_bound: COARSE_BOUND,
            fine_bound: FINE_BOUND,
            optimize: true,
            limits: SearchLimits::unlimited(),
            window_limits: SearchLimits::unlimited()
                .with_max_expansions(WINDOW_MAX_EXPANSIONS)
                .with_max_frontier(WINDOW_MAX_FRONTIER),
        }
    }
}

impl TilingConfig {
    /// Check parameters before any search runs
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The fine bound overestimates some brick's per-cell cost
    /// - The search limits are inconsistent
    pub fn validate(&self) -> Result<()> {
        if !is_admissible(self.fine_bound) {
            return Err(invalid_parameter(
                "fine_bound",
                &self.fine_bound,
                &"window re-optimization needs a bound no larger than the cheapest per-cell brick cost",
            ));
        }
        self.limits.validate()?;
        self.window_limits.validate()
    }
}

/// Finished tiling of one color
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorTiling {
    /// RGB color the mask was extracted for
    pub color: [u8; 3],
    /// Bricks in discovery order
    pub placements: Vec<Placement>,
    /// Search cost of the initial solve
    pub initial_cost: u32,
    /// Search cost after re-optimization
    pub cost: u32,
    /// Counters from the initial solve
    pub search: SearchStats,
    /// Counters from the window pass, if it ran
    pub windows: Option<WindowStats>,
}

enum Phase {
    Solve,
    Optimize {
        optimizer: WindowOptimizer,
        initial_cost: u32,
        search: SearchStats,
    },
    Done(ColorTiling),
}

/// Drives the solve-then-optimize pipeline for one color mask
///
/// Work is split into steps (one initial solve, then one per window) so
/// callers can report progress between them.
pub struct TilingExecutor {
    color: [u8; 3],
    mask: Mask,
    config: TilingConfig,
    phase: Phase,
    steps_done: usize,
}

impl TilingExecutor {
    /// Prepare the pipeline for one color
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn new(color: [u8; 3], mask: Mask, config: TilingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            color,
            mask,
            config,
            phase: Phase::Solve,
            steps_done: 0,
        })
    }

    /// Steps needed to finish: the solve plus one per window
    pub fn total_steps(&self) -> usize {
        let windows = if self.config.optimize {
            crate::algorithm::window::window_origins().len()
        } else {
            0
        };
        1 + windows
    }

    /// Steps completed so far
    pub const fn steps_done(&self) -> usize {
        self.steps_done
    }

    /// Execute the next step
    ///
    /// Returns whether more steps remain.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial solve is aborted by the search limits
    pub fn execute_step(&mut self) -> Result<bool> {
        let phase = std::mem::replace(&mut self.phase, Phase::Solve);
        self.phase = match phase {
            Phase::Solve => {
                let solution =
                    solve_with_limits(&self.mask, self.config.coarse_bound, &self.config.limits)?;
                if self.config.optimize {
                    Phase::Optimize {
                        optimizer: WindowOptimizer::new(
                            solution.placements,
                            self.config.fine_bound,
                            self.config.window_limits.clone(),
                        ),
                        initial_cost: solution.cost,
                        search: solution.stats,
                    }
                } else {
                    Phase::Done(ColorTiling {
                        color: self.color,
                        placements: solution.placements,
                        initial_cost: solution.cost,
                        cost: solution.cost,
                        search: solution.stats,
                        windows: None,
                    })
                }
            }
            Phase::Optimize {
                mut optimizer,
                initial_cost,
                search,
            } => {
                if optimizer.step() {
                    Phase::Optimize {
                        optimizer,
                        initial_cost,
                        search,
                    }
                } else {
                    let (placements, windows) = optimizer.into_solution();
                    Phase::Done(ColorTiling {
                        color: self.color,
                        cost: total_cost(&placements),
                        placements,
                        initial_cost,
                        search,
                        windows: Some(windows),
                    })
                }
            }
            done @ Phase::Done(_) => return self.park(done),
        };
        self.steps_done += 1;
        Ok(!matches!(self.phase, Phase::Done(_)))
    }

    fn park(&mut self, done: Phase) -> Result<bool> {
        self.phase = done;
        Ok(false)
    }

    /// Run any remaining steps and return the finished tiling
    ///
    /// # Errors
    ///
    /// Returns an error if the initial solve is aborted by the search limits
    pub fn finish(mut self) -> Result<ColorTiling> {
        while self.execute_step()? {}
        match self.phase {
            Phase::Done(tiling) => Ok(tiling),
            Phase::Solve | Phase::Optimize { .. } => Err(invalid_parameter(
                "phase",
                &"incomplete",
                &"tiling pipeline stopped before finishing",
            )),
        }
    }
}

/// Tile one color mask with the given configuration
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the initial solve is
/// aborted by the search limits
pub fn tile_mask(color: [u8; 3], mask: Mask, config: &TilingConfig) -> Result<ColorTiling> {
    TilingExecutor::new(color, mask, config.clone())?.finish()
}
