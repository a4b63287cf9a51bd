//! Tests for the per-color solve and re-optimization pipeline

#[cfg(test)]
mod tests {
    use bricktile::AlgorithmError;
    use bricktile::algorithm::executor::{TilingConfig, TilingExecutor, tile_mask};
    use bricktile::algorithm::search::SearchLimits;
    use bricktile::io::configuration::{
        COARSE_BOUND, FINE_BOUND, WINDOW_MAX_EXPANSIONS, WINDOW_MAX_FRONTIER,
    };
    use bricktile::spatial::Mask;
    use bricktile::spatial::placement::{coverage, total_cost};
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    fn sample_mask() -> Mask {
        Mask::from_ascii(&["", "", "..######", "..#..#", "..####", "....##"])
    }

    // Tests the default configuration values
    // Verified by swapping the coarse and fine defaults
    #[test]
    fn test_default_config() {
        let config = TilingConfig::default();
        assert_eq!(config.coarse_bound, COARSE_BOUND);
        assert_eq!(config.fine_bound, FINE_BOUND);
        assert!(config.optimize);
        assert!(config.validate().is_ok());
        assert_eq!(config.limits.max_expansions, None);
        assert_eq!(config.limits.max_frontier, None);
        assert_eq!(config.window_limits.max_expansions, Some(WINDOW_MAX_EXPANSIONS));
        assert_eq!(config.window_limits.max_frontier, Some(WINDOW_MAX_FRONTIER));
    }

    // Tests that window limits leave the initial solve untouched
    // Verified by passing the window limits to the initial solve
    #[test]
    fn test_window_limits_only_bind_windows() {
        let config = TilingConfig {
            window_limits: SearchLimits::unlimited().with_max_expansions(1),
            ..TilingConfig::default()
        };
        let tiling = tile_mask([0, 0, 0], sample_mask(), &config).expect("pipeline finishes");
        let windows = tiling.windows.expect("window pass ran");
        assert!(windows.windows_aborted > 0);
        assert_eq!(windows.windows_aborted, windows.windows_searched);
        assert_eq!(tiling.cost, tiling.initial_cost);
        assert_eq!(coverage(&tiling.placements), sample_mask());
    }

    // Tests that zero-width window frontiers are rejected up front
    // Verified by validating only the initial solve limits
    #[test]
    fn test_invalid_window_limits_rejected() {
        let config = TilingConfig {
            window_limits: SearchLimits::unlimited().with_max_frontier(0),
            ..TilingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AlgorithmError::InvalidParameter {
                parameter: "max_frontier",
                ..
            })
        ));
    }

    // Tests that an overestimating fine bound is rejected up front
    // Verified by skipping the admissibility check in validate
    #[test]
    fn test_inadmissible_fine_bound_rejected() {
        let config = TilingConfig {
            fine_bound: 11,
            ..TilingConfig::default()
        };
        let result = TilingExecutor::new([0, 0, 0], sample_mask(), config);
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidParameter {
                parameter: "fine_bound",
                ..
            })
        ));
    }

    // Tests that stepping covers the solve and every window
    // Verified by counting the solve step twice
    #[test]
    fn test_step_count() {
        let mut executor =
            TilingExecutor::new([1, 2, 3], sample_mask(), TilingConfig::default())
                .expect("valid config");
        let total = executor.total_steps();
        assert_eq!(total, 257);

        while executor.execute_step().expect("step succeeds") {}
        assert_eq!(executor.steps_done(), total);
        assert!(!executor.execute_step().expect("finished executor is idle"));
        assert_eq!(executor.steps_done(), total);

        let tiling = executor.finish().expect("pipeline finishes");
        assert_eq!(tiling.color, [1, 2, 3]);
        assert!(tiling.windows.is_some());
    }

    // Tests the pipeline result covers the mask and does not cost more
    // Verified by reporting the initial cost as the final cost
    #[test]
    fn test_tile_mask() {
        let mask = sample_mask();
        let tiling = tile_mask([9, 9, 9], mask.clone(), &TilingConfig::default())
            .expect("pipeline finishes");
        assert_eq!(coverage(&tiling.placements), mask);
        assert_eq!(tiling.cost, total_cost(&tiling.placements));
        assert!(tiling.cost <= tiling.initial_cost);
        assert!(tiling.search.nodes_expanded > 0);
    }

    // Tests that the window pass can be switched off
    // Verified by ignoring the optimize flag
    #[test]
    fn test_without_optimization() {
        let config = TilingConfig {
            optimize: false,
            ..TilingConfig::default()
        };
        let executor =
            TilingExecutor::new([0, 0, 0], sample_mask(), config).expect("valid config");
        assert_eq!(executor.total_steps(), 1);
        let tiling = executor.finish().expect("pipeline finishes");
        assert!(tiling.windows.is_none());
        assert_eq!(tiling.cost, tiling.initial_cost);
    }

    // Tests that an aborted initial solve is reported
    // Verified by falling back to an empty tiling on abort
    #[test]
    fn test_aborted_solve() {
        let config = TilingConfig {
            limits: SearchLimits::unlimited().with_cancel_flag(Arc::new(AtomicBool::new(true))),
            ..TilingConfig::default()
        };
        let result = tile_mask([0, 0, 0], sample_mask(), &config);
        assert!(matches!(result, Err(AlgorithmError::SearchAborted { .. })));
    }
}
