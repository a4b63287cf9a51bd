//! Tests for sliding-window re-optimization

#[cfg(test)]
mod tests {
    use bricktile::algorithm::search::{SearchLimits, solve};
    use bricktile::algorithm::window::{
        WindowOptimizer, in_window, optimize_windows, window_origins,
    };
    use bricktile::io::configuration::{COARSE_BOUND, FINE_BOUND};
    use bricktile::spatial::mask::{Cell, Mask};
    use bricktile::spatial::placement::{coverage, is_disjoint, total_cost};
    use bricktile::spatial::{Placement, Shape};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    fn units(cells: &[(usize, usize)]) -> Vec<Placement> {
        cells
            .iter()
            .map(|&(row, col)| Placement::new(Shape::Unit, Cell::new(row, col)))
            .collect()
    }

    // Tests the window grid layout and visiting order
    // Verified by iterating columns in the outer loop
    #[test]
    fn test_window_origins() {
        let origins = window_origins();
        assert_eq!(origins.len(), 256);
        assert_eq!(origins.first(), Some(&Cell::new(0, 0)));
        assert_eq!(origins.get(1), Some(&Cell::new(0, 4)));
        assert_eq!(origins.get(16), Some(&Cell::new(4, 0)));
        assert_eq!(origins.last(), Some(&Cell::new(60, 60)));
    }

    // Tests the window membership test on all four edges
    // Verified by using an inclusive upper bound
    #[test]
    fn test_in_window() {
        let origin = Cell::new(4, 8);
        assert!(in_window(origin, Cell::new(4, 8)));
        assert!(in_window(origin, Cell::new(11, 15)));
        assert!(!in_window(origin, Cell::new(12, 8)));
        assert!(!in_window(origin, Cell::new(4, 16)));
        assert!(!in_window(origin, Cell::new(3, 9)));
    }

    // Tests that scattered unit bricks merge into one large block
    // Verified by discarding the local solution
    #[test]
    fn test_units_merge_into_block() {
        let cells: Vec<(usize, usize)> = (0..4)
            .flat_map(|row| (0..4).map(move |col| (row, col)))
            .collect();
        let (placements, stats) =
            optimize_windows(units(&cells), FINE_BOUND, SearchLimits::unlimited());

        assert_eq!(
            placements,
            vec![Placement::new(Shape::Block4, Cell::new(0, 0))]
        );
        assert_eq!(stats.cost_before, 16 * 54);
        assert_eq!(stats.cost_after, 160);
        assert_eq!(stats.windows_visited, 256);
        assert_eq!(stats.windows_aborted, 0);
    }

    // Tests that replacements take the place of the first lifted brick
    // Verified by appending replacements at the end
    #[test]
    fn test_splice_position() {
        let solution = units(&[(20, 20), (0, 0), (0, 1), (30, 30)]);
        let (placements, _) = optimize_windows(solution, FINE_BOUND, SearchLimits::unlimited());
        assert_eq!(
            placements,
            vec![
                Placement::new(Shape::Unit, Cell::new(20, 20)),
                Placement::new(Shape::Horizontal2, Cell::new(0, 0)),
                Placement::new(Shape::Unit, Cell::new(30, 30)),
            ]
        );
    }

    // Tests that windows without bricks are skipped
    // Verified by counting every visited window as searched
    #[test]
    fn test_empty_windows_skipped() {
        let mut optimizer =
            WindowOptimizer::new(units(&[(0, 0)]), FINE_BOUND, SearchLimits::unlimited());
        assert_eq!(optimizer.remaining(), 256);
        assert!(optimizer.step());
        assert_eq!(optimizer.remaining(), 255);
        optimizer.run();
        assert_eq!(optimizer.remaining(), 0);
        assert!(!optimizer.step());

        let stats = optimizer.stats();
        assert_eq!(stats.windows_visited, 256);
        assert_eq!(stats.windows_searched, 1);
    }

    // Tests that aborted windows keep their bricks
    // Verified by clearing lifted bricks before the search result is known
    #[test]
    fn test_aborted_window_keeps_bricks() {
        let solution = units(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        let limits = SearchLimits::unlimited().with_cancel_flag(Arc::new(AtomicBool::new(true)));
        let (placements, stats) = optimize_windows(solution.clone(), FINE_BOUND, limits);
        assert_eq!(placements, solution);
        assert_eq!(stats.windows_aborted, stats.windows_searched);
        assert_eq!(stats.cost_after, stats.cost_before);
    }

    // Tests that the pass preserves coverage and never raises cost
    // Verified by re-solving windows with the coarse bound
    #[test]
    fn test_pass_preserves_coverage_and_cost() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..5 {
            let mut mask = Mask::empty();
            for row in 0..5 {
                for col in 0..5 {
                    if rng.random_bool(0.6) {
                        mask.set(Cell::new(row + 14, col + 6), true);
                    }
                }
            }
            let initial = solve(&mask, COARSE_BOUND).expect("search succeeds");
            let (placements, stats) =
                optimize_windows(initial.placements, FINE_BOUND, SearchLimits::unlimited());

            assert_eq!(coverage(&placements), mask);
            assert!(is_disjoint(&placements));
            assert!(total_cost(&placements) <= initial.cost);
            assert_eq!(stats.cost_after, total_cost(&placements));
        }
    }

    // Tests that capped window searches never trade bricks for dearer ones
    // Verified by splicing every successful window result
    #[test]
    fn test_capped_windows_never_raise_cost() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut mask = Mask::empty();
        for row in 0..12 {
            for col in 0..12 {
                if rng.random_bool(0.8) {
                    mask.set(Cell::new(row, col), true);
                }
            }
        }
        let initial = solve(&mask, COARSE_BOUND).expect("search succeeds");
        let limits = SearchLimits::unlimited().with_max_frontier(1);
        let (placements, stats) = optimize_windows(initial.placements, FINE_BOUND, limits);

        assert_eq!(coverage(&placements), mask);
        assert!(is_disjoint(&placements));
        assert!(total_cost(&placements) <= initial.cost);
        assert_eq!(stats.windows_aborted, 0);
    }

    // Tests that an exhausted expansion budget keeps the lifted bricks
    // Verified by treating the budget as a frontier cap
    #[test]
    fn test_expansion_budget_keeps_bricks() {
        let solution = units(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        let limits = SearchLimits::unlimited().with_max_expansions(1);
        let (placements, stats) = optimize_windows(solution.clone(), FINE_BOUND, limits);
        assert_eq!(placements, solution);
        assert!(stats.windows_aborted > 0);
        assert_eq!(stats.cost_after, stats.cost_before);
    }

    // Tests that a solid square stays a set of large blocks
    // Verified by splicing replacements twice
    #[test]
    fn test_solid_square() {
        let mask = Mask::from_ascii(&[
            "########", "########", "########", "########", "########", "########", "########",
            "########",
        ]);
        let initial = solve(&mask, COARSE_BOUND).expect("search succeeds");
        let (placements, _) =
            optimize_windows(initial.placements, FINE_BOUND, SearchLimits::unlimited());
        assert_eq!(placements.len(), 4);
        assert!(placements.iter().all(|p| p.shape == Shape::Block4));
        assert_eq!(total_cost(&placements), 640);
    }
}
