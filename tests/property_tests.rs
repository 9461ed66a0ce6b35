use fengshui::catalog::ObjectCatalog;
use fengshui::config::Config;
use fengshui::geometry::{boundary_wall, objects_overlap, Grid, Placement, Wall};
use fengshui::optimizer::runner::{NoProgress, OptimizationOptions, Optimizer};
use fengshui::scorer::Scorer;
use proptest::prelude::*;
use std::sync::Arc;

// --- STRATEGIES ---

prop_compose! {
    fn arb_grid()(width in 40i32..200, height in 40i32..200) -> Grid {
        Grid::new(width, height).unwrap()
    }
}

prop_compose! {
    fn arb_objects()(
        kinds in proptest::collection::vec(
            prop_oneof![Just("bed"), Just("desk"), Just("door"), Just("window")],
            1..6
        )
    ) -> Vec<String> {
        kinds.into_iter().map(String::from).collect()
    }
}

prop_compose! {
    fn arb_placement()(
        kind in prop_oneof![Just("bed"), Just("desk"), Just("door"), Just("window"), Just("lamp")],
        x in -10i32..220,
        y in -10i32..220
    ) -> Placement {
        Placement::new(kind, x, y)
    }
}

fn quick_config() -> Config {
    let mut config = Config::default();
    config.search.max_iterations = 60;
    config.search.max_no_improvement = 30;
    config
}

fn span_fits(catalog: &ObjectCatalog, grid: Grid, p: &Placement) -> bool {
    let span = catalog.boundary_span(&p.kind);
    match boundary_wall(catalog, grid, p) {
        Some(Wall::Left) | Some(Wall::Right) => p.y + span <= grid.height,
        Some(Wall::Top) | Some(Wall::Bottom) => p.x + span <= grid.width,
        None => false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_search_output_is_well_formed(
        grid in arb_grid(),
        objects in arb_objects(),
        seed in any::<u64>()
    ) {
        let catalog = Arc::new(ObjectCatalog::standard());
        let config = quick_config();
        let scorer = Arc::new(Scorer::new(grid, catalog.clone(), &config));
        let optimizer = Optimizer::new(scorer.clone(), OptimizationOptions::from(&config));

        let result = optimizer.run(&objects, Some(seed), &NoProgress).unwrap();
        prop_assert_eq!(result.placements.len(), objects.len());
        prop_assert!(result.score.is_finite());
        prop_assert_eq!(result.score, scorer.score(&result.placements));

        // Only a layout free of hard violations makes these promises
        if result.score > config.search.fallback_score_threshold {
            for p in result.placements.iter().filter(|p| catalog.is_boundary(&p.kind)) {
                prop_assert!(grid.is_edge_cell(p.x, p.y), "{:?} is not on a wall", p);
                prop_assert!(span_fits(&catalog, grid, p), "{:?} runs past the wall", p);
            }
            for (i, a) in result.placements.iter().enumerate() {
                for b in &result.placements[i + 1..] {
                    prop_assert!(!objects_overlap(&catalog, a, b));
                }
            }
        }
    }

    #[test]
    fn test_scoring_is_pure(
        placements in proptest::collection::vec(arb_placement(), 0..8),
        grid in arb_grid()
    ) {
        let scorer = Scorer::new(grid, Arc::new(ObjectCatalog::standard()), &Config::default());
        let first = scorer.score(&placements);
        prop_assert_eq!(first, scorer.score(&placements));
        prop_assert!(first.is_finite());

        let details = scorer.score_details(&placements);
        prop_assert_eq!(details.layout_score, first);
        prop_assert_eq!(details.stat_objects as usize, placements.len());
    }
}
