use super::construct::{construct_layout, ensure_complete};
use super::Annealer;
use crate::catalog::ObjectCatalog;
use crate::config::{Config, SearchParams};
use crate::error::{FengShuiError, FsResult};
use crate::geometry::{
    add_occupied_positions, check_object_collision, is_layout_valid, is_position_valid,
    objects_overlap, Grid, OccupiedSet, Placement,
};
use crate::scorer::Scorer;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct OptimizationOptions {
    pub search: SearchParams,
}

impl From<&Config> for OptimizationOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            search: cfg.search.clone(),
        }
    }
}

/// How the returned layout was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchStrategy {
    Annealed,
    /// A search over a shortened object list won; the dropped types were
    /// re-inserted afterwards.
    Reduced { dropped: usize },
    /// Corner/center/origin placement after every search stayed catastrophic.
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub placements: Vec<Placement>,
    pub score: f32,
    pub initial_score: f32,
    pub iterations: usize,
    pub strategy: SearchStrategy,
}

/// Receives updates during the annealing loop.
/// Returning false aborts the current search.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, iteration: usize, best_score: f32, temperature: f32) -> bool;
}

pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _: usize, _: f32, _: f32) -> bool {
        true
    }
}

pub struct Optimizer {
    scorer: Arc<Scorer>,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(scorer: Arc<Scorer>, options: OptimizationOptions) -> Self {
        Self { scorer, options }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn run<CB: ProgressCallback>(
        &self,
        objects: &[String],
        seed: Option<u64>,
        callback: &CB,
    ) -> FsResult<OptimizationResult> {
        if objects.is_empty() {
            return Err(FengShuiError::InvalidInput(
                "objects_to_place must not be empty".to_string(),
            ));
        }

        let mut rng = if let Some(s) = seed {
            Rng::with_seed(s)
        } else {
            Rng::new()
        };
        let opts = &self.options.search;
        let catalog = &self.scorer.catalog;
        let grid = self.scorer.grid;

        info!(
            "Optimizing {} objects on a {}x{} grid",
            objects.len(),
            grid.width,
            grid.height
        );

        let mut result = self.anneal(objects, &mut rng, callback);

        // Shrink-and-retry: drop the last requested type while the result
        // stays catastrophic.
        let mut requested = objects.to_vec();
        let mut attempts = 0;
        while result.score < opts.fallback_score_threshold
            && attempts < opts.max_fallback_attempts
            && requested.len() > 1
        {
            requested.pop();
            attempts += 1;
            warn!(
                "Score {:.1} is catastrophic; retrying with {} objects",
                result.score,
                requested.len()
            );
            let reduced = self.anneal(&requested, &mut rng, callback);
            if reduced.score > result.score {
                result = OptimizationResult {
                    strategy: SearchStrategy::Reduced {
                        dropped: objects.len() - requested.len(),
                    },
                    ..reduced
                };
            }
        }

        if result.score < opts.fallback_score_threshold {
            warn!(
                "Search stayed catastrophic ({:.1}); using corner fallback layout",
                result.score
            );
            result.placements = fallback_layout(catalog, grid, objects);
            result.strategy = SearchStrategy::Fallback;
        }

        ensure_complete(
            catalog,
            grid,
            &mut result.placements,
            objects,
            opts.construct_attempts,
            &mut rng,
        );
        if !is_layout_valid(catalog, grid, &result.placements) {
            debug!("Final layout failed validation; repairing overlaps");
            repair_overlaps(catalog, grid, &mut result.placements, opts.repair_offset);
        }
        result.score = self.scorer.score(&result.placements);

        info!(
            "Search finished after {} iterations: score {:.2} (seed {:.2}, {:?})",
            result.iterations, result.score, result.initial_score, result.strategy
        );
        Ok(result)
    }

    fn anneal<CB: ProgressCallback>(
        &self,
        objects: &[String],
        rng: &mut Rng,
        callback: &CB,
    ) -> OptimizationResult {
        let opts = &self.options.search;
        let seed_layout = construct_layout(
            &self.scorer.catalog,
            self.scorer.grid,
            objects,
            opts.construct_attempts,
            rng,
        );

        let mut annealer = Annealer::new(&self.scorer, opts, objects, seed_layout);
        let initial_score = annealer.current_score;
        debug!("Seed layout scored {:.2}", initial_score);

        while !annealer.is_done() {
            annealer.step(rng);
            if !callback.on_progress(
                annealer.iterations,
                annealer.best_score,
                annealer.temperature,
            ) {
                debug!("Search aborted by caller at iteration {}", annealer.iterations);
                break;
            }
        }

        if annealer.no_improvement >= opts.max_no_improvement {
            debug!(
                "No improvement for {} iterations; stopping at {}",
                annealer.no_improvement, annealer.iterations
            );
        }

        OptimizationResult {
            placements: annealer.best,
            score: annealer.best_score,
            initial_score,
            iterations: annealer.iterations,
            strategy: SearchStrategy::Annealed,
        }
    }
}

fn fallback_anchors(catalog: &ObjectCatalog, grid: Grid, kind: &str) -> Vec<(i32, i32)> {
    let (w, h) = if catalog.is_boundary(kind) {
        (1, 1)
    } else {
        catalog.footprint(kind)
    };
    let right = (grid.width - w).max(0);
    let bottom = (grid.height - h).max(0);
    vec![
        (0, 0),
        (right, 0),
        (0, bottom),
        (right, bottom),
        (right / 2, bottom / 2),
    ]
}

/// Deterministic layout: corners in turn, then the center, then the origin.
pub fn fallback_layout(catalog: &ObjectCatalog, grid: Grid, objects: &[String]) -> Vec<Placement> {
    let mut occupied = OccupiedSet::new();
    objects
        .iter()
        .map(|kind| {
            let (x, y) = fallback_anchors(catalog, grid, kind)
                .into_iter()
                .find(|&(x, y)| {
                    is_position_valid(catalog, grid, x, y, kind)
                        && !check_object_collision(catalog, x, y, kind, &occupied)
                })
                .unwrap_or((0, 0));
            add_occupied_positions(catalog, x, y, kind, &mut occupied);
            Placement::new(kind.as_str(), x, y)
        })
        .collect()
}

/// Shifts the later of each overlapping furniture pair by `offset` cells on
/// both axes, clamped to the grid.
pub fn repair_overlaps(
    catalog: &ObjectCatalog,
    grid: Grid,
    placements: &mut [Placement],
    offset: i32,
) {
    for j in 1..placements.len() {
        let collides = (0..j).any(|i| objects_overlap(catalog, &placements[i], &placements[j]));
        if !collides {
            continue;
        }
        let (w, h) = catalog.footprint(&placements[j].kind);
        let p = &mut placements[j];
        let nx = (p.x + offset).clamp(0, (grid.width - w).max(0));
        let ny = (p.y + offset).clamp(0, (grid.height - h).max(0));
        warn!(
            "Repairing overlap: moving {} from ({}, {}) to ({}, {})",
            p.kind, p.x, p.y, nx, ny
        );
        p.x = nx;
        p.y = ny;
    }
}
