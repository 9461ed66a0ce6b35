use super::Scorer;
use crate::catalog::DOOR;
use crate::geometry::{euclidean, placement_center, Placement};

#[derive(Debug, Default, Clone, Copy)]
pub struct FlowMetrics {
    pub pairs: f32,
    pub spread: f32,
    pub close_pairs: usize,
}

impl FlowMetrics {
    #[inline(always)]
    pub fn total(&self) -> f32 {
        self.pairs + self.spread
    }
}

/// Reward for command-position furniture sitting near the optimal distance
/// from the first door. Falls off linearly and never goes negative.
pub fn command_position(scorer: &Scorer, placements: &[Placement]) -> f32 {
    let Some(door) = placements.iter().find(|p| p.kind == DOOR) else {
        return 0.0;
    };
    let w = &scorer.weights;
    let optimal = w.command_optimal_fraction * scorer.grid.min_dimension() as f32;
    if optimal <= 0.0 {
        return 0.0;
    }
    let anchor = (door.x as f32, door.y as f32);

    placements
        .iter()
        .filter(|p| scorer.command_types.contains(&p.kind) && !scorer.catalog.is_boundary(&p.kind))
        .map(|p| {
            let d = euclidean(placement_center(&scorer.catalog, scorer.grid, p), anchor);
            let closeness = 1.0 - (d - optimal).abs() / optimal;
            (w.bonus_command_position * closeness).max(0.0)
        })
        .sum()
}

/// Pairwise spacing plus the capped spread bonus.
pub fn analyze_flow(scorer: &Scorer, placements: &[Placement]) -> FlowMetrics {
    let mut m = FlowMetrics::default();
    if placements.len() < 2 {
        return m;
    }

    let w = &scorer.weights;
    let min_dim = scorer.grid.min_dimension() as f32;
    let close = w.flow_close_fraction * min_dim;
    let band = w.flow_band_fraction * min_dim;

    let centers: Vec<(f32, f32)> = placements
        .iter()
        .map(|p| placement_center(&scorer.catalog, scorer.grid, p))
        .collect();

    for i in 0..centers.len() {
        for j in (i + 1)..centers.len() {
            let d = euclidean(centers[i], centers[j]);
            if d < close {
                m.pairs -= w.penalty_flow_close;
                m.close_pairs += 1;
            } else if d <= band {
                m.pairs += w.bonus_flow_band;
            } else {
                m.pairs += w.bonus_flow_far;
            }
        }
    }

    let n = centers.len() as f32;
    let centroid = centers
        .iter()
        .fold((0.0, 0.0), |acc, c| (acc.0 + c.0 / n, acc.1 + c.1 / n));
    let mean = centers.iter().map(|c| euclidean(*c, centroid)).sum::<f32>() / n;
    m.spread = (mean / min_dim * w.spread_scale).min(w.spread_cap);

    m
}
