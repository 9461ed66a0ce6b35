pub mod construct;
pub mod mutation;
pub mod runner;

use self::mutation::mutate_layout;
use crate::config::SearchParams;
use crate::geometry::Placement;
use crate::scorer::Scorer;
use fastrand::Rng;
use tracing::debug;

/// Simulated-annealing state for one search run.
pub struct Annealer<'a> {
    pub scorer: &'a Scorer,
    pub params: &'a SearchParams,
    pub required: &'a [String],

    pub current: Vec<Placement>,
    pub current_score: f32,
    pub best: Vec<Placement>,
    pub best_score: f32,

    pub temperature: f32,
    pub iterations: usize,
    pub no_improvement: usize,
}

impl<'a> Annealer<'a> {
    pub fn new(
        scorer: &'a Scorer,
        params: &'a SearchParams,
        required: &'a [String],
        seed_layout: Vec<Placement>,
    ) -> Self {
        let score = scorer.score(&seed_layout);
        Self {
            scorer,
            params,
            required,
            best: seed_layout.clone(),
            best_score: score,
            current: seed_layout,
            current_score: score,
            temperature: params.initial_temperature,
            iterations: 0,
            no_improvement: 0,
        }
    }

    #[inline(always)]
    pub fn is_done(&self) -> bool {
        self.iterations >= self.params.max_iterations
            || self.no_improvement >= self.params.max_no_improvement
    }

    /// One Metropolis step. Returns true when the neighbour was accepted.
    pub fn step(&mut self, rng: &mut Rng) -> bool {
        let neighbor = mutate_layout(
            &self.scorer.catalog,
            self.scorer.grid,
            &self.current,
            self.required,
            self.params,
            rng,
        );
        let score = self.scorer.score(&neighbor);
        let delta = score - self.current_score;

        let accepted = delta > 0.0
            || (self.temperature > self.params.min_temperature
                && rng.f32() < (delta / self.temperature).exp());

        if score > self.best_score {
            debug!(
                "New best {:.2} at iteration {} (T={:.4})",
                score, self.iterations, self.temperature
            );
            self.best = neighbor.clone();
            self.best_score = score;
            self.no_improvement = 0;
        } else {
            self.no_improvement += 1;
        }

        if accepted {
            self.current = neighbor;
            self.current_score = score;
        }

        self.temperature *= self.params.cooling_rate;
        self.iterations += 1;
        accepted
    }
}
