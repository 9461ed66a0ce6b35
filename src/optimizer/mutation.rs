use super::construct::{ensure_complete, random_candidate, Sampling};
use crate::catalog::ObjectCatalog;
use crate::config::SearchParams;
use crate::geometry::{boundary_wall, is_position_valid, objects_overlap, Grid, Placement, Wall};
use fastrand::Rng;

// Chance that a mutated boundary jumps to a fresh wall instead of sliding.
const WALL_HOP_RATE: f32 = 0.1;

#[inline(always)]
fn offset(step: i32, rng: &mut Rng) -> i32 {
    rng.i32(-step..=step)
}

/// Bounded random offset for one placement. Furniture stays inside the
/// grid; boundaries slide along their wall.
pub fn perturb(
    catalog: &ObjectCatalog,
    grid: Grid,
    p: &Placement,
    step: i32,
    rng: &mut Rng,
) -> Placement {
    if catalog.is_boundary(&p.kind) {
        let span = catalog.boundary_span(&p.kind);
        let max_y = (grid.height - span).max(0);
        let max_x = (grid.width - span).max(0);
        return match boundary_wall(catalog, grid, p) {
            Some(Wall::Left) | Some(Wall::Right) => {
                Placement::new(p.kind.as_str(), p.x, (p.y + offset(step, rng)).clamp(0, max_y))
            }
            Some(Wall::Top) | Some(Wall::Bottom) => {
                Placement::new(p.kind.as_str(), (p.x + offset(step, rng)).clamp(0, max_x), p.y)
            }
            None => {
                let (x, y) = random_candidate(catalog, grid, &p.kind, Sampling::WallBiased, rng);
                Placement::new(p.kind.as_str(), x, y)
            }
        };
    }

    let (w, h) = catalog.footprint(&p.kind);
    let nx = (p.x + offset(step, rng)).clamp(0, (grid.width - w).max(0));
    let ny = (p.y + offset(step, rng)).clamp(0, (grid.height - h).max(0));
    Placement::new(p.kind.as_str(), nx, ny)
}

fn fits_among<'a>(
    catalog: &ObjectCatalog,
    grid: Grid,
    candidate: &Placement,
    mut others: impl Iterator<Item = &'a Placement>,
) -> bool {
    is_position_valid(catalog, grid, candidate.x, candidate.y, &candidate.kind)
        && others.all(|o| !objects_overlap(catalog, candidate, o))
}

/// One neighbour of `current`. Each placement moves with probability
/// `mutation_rate`; a move sticks only if it stays valid against every
/// other placement. Returns `current` unchanged when no attempt moved
/// anything.
pub fn mutate_layout(
    catalog: &ObjectCatalog,
    grid: Grid,
    current: &[Placement],
    required: &[String],
    params: &SearchParams,
    rng: &mut Rng,
) -> Vec<Placement> {
    for _ in 0..params.mutation_retries.max(1) {
        let mut next: Vec<Placement> = Vec::with_capacity(current.len());
        let mut moved = false;

        for (i, p) in current.iter().enumerate() {
            if rng.f32() >= params.mutation_rate {
                next.push(p.clone());
                continue;
            }

            let candidate = if catalog.is_boundary(&p.kind) && rng.f32() < WALL_HOP_RATE {
                let (x, y) = random_candidate(catalog, grid, &p.kind, Sampling::WallBiased, rng);
                Placement::new(p.kind.as_str(), x, y)
            } else {
                perturb(catalog, grid, p, params.mutation_step, rng)
            };

            let others = next.iter().chain(current[i + 1..].iter());
            if candidate != *p && fits_among(catalog, grid, &candidate, others) {
                moved = true;
                next.push(candidate);
            } else {
                next.push(p.clone());
            }
        }

        if moved {
            ensure_complete(catalog, grid, &mut next, required, 0, rng);
            return next;
        }
    }

    current.to_vec()
}
