use crate::catalog::{ObjectCatalog, DESK};
use crate::geometry::{
    add_occupied_positions, check_object_collision, is_position_valid, Grid, OccupiedSet,
    Placement,
};
use fastrand::Rng;
use tracing::{debug, warn};

/// Where random anchors are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// Furniture anywhere its footprint fits; boundaries along a random wall.
    WallBiased,
    /// Any cell of the grid, for every type.
    Uniform,
}

/// One random anchor for `kind`. Never panics on grids smaller than the
/// footprint; such anchors simply fail validation.
pub fn random_candidate(
    catalog: &ObjectCatalog,
    grid: Grid,
    kind: &str,
    sampling: Sampling,
    rng: &mut Rng,
) -> (i32, i32) {
    if sampling == Sampling::Uniform {
        return (rng.i32(0..grid.width), rng.i32(0..grid.height));
    }

    if catalog.is_boundary(kind) {
        let span = catalog.boundary_span(kind);
        let along_h = (grid.height - span).max(0);
        let along_w = (grid.width - span).max(0);
        return match rng.u8(0..4) {
            0 => (0, rng.i32(0..=along_h)),
            1 => (grid.width - 1, rng.i32(0..=along_h)),
            2 => (rng.i32(0..=along_w), 0),
            _ => (rng.i32(0..=along_w), grid.height - 1),
        };
    }

    let (w, h) = catalog.footprint(kind);
    (
        rng.i32(0..=(grid.width - w).max(0)),
        rng.i32(0..=(grid.height - h).max(0)),
    )
}

/// Tries `attempts` random anchors for `kind` against the committed cells.
/// Falls back to the origin, and still claims the cells there.
pub fn place_one(
    catalog: &ObjectCatalog,
    grid: Grid,
    kind: &str,
    attempts: usize,
    sampling: Sampling,
    occupied: &mut OccupiedSet,
    rng: &mut Rng,
) -> Placement {
    for _ in 0..attempts {
        let (x, y) = random_candidate(catalog, grid, kind, sampling, rng);
        if is_position_valid(catalog, grid, x, y, kind)
            && !check_object_collision(catalog, x, y, kind, occupied)
        {
            add_occupied_positions(catalog, x, y, kind, occupied);
            debug!("Placed {} at ({}, {})", kind, x, y);
            return Placement::new(kind, x, y);
        }
    }

    warn!(
        "Could not place {} after {} attempts; forcing it to (0, 0)",
        kind, attempts
    );
    add_occupied_positions(catalog, 0, 0, kind, occupied);
    Placement::at_origin(kind)
}

/// Seed layout for the search. Desks are placed first; the result keeps
/// the requested order and always has one placement per requested type.
pub fn construct_layout(
    catalog: &ObjectCatalog,
    grid: Grid,
    objects: &[String],
    attempts: usize,
    rng: &mut Rng,
) -> Vec<Placement> {
    let mut order: Vec<usize> = (0..objects.len()).collect();
    order.sort_by_key(|&i| objects[i] != DESK);

    let mut occupied = OccupiedSet::new();
    let mut slots: Vec<Option<Placement>> = vec![None; objects.len()];
    for i in order {
        slots[i] = Some(place_one(
            catalog,
            grid,
            &objects[i],
            attempts,
            Sampling::WallBiased,
            &mut occupied,
            rng,
        ));
    }

    slots
        .into_iter()
        .zip(objects)
        .map(|(slot, kind)| slot.unwrap_or_else(|| Placement::at_origin(kind.as_str())))
        .collect()
}

/// Unguided placement: uniform anchors, first valid one wins.
pub fn generate_random_layout(
    catalog: &ObjectCatalog,
    grid: Grid,
    objects: &[String],
    attempts: usize,
    rng: &mut Rng,
) -> Vec<Placement> {
    let mut occupied = OccupiedSet::new();
    objects
        .iter()
        .map(|kind| {
            place_one(
                catalog,
                grid,
                kind,
                attempts,
                Sampling::Uniform,
                &mut occupied,
                rng,
            )
        })
        .collect()
}

/// Adds any requested type missing from `placements`. With `attempts == 0`
/// the missing types go straight to the origin.
pub fn ensure_complete(
    catalog: &ObjectCatalog,
    grid: Grid,
    placements: &mut Vec<Placement>,
    required: &[String],
    attempts: usize,
    rng: &mut Rng,
) {
    let mut present: Vec<&str> = placements.iter().map(|p| p.kind.as_str()).collect();
    let mut missing = Vec::new();
    for kind in required {
        match present.iter().position(|k| *k == kind.as_str()) {
            Some(idx) => {
                present.swap_remove(idx);
            }
            None => missing.push(kind.clone()),
        }
    }
    if missing.is_empty() {
        return;
    }

    let mut occupied = OccupiedSet::new();
    for p in placements.iter() {
        add_occupied_positions(catalog, p.x, p.y, &p.kind, &mut occupied);
    }
    for kind in missing {
        debug!("Re-inserting missing {}", kind);
        let p = place_one(
            catalog,
            grid,
            &kind,
            attempts,
            Sampling::WallBiased,
            &mut occupied,
            rng,
        );
        placements.push(p);
    }
}
