use super::{Scorer, Violation};
use crate::catalog::{BED, DOOR, WINDOW};
use crate::geometry::{
    boundary_wall, euclidean, objects_overlap, placement_rect, wall_contact, wall_distance,
    Placement,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct NamedPenalties {
    pub floating: f32,
    pub corner: f32,
    pub bed_corner: f32,
    pub door_bed_foot: f32,
    pub window_door: f32,
    pub bed_window: f32,
    pub door_facing_bed: f32,
    pub door_clearance: f32,
    pub floating_count: usize,
}

impl NamedPenalties {
    pub fn total(&self) -> f32 {
        self.floating
            + self.corner
            + self.bed_corner
            + self.door_bed_foot
            + self.window_door
            + self.bed_window
            + self.door_facing_bed
            + self.door_clearance
    }
}

#[inline(always)]
fn anchor(p: &Placement) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

fn is_door_blocked_by(scorer: &Scorer, door: &Placement, furniture: &Placement) -> bool {
    let radius = scorer.weights.door_block_radius;
    let (gx, gy) = placement_rect(&scorer.catalog, furniture).gap_to(door.x, door.y);
    gx <= radius && gy <= radius
}

fn furniture<'a>(scorer: &'a Scorer, placements: &'a [Placement]) -> impl Iterator<Item = &'a Placement> {
    placements
        .iter()
        .filter(|p| !scorer.catalog.is_boundary(&p.kind))
}

/// Checks bounds, then overlap, then blocked doors, and reports the first
/// class that fires.
pub fn find_violation(scorer: &Scorer, placements: &[Placement]) -> Option<Violation> {
    if furniture(scorer, placements)
        .any(|p| !scorer.grid.contains_rect(&placement_rect(&scorer.catalog, p)))
    {
        return Some(Violation::OutOfBounds);
    }

    if overlap_count(scorer, placements) > 0 {
        return Some(Violation::Overlap);
    }

    if blocked_door_count(scorer, placements) > 0 {
        return Some(Violation::DoorBlocked);
    }

    None
}

pub fn overlap_count(scorer: &Scorer, placements: &[Placement]) -> usize {
    let mut count = 0;
    for (i, a) in placements.iter().enumerate() {
        for b in &placements[i + 1..] {
            if objects_overlap(&scorer.catalog, a, b) {
                count += 1;
            }
        }
    }
    count
}

/// Door/furniture pairs where the furniture crowds the door anchor.
pub fn blocked_door_count(scorer: &Scorer, placements: &[Placement]) -> usize {
    placements
        .iter()
        .filter(|p| p.kind == DOOR)
        .map(|door| {
            furniture(scorer, placements)
                .filter(|f| is_door_blocked_by(scorer, door, f))
                .count()
        })
        .sum()
}

pub fn named_penalties(scorer: &Scorer, placements: &[Placement]) -> NamedPenalties {
    let w = &scorer.weights;
    let catalog = &scorer.catalog;
    let grid = scorer.grid;
    let mut n = NamedPenalties::default();

    let doors: Vec<&Placement> = placements.iter().filter(|p| p.kind == DOOR).collect();
    let windows: Vec<&Placement> = placements.iter().filter(|p| p.kind == WINDOW).collect();

    for p in furniture(scorer, placements) {
        let rect = placement_rect(catalog, p);
        let contact = wall_contact(grid, &rect);
        let is_bed = p.kind == BED;

        if !contact.any() {
            let dist = wall_distance(grid, &rect);
            let tier = if dist <= w.floating_near_distance {
                0.5
            } else if dist <= w.floating_far_distance {
                1.0
            } else {
                2.0
            };
            n.floating -= w.penalty_floating * tier;
            if is_bed {
                n.floating -= w.penalty_bed_off_wall;
            }
            n.floating_count += 1;
        }

        if contact.is_corner() {
            n.corner += w.bonus_corner;
            if is_bed {
                n.bed_corner -= w.penalty_bed_corner;
            }
        }

        for door in &doors {
            if euclidean(anchor(p), anchor(door)) <= w.door_clearance_distance {
                n.door_clearance -= w.penalty_door_clearance;
            }
        }

        if !is_bed {
            continue;
        }

        let center = rect.center();
        let foot = (rect.x as f32 + rect.w as f32 / 2.0, rect.bottom() as f32);
        for door in &doors {
            if euclidean(foot, anchor(door)) <= w.door_bed_foot_distance {
                n.door_bed_foot -= w.penalty_door_bed_foot;
            }
            if euclidean(center, anchor(door)) <= w.door_bed_distance {
                n.door_facing_bed -= w.penalty_door_facing_bed;
            }
        }
        for window in &windows {
            if euclidean(center, anchor(window)) <= w.bed_window_distance {
                n.bed_window -= w.penalty_bed_under_window;
            }
        }
    }

    for window in &windows {
        for door in &doors {
            if euclidean(anchor(window), anchor(door)) > w.window_door_distance {
                continue;
            }
            n.window_door -= w.penalty_window_near_door;
            let same_wall = boundary_wall(catalog, grid, window)
                .is_some_and(|wall| boundary_wall(catalog, grid, door) == Some(wall));
            if same_wall {
                n.window_door -= w.penalty_window_door_same_wall;
            }
        }
    }

    n
}
