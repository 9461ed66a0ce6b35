use super::flow::{analyze_flow, command_position};
use super::penalties::{blocked_door_count, find_violation, named_penalties, overlap_count};
use super::{ScoreDetails, Scorer};
use crate::geometry::Placement;

fn wall_bonus(scorer: &Scorer, placements: &[Placement]) -> f32 {
    placements
        .iter()
        .filter(|p| scorer.catalog.is_boundary(&p.kind) && scorer.grid.is_edge_cell(p.x, p.y))
        .count() as f32
        * scorer.weights.bonus_wall
}

/// Fast Path: Used by the Optimizer.
pub fn score(scorer: &Scorer, placements: &[Placement]) -> f32 {
    if let Some(v) = find_violation(scorer, placements) {
        return v.sentinel(&scorer.weights);
    }

    let w = &scorer.weights;
    let mut total: f32 = placements.iter().map(|p| scorer.zone_score(p)).sum();
    total += command_position(scorer, placements);
    total += analyze_flow(scorer, placements).total();
    total += placements.len() as f32 * w.bonus_completeness;
    total += wall_bonus(scorer, placements);
    total += named_penalties(scorer, placements).total();

    // Both zero once the short-circuit has passed; kept so the sum matches
    // the breakdown term for term.
    total -= blocked_door_count(scorer, placements) as f32 * w.penalty_door_blocked;
    total -= overlap_count(scorer, placements) as f32 * w.penalty_overlap;
    total
}

/// Detailed Path: Used by reports and live scoring.
pub fn score_details(scorer: &Scorer, placements: &[Placement]) -> ScoreDetails {
    let w = &scorer.weights;
    let mut d = ScoreDetails {
        stat_objects: placements.len(),
        ..Default::default()
    };

    d.zone = placements.iter().map(|p| scorer.zone_score(p)).sum();
    d.command_position = command_position(scorer, placements);

    let flow = analyze_flow(scorer, placements);
    d.flow_pairs = flow.pairs;
    d.flow_spread = flow.spread;
    d.flow = flow.total();
    d.stat_close_pairs = flow.close_pairs;

    d.completeness = placements.len() as f32 * w.bonus_completeness;
    d.wall = wall_bonus(scorer, placements);

    let n = named_penalties(scorer, placements);
    d.pen_floating = n.floating;
    d.bonus_corner = n.corner;
    d.pen_bed_corner = n.bed_corner;
    d.pen_door_bed_foot = n.door_bed_foot;
    d.pen_window_door = n.window_door;
    d.pen_bed_window = n.bed_window;
    d.pen_door_facing_bed = n.door_facing_bed;
    d.pen_door_clearance = n.door_clearance;
    d.penalties = n.total();
    d.stat_floating = n.floating_count;

    d.door_blocked = -(blocked_door_count(scorer, placements) as f32) * w.penalty_door_blocked;
    d.overlap = -(overlap_count(scorer, placements) as f32) * w.penalty_overlap;

    d.violation = find_violation(scorer, placements);
    d.layout_score = match d.violation {
        Some(v) => v.sentinel(w),
        None => d.term_total(),
    };
    d
}
