use crate::config::ScoringWeights;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Hard constraint that short-circuits scoring, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Violation {
    OutOfBounds,
    Overlap,
    DoorBlocked,
}

impl Violation {
    pub fn sentinel(self, weights: &ScoringWeights) -> f32 {
        match self {
            Violation::OutOfBounds => -weights.penalty_out_of_bounds,
            Violation::Overlap => -weights.penalty_overlap,
            Violation::DoorBlocked => -weights.penalty_door_blocked,
        }
    }
}

/// Decomposed score. Every term is filled in even when a violation decides
/// `layout_score`, so a breakdown of an invalid layout still shows where the
/// problem is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    // Equals Scorer::score for the same layout
    pub layout_score: f32,
    pub violation: Option<Violation>,

    // Terms
    pub zone: f32,
    pub command_position: f32,
    pub flow: f32,
    pub completeness: f32,
    pub wall: f32,
    pub penalties: f32,

    // Flow parts
    pub flow_pairs: f32,
    pub flow_spread: f32,

    // Named penalties (signed contributions, summed into `penalties`)
    pub pen_floating: f32,
    pub bonus_corner: f32,
    pub pen_bed_corner: f32,
    pub pen_door_bed_foot: f32,
    pub pen_window_door: f32,
    pub pen_bed_window: f32,
    pub pen_door_facing_bed: f32,
    pub pen_door_clearance: f32,

    // Explicit hard penalties
    pub door_blocked: f32,
    pub overlap: f32,

    // Counters
    pub stat_objects: usize,
    pub stat_floating: usize,
    pub stat_close_pairs: usize,
}

impl ScoreDetails {
    /// Sum of every soft and hard term, ignoring the short-circuit.
    pub fn term_total(&self) -> f32 {
        self.zone
            + self.command_position
            + self.flow
            + self.completeness
            + self.wall
            + self.penalties
            + self.door_blocked
            + self.overlap
    }

    /// Named terms in display order.
    pub fn terms(&self) -> [(&'static str, f32); 8] {
        [
            ("zone", self.zone),
            ("command_position", self.command_position),
            ("flow", self.flow),
            ("completeness", self.completeness),
            ("wall", self.wall),
            ("penalties", self.penalties),
            ("door_blocked", self.door_blocked),
            ("overlap", self.overlap),
        ]
    }
}
