use crate::catalog::ObjectCatalog;
use crate::config::{ObjectPreference, ZoneWeights};
use crate::geometry::{placement_center, Grid, Placement};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// The nine bagua regions, in canonical row-major order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ZoneLabel {
    Career,
    Knowledge,
    Family,
    HelpfulPeople,
    Health,
    Wealth,
    Children,
    Relationships,
    Fame,
}

pub const ZONE_COUNT: usize = 9;

const BAGUA_LAYOUT: [[ZoneLabel; 3]; 3] = [
    [ZoneLabel::Career, ZoneLabel::Knowledge, ZoneLabel::Family],
    [ZoneLabel::HelpfulPeople, ZoneLabel::Health, ZoneLabel::Wealth],
    [ZoneLabel::Children, ZoneLabel::Relationships, ZoneLabel::Fame],
];

impl ZoneLabel {
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Column/row band lookup for one grid size. The last band in each axis
/// absorbs the remainder.
#[derive(Debug, Clone, Copy)]
pub struct ZoneMap {
    grid: Grid,
    col_size: i32,
    row_size: i32,
}

#[inline(always)]
fn band(i: i32, size: i32) -> usize {
    (i / size).min(2) as usize
}

impl ZoneMap {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            col_size: (grid.width / 3).max(1),
            row_size: (grid.height / 3).max(1),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Zone of a single cell. Cells outside the grid map to the center.
    pub fn zone_at(&self, x: i32, y: i32) -> ZoneLabel {
        if !self.grid.in_bounds(x, y) {
            return ZoneLabel::Health;
        }
        BAGUA_LAYOUT[band(y, self.row_size)][band(x, self.col_size)]
    }

    /// Zone under the placement's visual center rather than its anchor.
    pub fn get_zone(&self, catalog: &ObjectCatalog, p: &Placement) -> ZoneLabel {
        let (cx, cy) = placement_center(catalog, self.grid, p);
        self.zone_at(cx.floor() as i32, cy.floor() as i32)
    }
}

/// Orders all nine zones for one object type: preferred zones as listed,
/// then neutral zones by descending weight, then avoided zones as listed.
pub fn zone_ranking(pref: &ObjectPreference, weights: &ZoneWeights) -> Vec<ZoneLabel> {
    let mut ranking: Vec<ZoneLabel> = Vec::with_capacity(ZONE_COUNT);
    for &z in &pref.preferred_zones {
        if !ranking.contains(&z) {
            ranking.push(z);
        }
    }

    let avoided: Vec<ZoneLabel> = pref
        .avoid_zones
        .iter()
        .copied()
        .filter(|z| !ranking.contains(z))
        .fold(Vec::new(), |mut acc, z| {
            if !acc.contains(&z) {
                acc.push(z);
            }
            acc
        });

    let mut neutral: Vec<ZoneLabel> = ZoneLabel::iter()
        .filter(|z| !ranking.contains(z) && !avoided.contains(z))
        .collect();
    // stable: ties keep canonical order
    neutral.sort_by(|a, b| weights.weight(*b).total_cmp(&weights.weight(*a)));

    ranking.extend(neutral);
    ranking.extend(avoided);
    ranking
}

/// Rank value per zone index: 9 for the favourite down to 1.
pub fn rank_values(pref: &ObjectPreference, weights: &ZoneWeights) -> [f32; ZONE_COUNT] {
    let mut values = [0.0; ZONE_COUNT];
    for (i, zone) in zone_ranking(pref, weights).into_iter().enumerate() {
        values[zone.index()] = (ZONE_COUNT - i) as f32;
    }
    values
}
