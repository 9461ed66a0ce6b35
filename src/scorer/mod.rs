pub mod engine;
pub mod flow;
pub mod penalties;
pub mod types;

pub use self::types::{ScoreDetails, Violation};
use crate::catalog::ObjectCatalog;
use crate::config::{Config, ScoringWeights};
use crate::geometry::{Grid, Placement};
use crate::zones::{rank_values, ZoneMap, ZONE_COUNT};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Scores layouts for one grid size. Built once per search, then shared
/// read-only by every iteration.
pub struct Scorer {
    pub grid: Grid,
    pub catalog: Arc<ObjectCatalog>,
    pub weights: ScoringWeights,
    pub zone_map: ZoneMap,

    // Per type: zone score indexed by ZoneLabel::index()
    pub zone_tables: HashMap<String, [f32; ZONE_COUNT]>,
    // Types that want a command position relative to the door
    pub command_types: HashSet<String>,
}

impl Scorer {
    pub fn new(grid: Grid, catalog: Arc<ObjectCatalog>, config: &Config) -> Self {
        let scale = config.weights.zone_rank_scale;
        let zone_tables = config
            .preferences
            .iter()
            .map(|(kind, pref)| {
                let norm = pref.weight / 10.0;
                let mut table = rank_values(pref, &config.zones);
                for v in table.iter_mut() {
                    *v *= scale * norm;
                }
                (kind.clone(), table)
            })
            .collect();

        let command_types = config
            .preferences
            .iter()
            .filter(|(_, pref)| pref.command_position)
            .map(|(kind, _)| kind.clone())
            .collect();

        Self {
            grid,
            catalog,
            weights: config.weights.clone(),
            zone_map: ZoneMap::new(grid),
            zone_tables,
            command_types,
        }
    }

    /// Fast path used inside the search loop.
    pub fn score(&self, placements: &[Placement]) -> f32 {
        engine::score(self, placements)
    }

    /// Full breakdown for reports and live scoring.
    pub fn score_details(&self, placements: &[Placement]) -> ScoreDetails {
        engine::score_details(self, placements)
    }

    #[inline(always)]
    pub fn zone_score(&self, p: &Placement) -> f32 {
        match self.zone_tables.get(&p.kind) {
            Some(table) => table[self.zone_map.get_zone(&self.catalog, p).index()],
            None => 0.0,
        }
    }
}
