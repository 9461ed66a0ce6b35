use crate::catalog::{ObjectCatalog, BED, DESK, DOOR, WINDOW};
use crate::config::Config;
use crate::error::{FengShuiError, FsResult};
use crate::geometry::{Grid, Placement};
use crate::optimizer::construct::generate_random_layout;
use crate::optimizer::runner::{
    NoProgress, OptimizationOptions, OptimizationResult, Optimizer, ProgressCallback,
};
use crate::scorer::{ScoreDetails, Scorer};
use crate::zones::ZoneLabel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use strum::IntoEnumIterator;
use strum_macros::Display;
use tracing::info;

pub const DEFAULT_GRID_SIZE: i32 = 144;

fn default_grid_size() -> i32 {
    DEFAULT_GRID_SIZE
}

pub fn default_objects() -> Vec<String> {
    [BED, DESK, DOOR, WINDOW]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Body shared by the optimizer and the random placer.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlacementRequest {
    #[serde(default = "default_grid_size")]
    pub grid_width: i32,
    #[serde(default = "default_grid_size")]
    pub grid_height: i32,
    #[serde(default = "default_objects")]
    pub objects_to_place: Vec<String>,
    #[serde(default)]
    pub config: Option<Config>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PlacementRequest {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
            objects_to_place: default_objects(),
            config: None,
            seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RandomPlacementResult {
    pub placements: Vec<Placement>,
    pub score: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LiveScoreRequest {
    #[serde(default)]
    pub placements: Vec<Placement>,
    #[serde(default = "default_grid_size")]
    pub grid_width: i32,
    #[serde(default = "default_grid_size")]
    pub grid_height: i32,
    #[serde(default)]
    pub config: Option<Config>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Rating {
    #[strum(to_string = "Excellent Feng Shui!")]
    Excellent,
    #[strum(to_string = "Good Feng Shui!")]
    Good,
    #[strum(to_string = "Fair Feng Shui")]
    Fair,
    #[strum(to_string = "Poor Feng Shui")]
    Poor,
    #[strum(to_string = "Very Poor Feng Shui")]
    VeryPoor,
}

impl Rating {
    pub fn from_score(score: f32) -> Self {
        match score {
            s if s >= 80.0 => Rating::Excellent,
            s if s >= 60.0 => Rating::Good,
            s if s >= 40.0 => Rating::Fair,
            s if s >= 20.0 => Rating::Poor,
            _ => Rating::VeryPoor,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LiveScore {
    pub score: f32,
    pub breakdown: ScoreDetails,
    pub rating: Rating,
    pub message: String,
    pub recommendations: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ZoneAnalysis {
    pub count: usize,
    pub weight: f32,
    pub score: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EnergyFlow {
    pub command_position: f32,
    pub chi_flow: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LayoutAnalysis {
    pub total_score: f32,
    pub zone_analysis: BTreeMap<ZoneLabel, ZoneAnalysis>,
    pub energy_flow: EnergyFlow,
    pub recommendations: Vec<String>,
}

/// Rejects malformed requests before any search runs.
pub fn validate_request(grid_width: i32, grid_height: i32, objects: &[String]) -> FsResult<Grid> {
    let grid = Grid::new(grid_width, grid_height)?;
    if objects.is_empty() {
        return Err(FengShuiError::InvalidInput(
            "objects_to_place must not be empty".to_string(),
        ));
    }
    Ok(grid)
}

fn resolve_config(config: &Option<Config>) -> FsResult<Config> {
    match config {
        Some(c) => {
            c.validate()?;
            Ok(c.clone())
        }
        None => Ok(Config::default()),
    }
}

/// Service: full search with fallbacks.
pub fn optimize(catalog: Arc<ObjectCatalog>, req: &PlacementRequest) -> FsResult<OptimizationResult> {
    optimize_with_progress(catalog, req, &NoProgress)
}

pub fn optimize_with_progress<CB: ProgressCallback>(
    catalog: Arc<ObjectCatalog>,
    req: &PlacementRequest,
    callback: &CB,
) -> FsResult<OptimizationResult> {
    let grid = validate_request(req.grid_width, req.grid_height, &req.objects_to_place)?;
    let config = resolve_config(&req.config)?;

    let scorer = Arc::new(Scorer::new(grid, catalog, &config));
    let optimizer = Optimizer::new(scorer, OptimizationOptions::from(&config));
    optimizer.run(&req.objects_to_place, req.seed, callback)
}

/// Service: unguided placement, scored.
pub fn random_placement(
    catalog: Arc<ObjectCatalog>,
    req: &PlacementRequest,
) -> FsResult<RandomPlacementResult> {
    let grid = validate_request(req.grid_width, req.grid_height, &req.objects_to_place)?;
    let config = resolve_config(&req.config)?;

    let mut rng = if let Some(s) = req.seed {
        fastrand::Rng::with_seed(s)
    } else {
        fastrand::Rng::new()
    };
    let placements = generate_random_layout(
        &catalog,
        grid,
        &req.objects_to_place,
        config.search.random_attempts,
        &mut rng,
    );
    let score = Scorer::new(grid, catalog, &config).score(&placements);
    info!("Random layout of {} objects scored {:.2}", placements.len(), score);

    Ok(RandomPlacementResult { placements, score })
}

/// Threshold checks on a breakdown.
pub fn recommendations(details: &ScoreDetails) -> Vec<String> {
    let mut recs = Vec::new();
    if details.penalties < -100.0 {
        recs.push("Address Feng Shui violations for better energy flow".to_string());
    }
    if details.door_blocked < 0.0 {
        recs.push("Move furniture away from doors".to_string());
    }
    if details.overlap < 0.0 {
        recs.push("Separate overlapping furniture".to_string());
    }
    if details.command_position < 10.0 {
        recs.push("Ensure bed and desk face the door for command position".to_string());
    }
    if details.layout_score < 50.0 {
        recs.push("Consider repositioning furniture for better energy flow".to_string());
    }
    recs
}

/// Service: score a user-edited layout.
pub fn calculate_live_score(catalog: Arc<ObjectCatalog>, req: &LiveScoreRequest) -> FsResult<LiveScore> {
    let grid = Grid::new(req.grid_width, req.grid_height)?;
    let config = resolve_config(&req.config)?;
    let details = Scorer::new(grid, catalog, &config).score_details(&req.placements);
    let rating = Rating::from_score(details.layout_score);

    Ok(LiveScore {
        score: details.layout_score,
        breakdown: details,
        rating,
        message: rating.to_string(),
        recommendations: recommendations(&details),
    })
}

/// Per-zone occupancy and energy-flow summary.
pub fn analyze_layout(scorer: &Scorer, config: &Config, placements: &[Placement]) -> LayoutAnalysis {
    let details = scorer.score_details(placements);

    let mut zone_analysis: BTreeMap<ZoneLabel, ZoneAnalysis> = ZoneLabel::iter()
        .map(|z| {
            let weight = config.zones.weight(z);
            (
                z,
                ZoneAnalysis {
                    count: 0,
                    weight,
                    score: 0.0,
                },
            )
        })
        .collect();

    for p in placements {
        let zone = scorer.zone_map.get_zone(&scorer.catalog, p);
        if let Some(entry) = zone_analysis.get_mut(&zone) {
            entry.count += 1;
            entry.score = entry.count as f32 * entry.weight;
        }
    }

    let mut recs = recommendations(&details);
    for (zone, entry) in &zone_analysis {
        if entry.count == 0 && entry.weight >= 9.0 {
            recs.push(format!("Place an object in the {} zone to activate it", zone));
        }
    }

    LayoutAnalysis {
        total_score: details.layout_score,
        zone_analysis,
        energy_flow: EnergyFlow {
            command_position: details.command_position,
            chi_flow: details.flow,
        },
        recommendations: recs,
    }
}
