use crate::error::{FengShuiError, FsResult};
use crate::zones::ZoneLabel;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub weights: ScoringWeights,
    #[command(flatten)]
    pub zones: ZoneWeights,

    // JSON only
    #[arg(skip = default_preferences())]
    pub preferences: BTreeMap<String, ObjectPreference>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchParams::default(),
            weights: ScoringWeights::default(),
            zones: ZoneWeights::default(),
            preferences: default_preferences(),
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, default_value_t = 1000)]
    pub max_iterations: usize,
    #[arg(long, default_value_t = 100)]
    pub max_no_improvement: usize,
    #[arg(long, default_value_t = 1.0)]
    pub initial_temperature: f32,
    #[arg(long, default_value_t = 0.95)]
    pub cooling_rate: f32,
    #[arg(long, default_value_t = 1e-3)]
    pub min_temperature: f32,
    #[arg(long, default_value_t = 0.3)]
    pub mutation_rate: f32,
    #[arg(long, default_value_t = 12)]
    pub mutation_step: i32,
    #[arg(long, default_value_t = 10)]
    pub mutation_retries: usize,

    // === PLACEMENT BUDGETS ===
    #[arg(long, default_value_t = 500)]
    pub construct_attempts: usize,
    #[arg(long, default_value_t = 1000)]
    pub random_attempts: usize,

    // === FALLBACK ===
    #[arg(long, default_value_t = 2)]
    pub max_fallback_attempts: usize,
    #[arg(long, default_value_t = -1000.0, allow_negative_numbers = true)]
    pub fallback_score_threshold: f32,
    #[arg(long, default_value_t = 10)]
    pub repair_offset: i32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_no_improvement: 100,
            initial_temperature: 1.0,
            cooling_rate: 0.95,
            min_temperature: 1e-3,
            mutation_rate: 0.3,
            mutation_step: 12,
            mutation_retries: 10,
            construct_attempts: 500,
            random_attempts: 1000,
            max_fallback_attempts: 2,
            fallback_score_threshold: -1000.0,
            repair_offset: 10,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    // === ZONES ===
    #[arg(long, default_value_t = 2.0)]
    pub zone_rank_scale: f32,

    // === COMMAND POSITION ===
    #[arg(long, default_value_t = 30.0)]
    pub bonus_command_position: f32,
    // Fraction of the smaller grid dimension
    #[arg(long, default_value_t = 0.5)]
    pub command_optimal_fraction: f32,

    // === FLOW ===
    #[arg(long, default_value_t = 0.15)]
    pub flow_close_fraction: f32,
    #[arg(long, default_value_t = 0.6)]
    pub flow_band_fraction: f32,
    #[arg(long, default_value_t = 12.0)]
    pub penalty_flow_close: f32,
    #[arg(long, default_value_t = 8.0)]
    pub bonus_flow_band: f32,
    #[arg(long, default_value_t = 3.0)]
    pub bonus_flow_far: f32,
    #[arg(long, default_value_t = 40.0)]
    pub spread_scale: f32,
    #[arg(long, default_value_t = 20.0)]
    pub spread_cap: f32,

    // === FLAT BONUSES ===
    #[arg(long, default_value_t = 10.0)]
    pub bonus_completeness: f32,
    #[arg(long, default_value_t = 15.0)]
    pub bonus_wall: f32,
    #[arg(long, default_value_t = 10.0)]
    pub bonus_corner: f32,

    // === NAMED PENALTIES ===
    #[arg(long, default_value_t = 20.0)]
    pub penalty_floating: f32,
    #[arg(long, default_value_t = 12)]
    pub floating_near_distance: i32,
    #[arg(long, default_value_t = 36)]
    pub floating_far_distance: i32,
    #[arg(long, default_value_t = 30.0)]
    pub penalty_bed_off_wall: f32,
    #[arg(long, default_value_t = 25.0)]
    pub penalty_bed_corner: f32,
    #[arg(long, default_value_t = 40.0)]
    pub penalty_door_bed_foot: f32,
    #[arg(long, default_value_t = 36.0)]
    pub door_bed_foot_distance: f32,
    #[arg(long, default_value_t = 20.0)]
    pub penalty_window_near_door: f32,
    #[arg(long, default_value_t = 24.0)]
    pub window_door_distance: f32,
    #[arg(long, default_value_t = 15.0)]
    pub penalty_window_door_same_wall: f32,
    #[arg(long, default_value_t = 30.0)]
    pub penalty_bed_under_window: f32,
    #[arg(long, default_value_t = 48.0)]
    pub bed_window_distance: f32,
    #[arg(long, default_value_t = 25.0)]
    pub penalty_door_facing_bed: f32,
    #[arg(long, default_value_t = 48.0)]
    pub door_bed_distance: f32,
    #[arg(long, default_value_t = 20.0)]
    pub penalty_door_clearance: f32,
    #[arg(long, default_value_t = 24.0)]
    pub door_clearance_distance: f32,

    // === HARD VIOLATIONS ===
    #[arg(long, default_value_t = 10_000.0)]
    pub penalty_out_of_bounds: f32,
    #[arg(long, default_value_t = 5_000.0)]
    pub penalty_overlap: f32,
    #[arg(long, default_value_t = 1_000.0)]
    pub penalty_door_blocked: f32,
    #[arg(long, default_value_t = 2)]
    pub door_block_radius: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            zone_rank_scale: 2.0,
            bonus_command_position: 30.0,
            command_optimal_fraction: 0.5,
            flow_close_fraction: 0.15,
            flow_band_fraction: 0.6,
            penalty_flow_close: 12.0,
            bonus_flow_band: 8.0,
            bonus_flow_far: 3.0,
            spread_scale: 40.0,
            spread_cap: 20.0,
            bonus_completeness: 10.0,
            bonus_wall: 15.0,
            bonus_corner: 10.0,
            penalty_floating: 20.0,
            floating_near_distance: 12,
            floating_far_distance: 36,
            penalty_bed_off_wall: 30.0,
            penalty_bed_corner: 25.0,
            penalty_door_bed_foot: 40.0,
            door_bed_foot_distance: 36.0,
            penalty_window_near_door: 20.0,
            window_door_distance: 24.0,
            penalty_window_door_same_wall: 15.0,
            penalty_bed_under_window: 30.0,
            bed_window_distance: 48.0,
            penalty_door_facing_bed: 25.0,
            door_bed_distance: 48.0,
            penalty_door_clearance: 20.0,
            door_clearance_distance: 24.0,
            penalty_out_of_bounds: 10_000.0,
            penalty_overlap: 5_000.0,
            penalty_door_blocked: 1_000.0,
            door_block_radius: 2,
        }
    }
}

/// Bagua zone importance, 0-10.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneWeights {
    #[arg(long = "weight-career", default_value_t = 8.0)]
    pub career: f32,
    #[arg(long = "weight-knowledge", default_value_t = 7.0)]
    pub knowledge: f32,
    #[arg(long = "weight-family", default_value_t = 6.0)]
    pub family: f32,
    #[arg(long = "weight-wealth", default_value_t = 9.0)]
    pub wealth: f32,
    #[arg(long = "weight-fame", default_value_t = 5.0)]
    pub fame: f32,
    #[arg(long = "weight-relationships", default_value_t = 8.0)]
    pub relationships: f32,
    #[arg(long = "weight-children", default_value_t = 6.0)]
    pub children: f32,
    #[arg(long = "weight-helpful-people", default_value_t = 7.0)]
    pub helpful_people: f32,
    #[arg(long = "weight-health", default_value_t = 8.0)]
    pub health: f32,
}

impl Default for ZoneWeights {
    fn default() -> Self {
        Self {
            career: 8.0,
            knowledge: 7.0,
            family: 6.0,
            wealth: 9.0,
            fame: 5.0,
            relationships: 8.0,
            children: 6.0,
            helpful_people: 7.0,
            health: 8.0,
        }
    }
}

impl ZoneWeights {
    #[inline(always)]
    pub fn weight(&self, zone: ZoneLabel) -> f32 {
        match zone {
            ZoneLabel::Career => self.career,
            ZoneLabel::Knowledge => self.knowledge,
            ZoneLabel::Family => self.family,
            ZoneLabel::HelpfulPeople => self.helpful_people,
            ZoneLabel::Health => self.health,
            ZoneLabel::Wealth => self.wealth,
            ZoneLabel::Children => self.children,
            ZoneLabel::Relationships => self.relationships,
            ZoneLabel::Fame => self.fame,
        }
    }
}

/// Per-type placement preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPreference {
    #[serde(default)]
    pub preferred_zones: Vec<ZoneLabel>,
    #[serde(default)]
    pub avoid_zones: Vec<ZoneLabel>,
    #[serde(default = "default_preference_weight")]
    pub weight: f32,
    #[serde(default)]
    pub command_position: bool,
}

fn default_preference_weight() -> f32 {
    5.0
}

pub fn default_preferences() -> BTreeMap<String, ObjectPreference> {
    use ZoneLabel::*;

    let entry = |preferred: &[ZoneLabel], avoid: &[ZoneLabel], weight: f32, command: bool| {
        ObjectPreference {
            preferred_zones: preferred.to_vec(),
            avoid_zones: avoid.to_vec(),
            weight,
            command_position: command,
        }
    };

    let mut prefs = BTreeMap::new();
    prefs.insert(
        "bed".to_string(),
        entry(&[Health, Relationships, Family], &[Career, Fame], 10.0, true),
    );
    prefs.insert(
        "desk".to_string(),
        entry(&[Career, Knowledge, Wealth], &[Health, Relationships], 8.0, true),
    );
    prefs.insert(
        "door".to_string(),
        entry(&[Career, HelpfulPeople], &[Health], 6.0, false),
    );
    prefs.insert(
        "window".to_string(),
        entry(&[Knowledge, Wealth], &[Health], 5.0, false),
    );
    prefs
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> FsResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FsResult<()> {
        let s = &self.search;
        if !(s.cooling_rate > 0.0 && s.cooling_rate <= 1.0) {
            return Err(FengShuiError::Config(format!(
                "cooling_rate must be in (0, 1], got {}",
                s.cooling_rate
            )));
        }
        if !(0.0..=1.0).contains(&s.mutation_rate) {
            return Err(FengShuiError::Config(format!(
                "mutation_rate must be in [0, 1], got {}",
                s.mutation_rate
            )));
        }
        if s.initial_temperature < 0.0 || s.mutation_step < 1 {
            return Err(FengShuiError::Config(
                "initial_temperature must be >= 0 and mutation_step >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlays flags given explicitly on the command line onto `self`.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident, $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(search, max_iterations);
        update_if_present!(search, max_no_improvement);
        update_if_present!(search, initial_temperature);
        update_if_present!(search, cooling_rate);
        update_if_present!(search, min_temperature);
        update_if_present!(search, mutation_rate);
        update_if_present!(search, mutation_step);
        update_if_present!(search, mutation_retries);
        update_if_present!(search, construct_attempts);
        update_if_present!(search, random_attempts);
        update_if_present!(search, max_fallback_attempts);
        update_if_present!(search, fallback_score_threshold);
        update_if_present!(search, repair_offset);

        update_if_present!(weights, zone_rank_scale);
        update_if_present!(weights, bonus_command_position);
        update_if_present!(weights, command_optimal_fraction);
        update_if_present!(weights, flow_close_fraction);
        update_if_present!(weights, flow_band_fraction);
        update_if_present!(weights, penalty_flow_close);
        update_if_present!(weights, bonus_flow_band);
        update_if_present!(weights, bonus_flow_far);
        update_if_present!(weights, spread_scale);
        update_if_present!(weights, spread_cap);
        update_if_present!(weights, bonus_completeness);
        update_if_present!(weights, bonus_wall);
        update_if_present!(weights, bonus_corner);
        update_if_present!(weights, penalty_floating);
        update_if_present!(weights, floating_near_distance);
        update_if_present!(weights, floating_far_distance);
        update_if_present!(weights, penalty_bed_off_wall);
        update_if_present!(weights, penalty_bed_corner);
        update_if_present!(weights, penalty_door_bed_foot);
        update_if_present!(weights, door_bed_foot_distance);
        update_if_present!(weights, penalty_window_near_door);
        update_if_present!(weights, window_door_distance);
        update_if_present!(weights, penalty_window_door_same_wall);
        update_if_present!(weights, penalty_bed_under_window);
        update_if_present!(weights, bed_window_distance);
        update_if_present!(weights, penalty_door_facing_bed);
        update_if_present!(weights, door_bed_distance);
        update_if_present!(weights, penalty_door_clearance);
        update_if_present!(weights, door_clearance_distance);
        update_if_present!(weights, penalty_out_of_bounds);
        update_if_present!(weights, penalty_overlap);
        update_if_present!(weights, penalty_door_blocked);
        update_if_present!(weights, door_block_radius);

        update_if_present!(zones, career);
        update_if_present!(zones, knowledge);
        update_if_present!(zones, family);
        update_if_present!(zones, wealth);
        update_if_present!(zones, fame);
        update_if_present!(zones, relationships);
        update_if_present!(zones, children);
        update_if_present!(zones, helpful_people);
        update_if_present!(zones, health);
    }
}
