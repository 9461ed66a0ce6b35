use crate::reports;
use clap::Args;
use fengshui::api::{analyze_layout, validate_request};
use fengshui::catalog::ObjectCatalog;
use fengshui::config::Config;
use fengshui::error::{FengShuiError, FsResult};
use fengshui::optimizer::runner::{NoProgress, OptimizationOptions, OptimizationResult, Optimizer};
use fengshui::scorer::Scorer;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(long, default_value_t = 144)]
    pub width: i32,

    #[arg(long, default_value_t = 144)]
    pub height: i32,

    /// Comma-separated object types, placed in this order
    #[arg(short, long, value_delimiter = ',', default_value = "bed,desk,door,window")]
    pub objects: Vec<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Independent searches run in parallel; the best one wins
    #[arg(short, long, default_value_t = 1)]
    pub restarts: usize,

    /// Print the result as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: OptimizeArgs, config: Config, catalog: Arc<ObjectCatalog>) -> FsResult<()> {
    let grid = validate_request(args.width, args.height, &args.objects)?;
    let scorer = Arc::new(Scorer::new(grid, catalog, &config));
    let restarts = args.restarts.max(1);

    info!("Running {} independent search(es)", restarts);
    let start = Instant::now();

    let results: Vec<FsResult<OptimizationResult>> = (0..restarts)
        .into_par_iter()
        .map(|i| {
            let optimizer = Optimizer::new(scorer.clone(), OptimizationOptions::from(&config));
            optimizer.run(&args.objects, args.seed.map(|s| s + i as u64), &NoProgress)
        })
        .collect();

    let mut best: Option<OptimizationResult> = None;
    for result in results {
        let result = result?;
        if best.as_ref().map_or(true, |b| result.score > b.score) {
            best = Some(result);
        }
    }
    let best = best.ok_or_else(|| FengShuiError::InvalidInput("no search was run".to_string()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&best)?);
        return Ok(());
    }

    let analysis = analyze_layout(&scorer, &config, &best.placements);
    let details = scorer.score_details(&best.placements);

    reports::print_placements(&scorer.catalog, grid, &best.placements);
    reports::print_room_map(&scorer.catalog, grid, &best.placements);
    reports::print_breakdown(&details);
    reports::print_zone_analysis(&analysis);
    reports::print_recommendations(&analysis.recommendations);
    reports::print_search_summary(&best, start.elapsed());
    Ok(())
}
