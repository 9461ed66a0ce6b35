use crate::reports;
use clap::Args;
use fengshui::api::{analyze_layout, calculate_live_score, LiveScoreRequest};
use fengshui::catalog::ObjectCatalog;
use fengshui::config::Config;
use fengshui::error::FsResult;
use fengshui::geometry::Grid;
use fengshui::scorer::Scorer;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    /// JSON file: {"grid_width", "grid_height", "placements": [{"type", "x", "y"}]}
    #[arg(short, long)]
    pub layout: PathBuf,
}

pub fn run(args: ScoreArgs, config: Config, catalog: Arc<ObjectCatalog>) -> FsResult<()> {
    let content = fs::read_to_string(&args.layout)?;
    let mut req: LiveScoreRequest = serde_json::from_str(&content)?;
    req.config = Some(config.clone());

    let live = calculate_live_score(catalog.clone(), &req)?;
    let grid = Grid::new(req.grid_width, req.grid_height)?;
    let scorer = Scorer::new(grid, catalog.clone(), &config);
    let analysis = analyze_layout(&scorer, &config, &req.placements);

    reports::print_placements(&catalog, grid, &req.placements);
    reports::print_room_map(&catalog, grid, &req.placements);
    reports::print_breakdown(&live.breakdown);
    reports::print_zone_analysis(&analysis);
    println!("\n{}", live.message);
    reports::print_recommendations(&live.recommendations);
    Ok(())
}
