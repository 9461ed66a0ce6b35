use crate::reports;
use clap::Args;
use fengshui::api::{random_placement, validate_request, PlacementRequest};
use fengshui::catalog::ObjectCatalog;
use fengshui::config::Config;
use fengshui::error::FsResult;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct RandomArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(long, default_value_t = 144)]
    pub width: i32,

    #[arg(long, default_value_t = 144)]
    pub height: i32,

    #[arg(short, long, value_delimiter = ',', default_value = "bed,desk,door,window")]
    pub objects: Vec<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: RandomArgs, config: Config, catalog: Arc<ObjectCatalog>) -> FsResult<()> {
    let grid = validate_request(args.width, args.height, &args.objects)?;
    let req = PlacementRequest {
        grid_width: args.width,
        grid_height: args.height,
        objects_to_place: args.objects,
        config: Some(config),
        seed: args.seed,
    };
    let result = random_placement(catalog.clone(), &req)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    reports::print_placements(&catalog, grid, &result.placements);
    reports::print_room_map(&catalog, grid, &result.placements);
    println!("\nScore: {:.2}", result.score);
    Ok(())
}
