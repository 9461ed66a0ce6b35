use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use fengshui::catalog::ObjectCatalog;
use fengshui::config::Config;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Feng Shui room layout optimizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Object catalog (.json or .csv). Built-in catalog when omitted.
    #[arg(global = true, long)]
    catalog: Option<PathBuf>,

    /// JSON config; explicit command-line flags override its values.
    #[arg(global = true, long)]
    config: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for a high-scoring layout
    Optimize(cmd::optimize::OptimizeArgs),
    /// Place objects at random valid positions
    Random(cmd::random::RandomArgs),
    /// Score an existing layout file
    Score(cmd::score::ScoreArgs),
    /// Print the active object catalog
    Catalog,
}

fn resolve_config(cli_config: &Config, path: Option<&Path>, sub_matches: &ArgMatches) -> Config {
    let Some(path) = path else {
        return cli_config.clone();
    };

    info!("Loading config from {:?}", path);
    match Config::load_from_file(path) {
        Ok(mut base) => {
            base.merge_from_cli(cli_config, sub_matches);
            base
        }
        Err(e) => {
            error!("Failed to load config {:?}: {}", path, e);
            process::exit(1);
        }
    }
}

fn main() {
    // 1. Raw matches (to tell user input from defaults)
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // 2. Catalog
    let catalog = Arc::new(ObjectCatalog::load_or_default(cli.catalog.as_deref()));

    // 3. Config: file base plus explicit flags from the subcommand
    let (name, cli_config) = match &cli.command {
        Commands::Optimize(args) => ("optimize", Some(&args.config)),
        Commands::Random(args) => ("random", Some(&args.config)),
        Commands::Score(args) => ("score", Some(&args.config)),
        Commands::Catalog => ("catalog", None),
    };
    let config = match (cli_config, matches.subcommand_matches(name)) {
        (Some(c), Some(sub)) => resolve_config(c, cli.config.as_deref(), sub),
        _ => Config::default(),
    };
    if let Err(e) = config.validate() {
        error!("{}", e);
        process::exit(1);
    }

    // 4. Execute
    let outcome = match cli.command {
        Commands::Optimize(args) => cmd::optimize::run(args, config, catalog),
        Commands::Random(args) => cmd::random::run(args, config, catalog),
        Commands::Score(args) => cmd::score::run(args, config, catalog),
        Commands::Catalog => cmd::catalog::run(&catalog),
    };

    if let Err(e) = outcome {
        error!("{}", e);
        process::exit(1);
    }
}
