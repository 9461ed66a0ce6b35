use clap::Parser;
use fengshui::catalog::ObjectCatalog;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

mod error;
mod routes;
mod state;

use crate::state::AppState;

#[derive(Parser)]
struct Args {
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Object catalog (.json or .csv). Built-in catalog when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Wall-clock limit for one optimizer request
    #[arg(long, default_value_t = 30)]
    search_timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    info!("Feng Shui service is initializing...");

    let catalog = ObjectCatalog::load_or_default(args.catalog.as_deref());
    let state = Arc::new(AppState::new(
        catalog,
        Duration::from_secs(args.search_timeout_secs),
    ));

    let app = routes::app(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
