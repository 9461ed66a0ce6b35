pub mod placement;
pub mod scoring;
pub mod system;

use crate::state::AppState;
use axum::Router;
use std::sync::Arc;

pub fn system_routes() -> Router<Arc<AppState>> {
    Router::new().route("/test", axum::routing::get(system::test))
}

pub fn scoring_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/calculate-live-score",
        axum::routing::post(scoring::calculate_live_score),
    )
}

pub fn placement_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/random-auto-placer",
            axum::routing::post(placement::random_auto_placer),
        )
        .route(
            "/feng-shui-optimizer",
            axum::routing::post(placement::feng_shui_optimizer),
        )
}

pub fn app(state: Arc<AppState>) -> Router {
    system_routes()
        .merge(scoring_routes())
        .merge(placement_routes())
        .with_state(state)
}
