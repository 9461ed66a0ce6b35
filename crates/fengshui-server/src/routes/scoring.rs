use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{extract::State, Json};
use fengshui::api::{self, LiveScore, LiveScoreRequest};
use std::sync::Arc;

pub async fn calculate_live_score(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LiveScoreRequest>,
) -> AppResult<Json<LiveScore>> {
    let catalog = state.catalog.clone();
    let live = tokio::task::spawn_blocking(move || api::calculate_live_score(catalog, &payload))
        .await
        .map_err(|e| AppError::Any(e.into()))??;
    Ok(Json(live))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fengshui::catalog::ObjectCatalog;
    use fengshui::geometry::Placement;
    use fengshui::scorer::Violation;
    use std::time::Duration;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(ObjectCatalog::standard(), Duration::from_secs(30)))
    }

    #[tokio::test]
    async fn test_huge_grid_with_far_anchor() {
        let req = LiveScoreRequest {
            placements: vec![
                Placement::new("bed", i32::MAX - 10, 0),
                Placement::new("door", 0, 0),
            ],
            grid_width: 2_000_000_000,
            grid_height: 2_000_000_000,
            config: None,
        };
        let Json(live) = calculate_live_score(State(state()), Json(req)).await.unwrap();
        assert_eq!(live.breakdown.violation, Some(Violation::OutOfBounds));
        assert_eq!(live.score, -10_000.0);
    }

    #[tokio::test]
    async fn test_bad_grid_is_an_engine_error() {
        let req = LiveScoreRequest {
            placements: vec![],
            grid_width: 0,
            grid_height: 144,
            config: None,
        };
        let err = calculate_live_score(State(state()), Json(req)).await.unwrap_err();
        assert!(matches!(err, AppError::Engine(_)));
    }
}
