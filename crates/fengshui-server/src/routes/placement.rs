use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{extract::State, Json};
use fengshui::api::{self, PlacementRequest, RandomPlacementResult};
use fengshui::optimizer::runner::{OptimizationResult, ProgressCallback};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Lets a timed-out request stop its search thread.
struct CancelFlag(Arc<AtomicBool>);

impl ProgressCallback for CancelFlag {
    fn on_progress(&self, _: usize, _: f32, _: f32) -> bool {
        !self.0.load(Ordering::Relaxed)
    }
}

pub async fn random_auto_placer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PlacementRequest>,
) -> AppResult<Json<RandomPlacementResult>> {
    let catalog = state.catalog.clone();
    let result = tokio::task::spawn_blocking(move || api::random_placement(catalog, &payload))
        .await
        .map_err(|e| AppError::Any(e.into()))??;
    Ok(Json(result))
}

pub async fn feng_shui_optimizer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PlacementRequest>,
) -> AppResult<Json<OptimizationResult>> {
    // Reject bad input before occupying a blocking thread
    api::validate_request(
        payload.grid_width,
        payload.grid_height,
        &payload.objects_to_place,
    )?;

    info!(
        "Optimizer request: {}x{} with {:?}",
        payload.grid_width, payload.grid_height, payload.objects_to_place
    );

    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = CancelFlag(cancelled.clone());
    let catalog = state.catalog.clone();
    let task = tokio::task::spawn_blocking(move || {
        api::optimize_with_progress(catalog, &payload, &flag)
    });

    match tokio::time::timeout(state.search_timeout, task).await {
        Ok(joined) => {
            let result = joined.map_err(|e| AppError::Any(e.into()))??;
            Ok(Json(result))
        }
        Err(_) => {
            cancelled.store(true, Ordering::Relaxed);
            Err(AppError::Timeout(state.search_timeout.as_secs()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fengshui::catalog::ObjectCatalog;
    use std::time::Duration;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(ObjectCatalog::standard(), Duration::from_secs(30)))
    }

    #[tokio::test]
    async fn test_random_placer_returns_every_object() {
        let req = PlacementRequest {
            seed: Some(11),
            ..Default::default()
        };
        let Json(result) = random_auto_placer(State(state()), Json(req)).await.unwrap();
        assert_eq!(result.placements.len(), 4);
    }

    #[tokio::test]
    async fn test_optimizer_rejects_empty_objects() {
        let req = PlacementRequest {
            objects_to_place: vec![],
            ..Default::default()
        };
        let err = feng_shui_optimizer(State(state()), Json(req)).await.unwrap_err();
        assert!(matches!(err, AppError::Engine(_)));
    }

    #[tokio::test]
    async fn test_optimizer_small_request() {
        let req = PlacementRequest {
            objects_to_place: vec!["bed".to_string(), "door".to_string()],
            seed: Some(3),
            ..Default::default()
        };
        let Json(result) = feng_shui_optimizer(State(state()), Json(req)).await.unwrap();
        assert_eq!(result.placements.len(), 2);
    }
}
