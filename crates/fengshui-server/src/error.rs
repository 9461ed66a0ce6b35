use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fengshui::error::FengShuiError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] FengShuiError),

    #[error("Search exceeded {0} seconds")]
    Timeout(u64),

    #[error("Internal Server Error: {0}")]
    Any(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Engine(e @ FengShuiError::InvalidInput(_))
            | AppError::Engine(e @ FengShuiError::Config(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Engine(e) => {
                tracing::error!("Engine Error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::Timeout(secs) => {
                tracing::warn!("Search timed out after {}s", secs);
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    format!("Search exceeded {} seconds", secs),
                )
            }
            AppError::Any(e) => {
                tracing::error!("Internal Error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
