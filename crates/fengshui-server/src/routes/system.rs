use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub message: String,
    pub endpoints: Vec<String>,
}

pub async fn test() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Feng Shui API is running".to_string(),
        endpoints: [
            "GET /test",
            "POST /calculate-live-score",
            "POST /random-auto-placer",
            "POST /feng-shui-optimizer",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    })
}
