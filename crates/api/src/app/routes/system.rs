use axum::{http::StatusCode, Json};

use crate::app::dto::HealthResponse;

pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}
