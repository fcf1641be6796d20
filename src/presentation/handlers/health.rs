use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub primary_engine: String,
    pub fallback_engine: Option<String>,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let service = &state.transcription_service;
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            primary_engine: service.primary_engine().to_string(),
            fallback_engine: service.fallback_engine().map(str::to_string),
        }),
    )
}
