//! Health check handlers

use axum::Json;
use chrono::NaiveDateTime;
use serde::Serialize;
use shared::types::local_datetime;

pub const SERVICE_NAME: &str = "Meteorologia Mock API";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    #[serde(with = "local_datetime")]
    pub timestamp: NaiveDateTime,
}

/// Health check endpoint handler
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Local::now().naive_local(),
    })
}
