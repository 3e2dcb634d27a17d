//! HTTP handlers for weather endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::validation::DEFAULT_FORECAST_DAYS;

use crate::error::AppResult;
use crate::models::{DailyForecast, WeatherObservation};
use crate::services::WeatherService;
use crate::AppState;

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Current weather at a station
pub async fn current_by_station(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
) -> AppResult<Json<WeatherObservation>> {
    let service = WeatherService::new(&state.catalogue, &state.generator);
    Ok(Json(service.current_by_station(&station_id)?))
}

/// Query parameters for point-based weather
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Current weather at a point, attributed to the nearest station
pub async fn current_by_location(
    State(state): State<AppState>,
    query: Result<Query<LocationQuery>, QueryRejection>,
) -> AppResult<Json<WeatherObservation>> {
    let Query(query) = query?;
    let service = WeatherService::new(&state.catalogue, &state.generator);
    Ok(Json(service.current_by_location(query.lat, query.lon)?))
}

#[derive(Debug, Deserialize)]
pub struct DaysQuery {
    pub days: Option<i64>,
}

/// Forecast for a station
pub async fn forecast_by_station(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
    query: Result<Query<DaysQuery>, QueryRejection>,
) -> AppResult<Json<Vec<DailyForecast>>> {
    let Query(query) = query?;
    let service = WeatherService::new(&state.catalogue, &state.generator);
    let forecast = service.forecast_by_station(
        &station_id,
        query.days.unwrap_or(DEFAULT_FORECAST_DAYS),
        today(),
    )?;
    Ok(Json(forecast))
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub days: Option<i64>,
}

/// Forecast for a point
pub async fn forecast_by_location(
    State(state): State<AppState>,
    query: Result<Query<ForecastQuery>, QueryRejection>,
) -> AppResult<Json<Vec<DailyForecast>>> {
    let Query(query) = query?;
    let service = WeatherService::new(&state.catalogue, &state.generator);
    let forecast = service.forecast_by_location(
        query.lat,
        query.lon,
        query.days.unwrap_or(DEFAULT_FORECAST_DAYS),
        today(),
    )?;
    Ok(Json(forecast))
}
