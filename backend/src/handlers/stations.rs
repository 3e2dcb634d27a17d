//! HTTP handlers for station endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::validation::{DEFAULT_NEARBY_LIMIT, DEFAULT_RADIUS_KM};

use crate::error::AppResult;
use crate::models::{Station, StationStatistics};
use crate::services::{StationFilters, StationService};
use crate::AppState;

/// List every station
pub async fn list_stations(State(state): State<AppState>) -> Json<Vec<Station>> {
    let service = StationService::new(&state.catalogue);
    Json(service.list())
}

/// Get a station by ID
pub async fn get_station(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
) -> AppResult<Json<Station>> {
    let service = StationService::new(&state.catalogue);
    Ok(Json(service.get(&station_id)?))
}

pub async fn stations_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> AppResult<Json<Vec<Station>>> {
    let service = StationService::new(&state.catalogue);
    Ok(Json(service.by_city(&city)?))
}

pub async fn stations_by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> AppResult<Json<Vec<Station>>> {
    let service = StationService::new(&state.catalogue);
    Ok(Json(service.by_country(&country)?))
}

/// Query parameters for the combined search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub city: Option<String>,
    pub country: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub station_type: Option<String>,
}

/// Search stations by any combination of city, country, status and type
pub async fn search_stations(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Station>>> {
    let Query(query) = query?;
    let filters = StationFilters {
        city: query.city,
        country: query.country,
        status: query.status,
        station_type: query.station_type,
    };
    let service = StationService::new(&state.catalogue);
    Ok(Json(service.search(&filters)))
}

pub async fn station_statistics(State(state): State<AppState>) -> Json<StationStatistics> {
    let service = StationService::new(&state.catalogue);
    Json(service.statistics(chrono::Local::now().naive_local()))
}

/// Query parameters for the proximity search
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<f64>,
    pub limit: Option<i64>,
}

/// Stations within `radius` km of a point, nearest first
pub async fn nearby_stations(
    State(state): State<AppState>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Station>>> {
    let Query(query) = query?;
    let service = StationService::new(&state.catalogue);
    let stations = service.nearby(
        query.lat,
        query.lon,
        query.radius.unwrap_or(DEFAULT_RADIUS_KM),
        query.limit.unwrap_or(DEFAULT_NEARBY_LIMIT),
    )?;
    Ok(Json(stations))
}
