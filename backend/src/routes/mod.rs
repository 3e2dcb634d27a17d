//! Route definitions for the Meteorologia Mock API

use axum::{
    handler::Handler,
    routing::{get, MethodRouter},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/weather", weather_routes())
        .nest("/stations", station_routes())
}

/// GET only; other methods answer 501
fn read_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).fallback(handlers::not_implemented)
}

/// Weather routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/health", read_only(handlers::health_check))
        .route("/current", read_only(handlers::current_by_location))
        .route("/current/:station_id", read_only(handlers::current_by_station))
        .route("/forecast", read_only(handlers::forecast_by_location))
        .route(
            "/forecast/:station_id",
            read_only(handlers::forecast_by_station),
        )
}

/// Station catalogue routes
fn station_routes() -> Router<AppState> {
    Router::new()
        .route("/", read_only(handlers::list_stations))
        .route("/search", read_only(handlers::search_stations))
        .route("/search/city/:city", read_only(handlers::stations_by_city))
        .route(
            "/search/country/:country",
            read_only(handlers::stations_by_country),
        )
        .route("/statistics", read_only(handlers::station_statistics))
        .route("/nearby", read_only(handlers::nearby_stations))
        .route("/:station_id", read_only(handlers::get_station))
}
