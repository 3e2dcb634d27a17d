//! Argument validation for the query operations
//!
//! Every check returns the exact client-facing message on failure so the
//! boundary layer can pass it through unchanged.

use crate::types::Coordinates;

pub const MSG_COORDINATES_REQUIRED: &str = "Latitud y longitud son requeridas";
pub const MSG_COORDINATES_OUT_OF_RANGE: &str = "Coordenadas fuera de rango válido";
pub const MSG_RADIUS_OUT_OF_RANGE: &str = "El radio debe estar entre 0 y 1000 km";
pub const MSG_LIMIT_OUT_OF_RANGE: &str = "El límite debe estar entre 1 y 50";
pub const MSG_DAYS_OUT_OF_RANGE: &str = "El número de días debe estar entre 1 y 10";
pub const MSG_CITY_REQUIRED: &str = "El nombre de la ciudad es requerido";
pub const MSG_COUNTRY_REQUIRED: &str = "El nombre del país es requerido";
pub const MSG_STATION_NOT_FOUND: &str = "Estación no encontrada";

pub const DEFAULT_RADIUS_KM: f64 = 100.0;
pub const MAX_RADIUS_KM: f64 = 1000.0;
pub const DEFAULT_NEARBY_LIMIT: i64 = 10;
pub const MAX_NEARBY_LIMIT: i64 = 50;
pub const DEFAULT_FORECAST_DAYS: i64 = 5;
pub const MAX_FORECAST_DAYS: i64 = 10;

/// Both coordinates must be present
pub fn require_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Coordinates, &'static str> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates::new(latitude, longitude)),
        _ => Err(MSG_COORDINATES_REQUIRED),
    }
}

/// Latitude in `[-90, 90]`, longitude in `[-180, 180]`
pub fn validate_coordinates(coordinates: &Coordinates) -> Result<(), &'static str> {
    if coordinates.is_valid() {
        Ok(())
    } else {
        Err(MSG_COORDINATES_OUT_OF_RANGE)
    }
}

/// Presence then range, in that order
pub fn validate_location(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Coordinates, &'static str> {
    let coordinates = require_coordinates(latitude, longitude)?;
    validate_coordinates(&coordinates)?;
    Ok(coordinates)
}

/// Search radius in `(0, 1000]` km
pub fn validate_radius(radius_km: f64) -> Result<(), &'static str> {
    if radius_km > 0.0 && radius_km <= MAX_RADIUS_KM {
        Ok(())
    } else {
        Err(MSG_RADIUS_OUT_OF_RANGE)
    }
}

/// Result limit in `[1, 50]`
pub fn validate_limit(limit: i64) -> Result<usize, &'static str> {
    if (1..=MAX_NEARBY_LIMIT).contains(&limit) {
        Ok(limit as usize)
    } else {
        Err(MSG_LIMIT_OUT_OF_RANGE)
    }
}

/// Forecast horizon in `[1, 10]` days
pub fn validate_forecast_days(days: i64) -> Result<u32, &'static str> {
    if (1..=MAX_FORECAST_DAYS).contains(&days) {
        Ok(days as u32)
    } else {
        Err(MSG_DAYS_OUT_OF_RANGE)
    }
}

/// Rejects empty and whitespace-only text
pub fn validate_required_text(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err(message)
    } else {
        Ok(())
    }
}
