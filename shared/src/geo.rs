//! Great-circle distance helpers

use haversine::{distance, Location, Units};

/// Mean Earth radius used by the haversine formula, in km
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in km between two points given in decimal degrees
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let from = Location {
        latitude: lat1,
        longitude: lon1,
    };
    let to = Location {
        latitude: lat2,
        longitude: lon2,
    };
    distance(from, to, Units::Kilometers)
}
