//! Weather station models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::geo::haversine_km;
use crate::types::{local_datetime, Coordinates};

/// A notional measurement site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Station {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub country: String,
    pub region: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// Altitude above sea level in meters
    pub altitude: Option<i32>,
    /// IANA zone name, e.g. `Europe/Madrid`
    pub time_zone: Option<String>,
    pub station_type: StationType,
    pub status: StationStatus,
    #[serde(with = "local_datetime")]
    pub installation_date: NaiveDateTime,
    #[serde(with = "local_datetime")]
    pub last_update: NaiveDateTime,
    pub responsible_organization: Option<String>,
    pub contact_info: Option<String>,
    pub description: Option<String>,
}

impl Station {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Great-circle distance in km from this station to a point
    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        haversine_km(latitude, longitude, self.latitude, self.longitude)
    }
}

/// How a station takes its measurements
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StationType {
    Automatica,
    Manual,
    Mixta,
}

impl StationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StationType::Automatica => "AUTOMATICA",
            StationType::Manual => "MANUAL",
            StationType::Mixta => "MIXTA",
        }
    }
}

impl std::fmt::Display for StationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operational state of a station
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StationStatus {
    Activa,
    Inactiva,
    Mantenimiento,
}

impl StationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StationStatus::Activa => "ACTIVA",
            StationStatus::Inactiva => "INACTIVA",
            StationStatus::Mantenimiento => "MANTENIMIENTO",
        }
    }
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
