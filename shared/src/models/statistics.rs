//! Catalogue statistics

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Station, StationStatus};
use crate::types::local_datetime;

/// Counts over the station catalogue, computed on demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationStatistics {
    pub total_stations: usize,
    pub active_stations: usize,
    pub inactive_stations: usize,
    pub maintenance_stations: usize,
    /// Number of distinct countries
    pub countries: usize,
    #[serde(with = "local_datetime")]
    pub last_updated: NaiveDateTime,
}

impl StationStatistics {
    pub fn from_stations(stations: &[Station], now: NaiveDateTime) -> Self {
        let with_status =
            |status: StationStatus| stations.iter().filter(|s| s.status == status).count();
        let countries: HashSet<&str> = stations.iter().map(|s| s.country.as_str()).collect();

        Self {
            total_stations: stations.len(),
            active_stations: with_status(StationStatus::Activa),
            inactive_stations: with_status(StationStatus::Inactiva),
            maintenance_stations: with_status(StationStatus::Mantenimiento),
            countries: countries.len(),
            last_updated: now,
        }
    }
}
