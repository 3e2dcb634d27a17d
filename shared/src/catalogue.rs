//! Read-only station catalogue
//!
//! The catalogue is built once at startup, either from the built-in fixture or
//! from a JSON file, and is never mutated afterwards. All queries are linear
//! scans; the dataset is a handful of records.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::models::{Station, StationStatus, StationType};
use crate::types::local_datetime;

/// Errors raised while building a catalogue
#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("failed to read station file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed station data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("station catalogue must contain at least one station")]
    Empty,

    #[error("duplicate station id: {0}")]
    DuplicateId(String),

    #[error("invalid station {id}: {source}")]
    InvalidStation {
        id: String,
        #[source]
        source: validator::ValidationErrors,
    },
}

/// Station as written in a fixture file; `last_update` defaults to load time
#[derive(Debug, Deserialize)]
struct StationRecord {
    id: String,
    name: String,
    city: String,
    country: String,
    #[serde(default)]
    region: Option<String>,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    altitude: Option<i32>,
    #[serde(default)]
    time_zone: Option<String>,
    station_type: StationType,
    status: StationStatus,
    #[serde(with = "local_datetime")]
    installation_date: NaiveDateTime,
    #[serde(default, with = "local_datetime::option")]
    last_update: Option<NaiveDateTime>,
    #[serde(default)]
    responsible_organization: Option<String>,
    #[serde(default)]
    contact_info: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl StationRecord {
    fn into_station(self, loaded_at: NaiveDateTime) -> Station {
        Station {
            id: self.id,
            name: self.name,
            city: self.city,
            country: self.country,
            region: self.region,
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            time_zone: self.time_zone,
            station_type: self.station_type,
            status: self.status,
            installation_date: self.installation_date,
            last_update: self.last_update.unwrap_or(loaded_at),
            responsible_organization: self.responsible_organization,
            contact_info: self.contact_info,
            description: self.description,
        }
    }
}

/// Immutable, ordered list of stations
#[derive(Debug, Clone)]
pub struct StationCatalogue {
    stations: Vec<Station>,
}

impl StationCatalogue {
    /// Validate and wrap a list of stations, keeping their order
    pub fn from_stations(stations: Vec<Station>) -> Result<Self, CatalogueError> {
        if stations.is_empty() {
            return Err(CatalogueError::Empty);
        }

        let mut seen = HashSet::new();
        for station in &stations {
            station
                .validate()
                .map_err(|source| CatalogueError::InvalidStation {
                    id: station.id.clone(),
                    source,
                })?;
            if !seen.insert(station.id.as_str()) {
                return Err(CatalogueError::DuplicateId(station.id.clone()));
            }
        }

        Ok(Self { stations })
    }

    /// Parse a JSON array of stations
    pub fn from_json_str(json: &str, loaded_at: NaiveDateTime) -> Result<Self, CatalogueError> {
        let records: Vec<StationRecord> = serde_json::from_str(json)?;
        let stations = records
            .into_iter()
            .map(|record| record.into_station(loaded_at))
            .collect();
        Self::from_stations(stations)
    }

    /// Load a JSON station file from disk
    pub fn load_file(path: &Path, loaded_at: NaiveDateTime) -> Result<Self, CatalogueError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalogue = Self::from_json_str(&json, loaded_at)?;
        tracing::debug!(
            "Loaded {} stations from {}",
            catalogue.len(),
            path.display()
        );
        Ok(catalogue)
    }

    /// The five built-in stations, with `last_update` anchored at `now`
    pub fn fixture_at(now: NaiveDateTime) -> Self {
        Self {
            stations: fixture_stations(now),
        }
    }

    /// All stations in load order
    pub fn list(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Exact, case-sensitive id lookup
    pub fn find(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|station| station.id == id)
    }

    /// Case-insensitive substring match on city
    pub fn filter_by_city(&self, city: &str) -> Vec<&Station> {
        self.stations
            .iter()
            .filter(|station| contains_ignore_case(&station.city, city))
            .collect()
    }

    /// Case-insensitive substring match on country
    pub fn filter_by_country(&self, country: &str) -> Vec<&Station> {
        self.stations
            .iter()
            .filter(|station| contains_ignore_case(&station.country, country))
            .collect()
    }

    /// Station closest to the point; ties go to the earlier station
    pub fn nearest(&self, latitude: f64, longitude: f64) -> Option<&Station> {
        self.stations
            .iter()
            .map(|station| (station.distance_to(latitude, longitude), station))
            .fold(None, |best: Option<(f64, &Station)>, (distance, station)| match best {
                Some((best_distance, _)) if best_distance <= distance => best,
                _ => Some((distance, station)),
            })
            .map(|(_, station)| station)
    }
}

/// ASCII case folding; non-ASCII letters compare as-is
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn fixture_station(
    id: &str,
    name: &str,
    city: &str,
    region: &str,
    (latitude, longitude): (f64, f64),
    altitude: i32,
    station_type: StationType,
    status: StationStatus,
    installation_date: NaiveDateTime,
    last_update: NaiveDateTime,
    description: &str,
) -> Station {
    Station {
        id: id.to_string(),
        name: name.to_string(),
        city: city.to_string(),
        country: "España".to_string(),
        region: Some(region.to_string()),
        latitude,
        longitude,
        altitude: Some(altitude),
        time_zone: Some("Europe/Madrid".to_string()),
        station_type,
        status,
        installation_date,
        last_update,
        responsible_organization: Some("AEMET".to_string()),
        contact_info: Some("contacto@aemet.es".to_string()),
        description: Some(description.to_string()),
    }
}

fn fixture_stations(now: NaiveDateTime) -> Vec<Station> {
    vec![
        fixture_station(
            "STATION_001",
            "Estación Madrid Centro",
            "Madrid",
            "Comunidad de Madrid",
            (40.4168, -3.7038),
            650,
            StationType::Automatica,
            StationStatus::Activa,
            at(2020, 1, 15, 10, 0),
            now,
            "Estación automática ubicada en el centro urbano",
        ),
        fixture_station(
            "STATION_002",
            "Estación Barcelona Puerto",
            "Barcelona",
            "Cataluña",
            (41.3851, 2.1734),
            12,
            StationType::Automatica,
            StationStatus::Activa,
            at(2019, 6, 10, 9, 30),
            now,
            "Estación costera del puerto de Barcelona",
        ),
        fixture_station(
            "STATION_003",
            "Estación Sevilla Aeropuerto",
            "Sevilla",
            "Andalucía",
            (37.4162, -5.8961),
            34,
            StationType::Mixta,
            StationStatus::Activa,
            at(2018, 3, 5, 14, 15),
            now,
            "Estación del aeropuerto de Sevilla",
        ),
        fixture_station(
            "STATION_004",
            "Estación Bilbao Ciudad",
            "Bilbao",
            "País Vasco",
            (43.2630, -2.9349),
            19,
            StationType::Automatica,
            StationStatus::Activa,
            at(2021, 9, 12, 11, 45),
            now,
            "Estación urbana de Bilbao",
        ),
        fixture_station(
            "STATION_005",
            "Estación Valencia Playa",
            "Valencia",
            "Comunidad Valenciana",
            (39.4699, -0.3763),
            11,
            StationType::Automatica,
            StationStatus::Mantenimiento,
            at(2017, 11, 20, 16, 20),
            now - Duration::days(5),
            "Estación costera de Valencia",
        ),
    ]
}
