//! Station queries
//!
//! Lookup, filtering, proximity search and statistics over the read-only
//! catalogue. Arguments are validated here before the catalogue is touched.

use chrono::NaiveDateTime;
use shared::catalogue::{contains_ignore_case, StationCatalogue};
use shared::validation::{
    validate_limit, validate_location, validate_radius, validate_required_text,
    MSG_CITY_REQUIRED, MSG_COUNTRY_REQUIRED, MSG_STATION_NOT_FOUND,
};

use crate::error::{AppError, AppResult};
use crate::models::{Station, StationStatistics};

/// Optional filters for the combined station search; blank values are ignored,
/// others match as given (`"Madrid "` does not match `Madrid`)
#[derive(Debug, Default, Clone)]
pub struct StationFilters {
    pub city: Option<String>,
    pub country: Option<String>,
    pub status: Option<String>,
    pub station_type: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

impl StationFilters {
    fn matches(&self, station: &Station) -> bool {
        let city = non_blank(&self.city).map_or(true, |city| contains_ignore_case(&station.city, city));
        let country = non_blank(&self.country)
            .map_or(true, |country| contains_ignore_case(&station.country, country));
        let status = non_blank(&self.status)
            .map_or(true, |status| station.status.as_str().eq_ignore_ascii_case(status));
        let station_type = non_blank(&self.station_type).map_or(true, |station_type| {
            station.station_type.as_str().eq_ignore_ascii_case(station_type)
        });

        city && country && status && station_type
    }
}

/// Station query service
pub struct StationService<'a> {
    catalogue: &'a StationCatalogue,
}

impl<'a> StationService<'a> {
    pub fn new(catalogue: &'a StationCatalogue) -> Self {
        Self { catalogue }
    }

    /// All stations in catalogue order
    pub fn list(&self) -> Vec<Station> {
        self.catalogue.list().to_vec()
    }

    pub fn get(&self, id: &str) -> AppResult<Station> {
        let station = self
            .catalogue
            .find(id)
            .ok_or_else(|| AppError::not_found(MSG_STATION_NOT_FOUND))?;
        tracing::debug!(station_id = %id, "Station lookup");
        Ok(station.clone())
    }

    pub fn by_city(&self, city: &str) -> AppResult<Vec<Station>> {
        validate_required_text(city, MSG_CITY_REQUIRED).map_err(AppError::bad_request)?;
        let stations: Vec<Station> = self
            .catalogue
            .filter_by_city(city)
            .into_iter()
            .cloned()
            .collect();
        tracing::debug!(city = %city, count = stations.len(), "Stations by city");
        Ok(stations)
    }

    pub fn by_country(&self, country: &str) -> AppResult<Vec<Station>> {
        validate_required_text(country, MSG_COUNTRY_REQUIRED).map_err(AppError::bad_request)?;
        let stations: Vec<Station> = self
            .catalogue
            .filter_by_country(country)
            .into_iter()
            .cloned()
            .collect();
        tracing::debug!(country = %country, count = stations.len(), "Stations by country");
        Ok(stations)
    }

    /// Every provided filter must match
    pub fn search(&self, filters: &StationFilters) -> Vec<Station> {
        let stations: Vec<Station> = self
            .catalogue
            .list()
            .iter()
            .filter(|station| filters.matches(station))
            .cloned()
            .collect();
        tracing::debug!(?filters, count = stations.len(), "Station search");
        stations
    }

    pub fn statistics(&self, now: NaiveDateTime) -> StationStatistics {
        StationStatistics::from_stations(self.catalogue.list(), now)
    }

    /// Stations within `radius_km`, nearest first, at most `limit` of them
    pub fn nearby(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        radius_km: f64,
        limit: i64,
    ) -> AppResult<Vec<Station>> {
        let point = validate_location(latitude, longitude).map_err(AppError::bad_request)?;
        validate_radius(radius_km).map_err(AppError::bad_request)?;
        let limit = validate_limit(limit).map_err(AppError::bad_request)?;

        let mut in_range: Vec<(f64, &Station)> = self
            .catalogue
            .list()
            .iter()
            .map(|station| (station.distance_to(point.latitude, point.longitude), station))
            .filter(|(distance, _)| *distance <= radius_km)
            .collect();
        // Stable, so equidistant stations keep catalogue order
        in_range.sort_by(|a, b| a.0.total_cmp(&b.0));

        let stations: Vec<Station> = in_range
            .into_iter()
            .take(limit)
            .map(|(_, station)| station.clone())
            .collect();
        tracing::debug!(
            lat = point.latitude,
            lon = point.longitude,
            radius_km,
            count = stations.len(),
            "Nearby stations"
        );
        Ok(stations)
    }
}
