//! Weather queries
//!
//! Current observations and multi-day forecasts, by station id or by point.
//! Point queries resolve to the nearest catalogue station.

use chrono::NaiveDate;
use shared::catalogue::StationCatalogue;
use shared::generator::WeatherGenerator;
use shared::validation::{validate_forecast_days, validate_location, MSG_STATION_NOT_FOUND};

use crate::error::{AppError, AppResult};
use crate::models::{DailyForecast, WeatherObservation};

/// Weather query service
pub struct WeatherService<'a> {
    catalogue: &'a StationCatalogue,
    generator: &'a WeatherGenerator,
}

impl<'a> WeatherService<'a> {
    pub fn new(catalogue: &'a StationCatalogue, generator: &'a WeatherGenerator) -> Self {
        Self {
            catalogue,
            generator,
        }
    }

    /// Observation at the station's own coordinates
    pub fn current_by_station(&self, station_id: &str) -> AppResult<WeatherObservation> {
        let station = self
            .catalogue
            .find(station_id)
            .ok_or_else(|| AppError::not_found(MSG_STATION_NOT_FOUND))?;
        tracing::debug!(station_id = %station_id, "Current weather by station");
        Ok(self
            .generator
            .current(station, station.latitude, station.longitude))
    }

    /// Observation attributed to the nearest station, echoing the requested point
    pub fn current_by_location(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> AppResult<WeatherObservation> {
        let point = validate_location(latitude, longitude).map_err(AppError::bad_request)?;
        let station = self
            .catalogue
            .nearest(point.latitude, point.longitude)
            .ok_or_else(|| AppError::Internal("station catalogue is empty".to_string()))?;
        tracing::debug!(
            lat = point.latitude,
            lon = point.longitude,
            station_id = %station.id,
            "Current weather by location"
        );
        Ok(self
            .generator
            .current(station, point.latitude, point.longitude))
    }

    /// `days` forecasts starting tomorrow; the day range is checked before the id
    pub fn forecast_by_station(
        &self,
        station_id: &str,
        days: i64,
        today: NaiveDate,
    ) -> AppResult<Vec<DailyForecast>> {
        let days = validate_forecast_days(days).map_err(AppError::bad_request)?;
        if self.catalogue.find(station_id).is_none() {
            return Err(AppError::not_found(MSG_STATION_NOT_FOUND));
        }
        tracing::debug!(station_id = %station_id, days, "Forecast by station");
        Ok(self.generator.forecast(today, days))
    }

    pub fn forecast_by_location(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        days: i64,
        today: NaiveDate,
    ) -> AppResult<Vec<DailyForecast>> {
        let point = validate_location(latitude, longitude).map_err(AppError::bad_request)?;
        let days = validate_forecast_days(days).map_err(AppError::bad_request)?;
        tracing::debug!(
            lat = point.latitude,
            lon = point.longitude,
            days,
            "Forecast by location"
        );
        Ok(self.generator.forecast(today, days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::validation::{
        MSG_COORDINATES_OUT_OF_RANGE, MSG_COORDINATES_REQUIRED, MSG_DAYS_OUT_OF_RANGE,
    };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn fixture() -> (StationCatalogue, WeatherGenerator) {
        let now = today().and_hms_opt(8, 0, 0).unwrap();
        (StationCatalogue::fixture_at(now), WeatherGenerator::seeded(5))
    }

    #[test]
    fn test_current_by_station() {
        let (catalogue, generator) = fixture();
        let service = WeatherService::new(&catalogue, &generator);

        let obs = service.current_by_station("STATION_002").unwrap();
        assert_eq!(obs.station_id, "STATION_002");
        assert_eq!(obs.city, "Barcelona");
        assert_eq!(obs.latitude, 41.3851);
        assert_eq!(obs.longitude, 2.1734);

        assert!(matches!(
            service.current_by_station("INVALID_ID"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_current_by_location_uses_nearest_station() {
        let (catalogue, generator) = fixture();
        let service = WeatherService::new(&catalogue, &generator);

        let obs = service.current_by_location(Some(37.0), Some(-6.0)).unwrap();
        assert_eq!(obs.station_id, "STATION_003");
        assert_eq!(obs.latitude, 37.0);
        assert_eq!(obs.longitude, -6.0);

        assert!(matches!(
            service.current_by_location(None, None),
            Err(AppError::BadRequest(msg)) if msg == MSG_COORDINATES_REQUIRED
        ));
        assert!(matches!(
            service.current_by_location(Some(0.0), Some(181.0)),
            Err(AppError::BadRequest(msg)) if msg == MSG_COORDINATES_OUT_OF_RANGE
        ));
    }

    #[test]
    fn test_forecast_by_station() {
        let (catalogue, generator) = fixture();
        let service = WeatherService::new(&catalogue, &generator);

        let forecast = service.forecast_by_station("STATION_001", 7, today()).unwrap();
        assert_eq!(forecast.len(), 7);
        assert_eq!(forecast[0].date, today() + Duration::days(1));
        assert_eq!(forecast[6].date, today() + Duration::days(7));
    }

    #[test]
    fn test_forecast_checks_days_before_station() {
        let (catalogue, generator) = fixture();
        let service = WeatherService::new(&catalogue, &generator);

        assert!(matches!(
            service.forecast_by_station("INVALID_ID", 15, today()),
            Err(AppError::BadRequest(msg)) if msg == MSG_DAYS_OUT_OF_RANGE
        ));
        assert!(matches!(
            service.forecast_by_station("INVALID_ID", 5, today()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_forecast_by_location() {
        let (catalogue, generator) = fixture();
        let service = WeatherService::new(&catalogue, &generator);

        assert_eq!(
            service
                .forecast_by_location(Some(10.0), Some(10.0), 1, today())
                .unwrap()
                .len(),
            1
        );
        assert!(matches!(
            service.forecast_by_location(Some(95.0), Some(10.0), 3, today()),
            Err(AppError::BadRequest(msg)) if msg == MSG_COORDINATES_OUT_OF_RANGE
        ));
        assert!(matches!(
            service.forecast_by_location(Some(10.0), Some(10.0), 0, today()),
            Err(AppError::BadRequest(msg)) if msg == MSG_DAYS_OUT_OF_RANGE
        ));
    }
}
