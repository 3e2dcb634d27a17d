//! Weather data models

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::local_datetime;

/// Synthetic "current weather" for a station or a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub station_id: String,
    pub city: String,
    pub country: String,
    /// Echoes the requested point, which may differ from the station's
    pub latitude: f64,
    pub longitude: f64,
    /// Celsius
    pub temperature: f64,
    pub feels_like: f64,
    /// Percent
    pub humidity: u8,
    /// hPa
    pub pressure: f64,
    /// km/h
    pub wind_speed: f64,
    /// Degrees, a multiple of 45
    pub wind_direction: u16,
    pub wind_description: String,
    /// km
    pub visibility: f64,
    pub uv_index: u8,
    pub weather_description: String,
    pub weather_icon: String,
    #[serde(with = "local_datetime")]
    pub measurement_time: NaiveDateTime,
    /// mm over the last 24 hours
    pub precipitation_24h: f64,
}

/// Synthetic forecast for one future day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub humidity: u8,
    pub precipitation_probability: u8,
    /// mm
    pub precipitation_amount: f64,
    /// km/h
    pub wind_speed: f64,
    pub wind_direction: u16,
    pub wind_description: String,
    pub uv_index: u8,
    pub weather_description: String,
    pub weather_icon: String,
    /// `HH:MM`
    pub sunrise: String,
    /// `HH:MM`
    pub sunset: String,
}
