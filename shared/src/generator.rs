//! Synthetic weather generator
//!
//! Produces plausible but random observations and daily forecasts. The only
//! shared mutable state is the RNG, which sits behind a mutex so a single
//! generator can serve every request.

use std::sync::{Mutex, PoisonError};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::models::{DailyForecast, Station, WeatherObservation};
use crate::types::round1;

pub const WEATHER_DESCRIPTIONS: [&str; 10] = [
    "Soleado",
    "Parcialmente nublado",
    "Nublado",
    "Lluvia ligera",
    "Lluvia",
    "Tormenta",
    "Niebla",
    "Viento fuerte",
    "Granizo",
    "Nieve",
];

/// Parallel to [`WEATHER_DESCRIPTIONS`]
pub const WEATHER_ICONS: [&str; 10] = [
    "sunny",
    "partly-cloudy",
    "cloudy",
    "light-rain",
    "rain",
    "thunderstorm",
    "fog",
    "windy",
    "hail",
    "snow",
];

/// Cardinal labels, one per 45 degrees starting at north
pub const WIND_DIRECTIONS: [&str; 8] = [
    "Norte", "Noreste", "Este", "Sureste", "Sur", "Suroeste", "Oeste", "Noroeste",
];

/// Coarse climate zone picked from absolute latitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateBand {
    Tropical,
    Subtropical,
    Temperate,
    Polar,
}

impl ClimateBand {
    pub fn for_latitude(latitude: f64) -> Self {
        let abs = latitude.abs();
        if abs < 23.5 {
            ClimateBand::Tropical
        } else if abs < 40.0 {
            ClimateBand::Subtropical
        } else if abs < 60.0 {
            ClimateBand::Temperate
        } else {
            ClimateBand::Polar
        }
    }

    /// Mean temperature in Celsius around which observations scatter
    pub fn base_temperature(self) -> f64 {
        match self {
            ClimateBand::Tropical => 25.0,
            ClimateBand::Subtropical => 18.0,
            ClimateBand::Temperate => 10.0,
            ClimateBand::Polar => 0.0,
        }
    }
}

struct Wind {
    speed: f64,
    direction: u16,
    description: &'static str,
}

pub struct WeatherGenerator {
    rng: Mutex<StdRng>,
    seeded: bool,
}

impl Default for WeatherGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherGenerator {
    /// Generator seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
            seeded: false,
        }
    }

    /// Deterministic generator; the same seed replays the same sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            seeded: true,
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        // A panic mid-draw leaves the RNG in a usable state
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *rng)
    }

    /// Observation for `station`, stamped with the current local time
    pub fn current(&self, station: &Station, latitude: f64, longitude: f64) -> WeatherObservation {
        let now = chrono::Local::now().naive_local();
        self.current_at(station, latitude, longitude, now)
    }

    /// Observation whose climate band follows the requested point, not the station
    pub fn current_at(
        &self,
        station: &Station,
        latitude: f64,
        longitude: f64,
        measurement_time: NaiveDateTime,
    ) -> WeatherObservation {
        let base = ClimateBand::for_latitude(latitude).base_temperature();

        self.with_rng(|rng| {
            let temperature = round1(base + gaussian(rng) * 5.0);
            let feels_like = round1(temperature + gaussian(rng) * 2.0);
            let weather_index = rng.random_range(0..WEATHER_DESCRIPTIONS.len());
            let wind = wind(rng, 30.0);

            WeatherObservation {
                station_id: station.id.clone(),
                city: station.city.clone(),
                country: station.country.clone(),
                latitude,
                longitude,
                temperature,
                feels_like,
                humidity: 30 + rng.random_range(0..70u8),
                pressure: 950.0 + rng.random_range(0.0..100.0),
                wind_speed: wind.speed,
                wind_direction: wind.direction,
                wind_description: wind.description.to_string(),
                visibility: 5.0 + rng.random_range(0.0..15.0),
                uv_index: rng.random_range(0..12u8),
                weather_description: WEATHER_DESCRIPTIONS[weather_index].to_string(),
                weather_icon: WEATHER_ICONS[weather_index].to_string(),
                measurement_time,
                precipitation_24h: rng.random_range(0.0..10.0),
            }
        })
    }

    /// Forecast for a single day
    pub fn daily(&self, date: NaiveDate) -> DailyForecast {
        self.with_rng(|rng| {
            let base = 15.0 + gaussian(rng) * 10.0;
            let high = round1(base + rng.random_range(0.0..10.0));
            let low = round1(base - rng.random_range(0.0..10.0));
            let (min_temperature, max_temperature) = if low <= high {
                (low, high)
            } else {
                (high, low)
            };
            let weather_index = rng.random_range(0..WEATHER_DESCRIPTIONS.len());
            let wind = wind(rng, 25.0);

            DailyForecast {
                date,
                max_temperature,
                min_temperature,
                humidity: 40 + rng.random_range(0..60u8),
                precipitation_probability: rng.random_range(0..=100u8),
                precipitation_amount: rng.random_range(0.0..20.0),
                wind_speed: wind.speed,
                wind_direction: wind.direction,
                wind_description: wind.description.to_string(),
                uv_index: rng.random_range(0..12u8),
                weather_description: WEATHER_DESCRIPTIONS[weather_index].to_string(),
                weather_icon: WEATHER_ICONS[weather_index].to_string(),
                sunrise: clock(6 + rng.random_range(0..2u32), rng.random_range(0..60u32)),
                sunset: clock(19 + rng.random_range(0..3u32), rng.random_range(0..60u32)),
            }
        })
    }

    /// One forecast per day from `today + 1` through `today + days`
    pub fn forecast(&self, today: NaiveDate, days: u32) -> Vec<DailyForecast> {
        (1..=i64::from(days))
            .map(|offset| self.daily(today + Duration::days(offset)))
            .collect()
    }
}

fn gaussian(rng: &mut StdRng) -> f64 {
    rng.sample(StandardNormal)
}

fn wind(rng: &mut StdRng, max_speed: f64) -> Wind {
    let index = rng.random_range(0..WIND_DIRECTIONS.len());
    Wind {
        speed: rng.random_range(0.0..max_speed),
        direction: index as u16 * 45,
        description: WIND_DIRECTIONS[index],
    }
}

fn clock(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour, minute)
}
