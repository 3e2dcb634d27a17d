//! Synthetic weather tests
//!
//! Properties every generated observation and forecast must satisfy,
//! whatever the seed and location.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use shared::{
    ClimateBand, StationCatalogue, WeatherGenerator, WEATHER_DESCRIPTIONS, WEATHER_ICONS,
    WIND_DIRECTIONS,
};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn parse_clock(value: &str) -> (u32, u32) {
    let (hour, minute) = value.split_once(':').unwrap();
    (hour.parse().unwrap(), minute.parse().unwrap())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Descriptions and icons are parallel lists
    #[test]
    fn test_condition_tables_align() {
        assert_eq!(WEATHER_DESCRIPTIONS.len(), WEATHER_ICONS.len());
        assert_eq!(WEATHER_DESCRIPTIONS[0], "Soleado");
        assert_eq!(WEATHER_ICONS[0], "sunny");
        assert_eq!(WEATHER_DESCRIPTIONS[9], "Nieve");
        assert_eq!(WEATHER_ICONS[9], "snow");
        assert_eq!(WIND_DIRECTIONS[7], "Noroeste");
    }

    /// Same seed, same request sequence, same output
    #[test]
    fn test_seeded_generators_agree_across_stations() {
        let catalogue = StationCatalogue::fixture_at(now());
        let a = WeatherGenerator::seeded(2024);
        let b = WeatherGenerator::seeded(2024);

        for station in catalogue.list() {
            let first = a.current_at(station, station.latitude, station.longitude, now());
            let second = b.current_at(station, station.latitude, station.longitude, now());
            assert_eq!(first, second);
        }
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn latitude_strategy() -> impl Strategy<Value = f64> {
        -90.0..=90.0f64
    }

    fn longitude_strategy() -> impl Strategy<Value = f64> {
        -180.0..=180.0f64
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Observation fields stay inside their documented ranges
        #[test]
        fn prop_observation_ranges(
            seed in any::<u64>(),
            lat in latitude_strategy(),
            lon in longitude_strategy()
        ) {
            let catalogue = StationCatalogue::fixture_at(now());
            let generator = WeatherGenerator::seeded(seed);
            let station = catalogue.nearest(lat, lon).unwrap();
            let obs = generator.current_at(station, lat, lon, now());

            prop_assert!(obs.humidity <= 100);
            prop_assert!(obs.humidity >= 30);
            prop_assert!(obs.uv_index <= 11);
            prop_assert!(obs.wind_direction <= 315);
            prop_assert_eq!(obs.wind_direction % 45, 0);
            prop_assert_eq!(
                obs.wind_description.as_str(),
                WIND_DIRECTIONS[usize::from(obs.wind_direction / 45)]
            );
            prop_assert!(obs.wind_speed >= 0.0);
            prop_assert!(obs.precipitation_24h >= 0.0);
            prop_assert_eq!(obs.latitude, lat);
            prop_assert_eq!(obs.longitude, lon);
            prop_assert_eq!(&obs.station_id, &station.id);
        }

        /// Temperatures are rounded to one decimal and centred on the band
        #[test]
        fn prop_temperature_is_rounded(seed in any::<u64>(), lat in latitude_strategy()) {
            let catalogue = StationCatalogue::fixture_at(now());
            let generator = WeatherGenerator::seeded(seed);
            let obs = generator.current_at(&catalogue.list()[0], lat, 0.0, now());

            let tenths = obs.temperature * 10.0;
            prop_assert!((tenths - tenths.round()).abs() < 1e-6);
            // Ten standard deviations away would be a broken distribution
            let base = ClimateBand::for_latitude(lat).base_temperature();
            prop_assert!((obs.temperature - base).abs() < 50.0);
        }

        /// Forecast length equals the requested days, dates run from tomorrow
        #[test]
        fn prop_forecast_dates(seed in any::<u64>(), days in 1u32..=10, offset in 0i64..3650) {
            let generator = WeatherGenerator::seeded(seed);
            let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset);
            let forecast = generator.forecast(today, days);

            prop_assert_eq!(forecast.len(), days as usize);
            for (index, day) in forecast.iter().enumerate() {
                prop_assert_eq!(day.date, today + Duration::days(index as i64 + 1));
                prop_assert!(day.min_temperature <= day.max_temperature);
                prop_assert!(day.precipitation_probability <= 100);
                prop_assert!(day.humidity >= 40 && day.humidity < 100);
                prop_assert!(day.uv_index <= 11);

                let (hour, minute) = parse_clock(&day.sunrise);
                prop_assert!((6..=7).contains(&hour) && minute < 60);
                let (hour, minute) = parse_clock(&day.sunset);
                prop_assert!((19..=21).contains(&hour) && minute < 60);
            }
        }
    }
}
