//! Query services for the Meteorologia Mock API

pub mod station;
pub mod weather;

pub use station::{StationFilters, StationService};
pub use weather::WeatherService;
