//! Shared types and core logic for the Meteorologia Mock API
//!
//! This crate contains everything the HTTP backend needs that does not depend
//! on the transport: station and weather models, the read-only station
//! catalogue, the synthetic weather generator, geodesy and argument validation.

pub mod catalogue;
pub mod generator;
pub mod geo;
pub mod models;
pub mod types;
pub mod validation;

pub use catalogue::*;
pub use generator::*;
pub use geo::*;
pub use models::*;
pub use types::*;
pub use validation::*;
