//! Domain models for the Meteorologia Mock API

mod statistics;
mod station;
mod weather;

pub use statistics::*;
pub use station::*;
pub use weather::*;
