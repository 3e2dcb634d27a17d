//! HTTP handlers for the Meteorologia Mock API

pub mod health;
pub mod stations;
pub mod weather;

pub use health::health_check;
pub use stations::*;
pub use weather::*;

use crate::error::AppError;

/// Fallback for methods other than GET on known paths
pub async fn not_implemented() -> AppError {
    AppError::NotImplemented
}
