//! Response models for the Meteorologia Mock API
//!
//! Re-exports the wire models from the shared crate

pub use shared::models::*;
