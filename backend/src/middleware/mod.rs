//! HTTP middleware

pub mod error_details;
pub mod headers;

pub use error_details::error_details;
pub use headers::response_headers;
