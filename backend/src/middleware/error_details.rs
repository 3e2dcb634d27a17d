//! Diagnostic fields on structured error bodies

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::StructuredErrorResponse;
use crate::AppState;

/// Replaces a structured error body with its detailed copy when
/// `errors.expose_details` is on
pub async fn error_details(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let detailed = response.extensions_mut().remove::<StructuredErrorResponse>();

    match detailed {
        Some(detailed) if state.expose_error_details => {
            (response.status(), Json(detailed)).into_response()
        }
        _ => response,
    }
}
