//! Error handling for the Meteorologia Mock API
//!
//! Handler-raised errors use the compact `{"error": "<message>"}` body. Anything
//! the handlers did not anticipate goes through the structured body carrying an
//! [`ErrorCode`], a timestamp and the HTTP status. A copy of the structured body
//! with `exception_type` and `stack_trace` filled in rides along as a response
//! extension; the `error_details` layer swaps it in when enabled.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use shared::types::{local_datetime, ErrorCode};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    // Malformed input the handlers never saw, e.g. `lat=abc`
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Operation not implemented")]
    NotImplemented,

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(message: &str) -> Self {
        AppError::NotFound(message.to_string())
    }

    pub fn bad_request(message: &str) -> Self {
        AppError::BadRequest(message.to_string())
    }

    fn code(&self) -> Option<ErrorCode> {
        match self {
            AppError::NotFound(_) | AppError::BadRequest(_) => None,
            AppError::InvalidParameters(_) => Some(ErrorCode::InvalidParameters),
            AppError::NotImplemented => Some(ErrorCode::NotImplemented),
            AppError::Internal(_) | AppError::InternalError(_) => Some(ErrorCode::InternalError),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::InvalidParameters(_) => StatusCode::BAD_REQUEST,
            AppError::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            AppError::Internal(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::InvalidParameters(detail) => format!("Parámetros inválidos: {}", detail),
            AppError::NotImplemented => "Operación no implementada".to_string(),
            AppError::Internal(_) | AppError::InternalError(_) => {
                "Error interno del servidor".to_string()
            }
        }
    }

    fn exception_type(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NotFound",
            AppError::BadRequest(_) => "BadRequest",
            AppError::InvalidParameters(_) => "InvalidParameters",
            AppError::NotImplemented => "NotImplemented",
            AppError::Internal(_) => "Internal",
            AppError::InternalError(_) => "InternalError",
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidParameters(rejection.body_text())
    }
}

/// Compact body for expected failures
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body emitted for unanticipated failures
#[derive(Serialize, Clone, Debug)]
pub struct StructuredErrorResponse {
    pub error: bool,
    pub error_code: ErrorCode,
    pub message: String,
    #[serde(with = "local_datetime")]
    pub timestamp: NaiveDateTime,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Error: {}", self);
        }

        let message = self.client_message();
        match self.code() {
            None => (status, Json(ErrorResponse { error: message })).into_response(),
            Some(code) => {
                let body = StructuredErrorResponse {
                    error: true,
                    error_code: code,
                    message,
                    timestamp: chrono::Local::now().naive_local(),
                    status: status.as_u16(),
                    exception_type: None,
                    stack_trace: None,
                };
                let detailed = StructuredErrorResponse {
                    exception_type: Some(self.exception_type().to_string()),
                    stack_trace: Some(format!("{:?}", self)),
                    ..body.clone()
                };

                let mut response = (status, Json(body)).into_response();
                response.extensions_mut().insert(detailed);
                response
            }
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_is_compact() {
        let (status, body) = body_json(AppError::not_found("Estación no encontrada")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"error": "Estación no encontrada"}));
    }

    #[tokio::test]
    async fn test_bad_request_is_compact() {
        let (status, body) =
            body_json(AppError::bad_request("El límite debe estar entre 1 y 50")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "El límite debe estar entre 1 y 50");
    }

    #[tokio::test]
    async fn test_invalid_parameters_is_structured() {
        let (status, body) =
            body_json(AppError::InvalidParameters("lat: invalid float".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
        assert_eq!(body["error_code"], "INVALID_PARAMETERS");
        assert_eq!(body["message"], "Parámetros inválidos: lat: invalid float");
        assert_eq!(body["status"], 400);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_not_implemented() {
        let (status, body) = body_json(AppError::NotImplemented).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body["error_code"], "NOT_IMPLEMENTED");
        assert_eq!(body["message"], "Operación no implementada");
        assert_eq!(body["status"], 501);
    }

    #[tokio::test]
    async fn test_internal_hides_cause() {
        let (status, body) =
            body_json(AppError::InternalError(anyhow::anyhow!("rng exploded"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error_code"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "Error interno del servidor");
        assert!(body.get("stack_trace").is_none());
    }

    #[test]
    fn test_structured_error_carries_details_extension() {
        let response = AppError::InvalidParameters("lat: invalid float".to_string()).into_response();
        let detailed = response
            .extensions()
            .get::<StructuredErrorResponse>()
            .unwrap();
        assert_eq!(detailed.error_code, ErrorCode::InvalidParameters);
        assert_eq!(detailed.status, 400);
        assert_eq!(detailed.exception_type.as_deref(), Some("InvalidParameters"));
        assert!(detailed
            .stack_trace
            .as_deref()
            .unwrap()
            .contains("lat: invalid float"));
    }

    #[test]
    fn test_compact_error_has_no_details_extension() {
        let response = AppError::not_found("Estación no encontrada").into_response();
        assert!(response.extensions().get::<StructuredErrorResponse>().is_none());
    }
}
