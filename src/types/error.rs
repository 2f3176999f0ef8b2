use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Errors surfaced by the signer, the PA-API call and the relay routes
#[derive(Debug, thiserror::Error)]
pub enum PaapiError {
    /// Missing or invalid credentials
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The vendor endpoint could not be reached (DNS, connect, timeout, reset)
    #[error("transport error: {0}")]
    Transport(String),
    /// The vendor answered with a non-2xx status
    #[error("Amazon API error: {status} - {body}")]
    Upstream { status: u16, body: String },
    /// The vendor body was not JSON or lacked the item array
    #[error("decode error: {0}")]
    Decode(String),
    /// The vendor answered successfully but returned no item for the ASIN
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error body returned by the relay
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    upstream_status: Option<u16>,
    request_id: String,
}

impl PaapiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaapiError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PaapiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            PaapiError::Transport(_) => StatusCode::BAD_GATEWAY,
            PaapiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            PaapiError::Decode(_) => StatusCode::BAD_GATEWAY,
            PaapiError::NotFound(_) => StatusCode::NOT_FOUND,
            PaapiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PaapiError::Configuration(_) => "ConfigurationError",
            PaapiError::InvalidRequest(_) => "InvalidRequest",
            PaapiError::Transport(_) => "TransportError",
            PaapiError::Upstream { .. } => "UpstreamError",
            PaapiError::Decode(_) => "DecodeError",
            PaapiError::NotFound(_) => "NotFoundError",
            PaapiError::Internal(_) => "InternalError",
        }
    }
}

impl IntoResponse for PaapiError {
    fn into_response(self) -> Response {
        let upstream_status = match &self {
            PaapiError::Upstream { status, .. } => Some(*status),
            _ => None,
        };

        let body = ErrorResponse {
            code: self.error_code(),
            message: self.to_string(),
            upstream_status,
            request_id: uuid::Uuid::new_v4().to_string(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
