use crate::types::PaapiError;
use axum::http::Uri;

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> PaapiError {
    PaapiError::NotFound(format!("No route for {}", uri.path()))
}
