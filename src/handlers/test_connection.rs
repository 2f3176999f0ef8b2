use crate::{
    app_state::AppState,
    types::{Credentials, PaapiError, Product},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TestConnectionRequest {
    pub asin: String,
    pub credentials: Credentials,
}

/// POST /connection/test - Validate caller-supplied credentials with one lookup
pub async fn test_connection(
    State(app_state): State<AppState>,
    payload: Result<Json<TestConnectionRequest>, JsonRejection>,
) -> Result<Json<Product>, PaapiError> {
    let Json(request) = payload.map_err(|e| PaapiError::InvalidRequest(e.body_text()))?;

    tracing::info!(
        "Test connection: region={}, asin={}",
        request.credentials.region,
        request.asin
    );

    let product = app_state
        .client
        .test_connection(&request.credentials, &request.asin)
        .await?;

    Ok(Json(product))
}
