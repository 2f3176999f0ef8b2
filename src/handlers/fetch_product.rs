use crate::{
    app_state::AppState,
    types::{PaapiError, Product},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FetchProductRequest {
    pub asin: String,
}

/// POST /products/fetch - Fetch a product with the configured credentials
pub async fn fetch_product(
    State(app_state): State<AppState>,
    payload: Result<Json<FetchProductRequest>, JsonRejection>,
) -> Result<Json<Product>, PaapiError> {
    let Json(request) = payload.map_err(|e| PaapiError::InvalidRequest(e.body_text()))?;

    let credentials = app_state.credentials.as_ref().ok_or_else(|| {
        PaapiError::Configuration(
            "Amazon credentials not configured. Please set up your API credentials.".to_string(),
        )
    })?;

    tracing::info!("Fetch product: asin={}", request.asin);

    let product = app_state
        .client
        .fetch_product(credentials, &request.asin)
        .await?;

    Ok(Json(product))
}
