mod http;
mod payload;
pub mod transform;

pub use http::send_signed_request;
pub use payload::GetItemsRequest;
pub use transform::{GetItemsResponse, Item, transform_product};

use crate::signing::{RegionEndpoint, resolve_endpoint, sign_request};
use crate::types::{Credentials, PaapiError, Product};
use crate::variant::ApiVariant;
use chrono::Utc;
use std::time::Duration;

/// Most ItemIds a single GetItems call accepts
pub const MAX_ITEM_IDS: usize = 10;

/// Default per-call timeout for the outbound POST
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// PA-API client
///
/// Holds only the shared connection pool and call shape. Credentials are
/// passed on every call, so one client serves any number of tenants
/// concurrently.
#[derive(Debug, Clone)]
pub struct PaapiClient {
    http: reqwest::Client,
    variant: ApiVariant,
    endpoint_override: Option<String>,
}

impl PaapiClient {
    pub fn new(variant: ApiVariant, timeout: Duration) -> Result<Self, PaapiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PaapiError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            variant,
            endpoint_override: None,
        })
    }

    /// Send requests to `base_url` instead of the regional host
    ///
    /// Signing still uses the regional host, so the override only makes sense
    /// for mocks and local proxies.
    pub fn with_endpoint_override(mut self, base_url: impl Into<String>) -> Self {
        self.endpoint_override = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn variant(&self) -> &ApiVariant {
        &self.variant
    }

    fn target_url(&self, endpoint: &RegionEndpoint) -> String {
        match &self.endpoint_override {
            Some(base) => format!("{}{}", base, self.variant.path),
            None => format!("https://{}{}", endpoint.host, self.variant.path),
        }
    }

    /// Fetch one product
    pub async fn fetch_product(
        &self,
        credentials: &Credentials,
        asin: &str,
    ) -> Result<Product, PaapiError> {
        let mut products = self.fetch_products(credentials, &[asin]).await?;
        products
            .pop()
            .ok_or_else(|| PaapiError::NotFound(format!("No product data returned for {}", asin)))
    }

    /// Fetch a product purely to prove the credentials work
    pub async fn test_connection(
        &self,
        credentials: &Credentials,
        asin: &str,
    ) -> Result<Product, PaapiError> {
        self.fetch_product(credentials, asin).await
    }

    /// Fetch up to [`MAX_ITEM_IDS`] products in one GetItems call
    ///
    /// Products come back in request order. ASINs the vendor did not return
    /// are skipped; if none came back the call fails with `NotFound`.
    pub async fn fetch_products(
        &self,
        credentials: &Credentials,
        asins: &[&str],
    ) -> Result<Vec<Product>, PaapiError> {
        credentials.validate()?;

        // Repeated ASINs are sent once; first occurrence keeps its position.
        let mut unique: Vec<&str> = Vec::with_capacity(asins.len());
        for asin in asins.iter().map(|a| a.trim()) {
            if asin.is_empty() {
                return Err(PaapiError::InvalidRequest("ASIN must not be empty".to_string()));
            }
            if !unique.iter().any(|seen| seen.eq_ignore_ascii_case(asin)) {
                unique.push(asin);
            }
        }
        let asins = unique;

        if asins.is_empty() || asins.len() > MAX_ITEM_IDS {
            return Err(PaapiError::InvalidRequest(format!(
                "Between 1 and {} ASINs are allowed, got {}",
                MAX_ITEM_IDS,
                asins.len()
            )));
        }

        let endpoint = resolve_endpoint(&credentials.region);
        let body = GetItemsRequest::new(&asins, &credentials.partner_tag, &endpoint, &self.variant)
            .to_body()?;

        let fetched_at = Utc::now();
        let signed = sign_request(credentials, &endpoint, &self.variant, body, fetched_at)?;
        let url = self.target_url(&endpoint);

        tracing::debug!(
            "PA-API {} on {} for {} item(s)",
            self.variant.operation,
            endpoint.host,
            asins.len()
        );

        let response = send_signed_request(&self.http, &url, &signed).await?;

        match &response.items_result {
            Some(result) if result.items.is_none() => {
                return Err(PaapiError::Decode(
                    "ItemsResult has no Items array".to_string(),
                ));
            }
            None if response.errors.is_none() => {
                return Err(PaapiError::Decode(
                    "Response has neither ItemsResult nor Errors".to_string(),
                ));
            }
            _ => {}
        }

        let items = response.items();
        let products: Vec<Product> = asins
            .iter()
            .enumerate()
            .filter_map(|(index, asin)| {
                items
                    .iter()
                    .find(|item| {
                        item.asin
                            .as_deref()
                            .is_some_and(|found| found.eq_ignore_ascii_case(asin))
                    })
                    .or_else(|| items.get(index).filter(|item| item.asin.is_none()))
                    .map(|item| {
                        let mut product = transform_product(item, asin, &endpoint);
                        product.last_synced_at = Some(fetched_at);
                        product
                    })
            })
            .collect();

        if products.is_empty() {
            let detail = response
                .error_summary()
                .unwrap_or_else(|| "No product data returned from Amazon API".to_string());
            return Err(PaapiError::NotFound(detail));
        }

        for product in &products {
            tracing::info!("Fetched product {}", product.asin);
        }

        Ok(products)
    }
}
