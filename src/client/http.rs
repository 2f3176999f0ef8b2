use super::transform::GetItemsResponse;
use crate::signing::SignedRequest;
use crate::types::PaapiError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Issue one POST for a signed request and decode the vendor JSON
///
/// No retries: a failed call is reported to the caller as-is.
pub async fn send_signed_request(
    http: &reqwest::Client,
    url: &str,
    signed: &SignedRequest,
) -> Result<GetItemsResponse, PaapiError> {
    let mut headers = HeaderMap::new();
    for (name, value) in signed.header_pairs() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| PaapiError::Internal(format!("Invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| PaapiError::Internal(format!("Invalid value for '{}': {}", name, e)))?;
        headers.insert(name, value);
    }

    let response = http
        .post(url)
        .headers(headers)
        .body(signed.body.clone())
        .send()
        .await
        .map_err(|e| PaapiError::Transport(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| PaapiError::Transport(e.to_string()))?;

    if !status.is_success() {
        tracing::warn!("PA-API responded with HTTP {}", status.as_u16());
        return Err(PaapiError::Upstream {
            status: status.as_u16(),
            body: text,
        });
    }

    serde_json::from_str(&text).map_err(|e| PaapiError::Decode(e.to_string()))
}
