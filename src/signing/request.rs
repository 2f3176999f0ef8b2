use super::endpoint::RegionEndpoint;
use super::signature::{
    CredentialScope, SERVICE, build_authorization_header, build_canonical_request,
    build_string_to_sign, date_stamp, derive_signing_key, format_amz_date, sign, signed_header_names,
};
use crate::types::{Credentials, PaapiError};
use crate::variant::ApiVariant;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

const METHOD: &str = "POST";

/// A fully authenticated PA-API request, built once per outbound call
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub url: String,
    pub amz_date: String,
    pub date: String,
    pub canonical_request: String,
    pub string_to_sign: String,
    pub signature: String,
    pub authorization: String,
    /// Signed headers keyed by lower-case name; the single source for both
    /// the canonical request and the headers actually sent
    pub headers: BTreeMap<String, String>,
    /// Exact body bytes that were hashed
    pub body: String,
}

impl SignedRequest {
    /// Every header to send, `authorization` included
    pub fn header_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .chain(std::iter::once(("authorization", self.authorization.as_str())))
    }
}

/// Sign `body` for the given credentials, endpoint and API variant at `at`
///
/// Pure apart from its inputs: the same arguments always give the same
/// signature.
pub fn sign_request(
    credentials: &Credentials,
    endpoint: &RegionEndpoint,
    variant: &ApiVariant,
    body: String,
    at: DateTime<Utc>,
) -> Result<SignedRequest, PaapiError> {
    let amz_date = format_amz_date(at);
    let date = date_stamp(&amz_date)?.to_string();

    let mut headers = BTreeMap::new();
    headers.insert("content-type".to_string(), "application/json".to_string());
    headers.insert("host".to_string(), endpoint.host.to_string());
    headers.insert("x-amz-date".to_string(), amz_date.clone());
    headers.insert("x-amz-target".to_string(), variant.target());
    if let Some(encoding) = variant.content_encoding {
        headers.insert("content-encoding".to_string(), encoding.to_string());
    }

    let canonical_request =
        build_canonical_request(METHOD, variant.path, "", &headers, body.as_bytes())?;

    let scope = CredentialScope::new(date.as_str(), endpoint.signing_region, SERVICE);
    let string_to_sign = build_string_to_sign(&amz_date, &scope, &canonical_request);

    let signing_key = derive_signing_key(
        &credentials.secret_key,
        &date,
        endpoint.signing_region,
        SERVICE,
    )?;
    let signature = sign(&string_to_sign, &signing_key)?;

    let authorization = build_authorization_header(
        &credentials.access_key,
        &scope,
        &signed_header_names(&headers)?,
        &signature,
    );

    Ok(SignedRequest {
        url: format!("https://{}{}", endpoint.host, variant.path),
        amz_date,
        date,
        canonical_request,
        string_to_sign,
        signature,
        authorization,
        headers,
        body,
    })
}
