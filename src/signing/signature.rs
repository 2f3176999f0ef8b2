use crate::types::PaapiError;
use chrono::{DateTime, NaiveDateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// SigV4 algorithm identifier
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Service name in the PA-API credential scope
pub const SERVICE: &str = "ProductAdvertisingAPI";

const TERMINATOR: &str = "aws4_request";

const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Format a UTC instant as an ISO-8601 basic timestamp (`20250101T120000Z`)
pub fn format_amz_date(at: DateTime<Utc>) -> String {
    at.format(AMZ_DATE_FORMAT).to_string()
}

/// Return the `YYYYMMDD` date stamp of a basic-format timestamp
///
/// Rejects anything that is not exactly `YYYYMMDDTHHMMSSZ`.
pub fn date_stamp(amz_date: &str) -> Result<&str, PaapiError> {
    NaiveDateTime::parse_from_str(amz_date, AMZ_DATE_FORMAT).map_err(|e| {
        PaapiError::InvalidRequest(format!("Invalid x-amz-date '{}': {}", amz_date, e))
    })?;

    amz_date
        .get(..8)
        .ok_or_else(|| PaapiError::InvalidRequest(format!("Invalid x-amz-date '{}'", amz_date)))
}

/// Hex-encoded SHA-256 of the exact body bytes
pub fn hash_payload(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}

/// `<date>/<region>/<service>/aws4_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialScope {
    pub date: String,
    pub region: String,
    pub service: String,
}

impl CredentialScope {
    pub fn new(
        date: impl Into<String>,
        region: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            region: region.into(),
            service: service.into(),
        }
    }
}

impl fmt::Display for CredentialScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.date, self.region, self.service, TERMINATOR
        )
    }
}

/// Lower-case and sort header names, trimming values
///
/// Names that collide once lower-cased are rejected.
fn canonical_header_map(
    headers: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, &str>, PaapiError> {
    let mut canonical = BTreeMap::new();
    for (name, value) in headers {
        let lower = name.to_ascii_lowercase();
        if canonical.insert(lower, value.trim()).is_some() {
            return Err(PaapiError::InvalidRequest(format!(
                "Header '{}' given more than once with different case",
                name
            )));
        }
    }
    Ok(canonical)
}

/// Signed-headers list: sorted lower-case names joined by `;`
pub fn signed_header_names(headers: &BTreeMap<String, String>) -> Result<String, PaapiError> {
    Ok(canonical_header_map(headers)?
        .into_keys()
        .collect::<Vec<_>>()
        .join(";"))
}

/// Build the canonical request string
///
/// `payload` must be the exact bytes sent as the request body, otherwise the
/// vendor computes a different hash and rejects the signature.
pub fn build_canonical_request(
    method: &str,
    uri: &str,
    query: &str,
    headers: &BTreeMap<String, String>,
    payload: &[u8],
) -> Result<String, PaapiError> {
    let canonical = canonical_header_map(headers)?;

    let mut canonical_headers = String::new();
    for (name, value) in &canonical {
        canonical_headers.push_str(name);
        canonical_headers.push(':');
        canonical_headers.push_str(value);
        canonical_headers.push('\n');
    }

    let signed_headers = canonical.keys().map(String::as_str).collect::<Vec<_>>().join(";");

    // HTTPMethod \n CanonicalURI \n CanonicalQueryString \n
    // CanonicalHeaders \n SignedHeaders \n HashedPayload
    Ok(format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        method,
        uri,
        query,
        canonical_headers,
        signed_headers,
        hash_payload(payload)
    ))
}

/// Build the string to sign
///
/// `amz_date` must be a basic-format UTC timestamp whose first eight
/// characters match `scope.date`.
pub fn build_string_to_sign(
    amz_date: &str,
    scope: &CredentialScope,
    canonical_request: &str,
) -> String {
    let hashed_canonical_request = hex::encode(Sha256::digest(canonical_request.as_bytes()));

    format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM, amz_date, scope, hashed_canonical_request
    )
}

/// Intermediate keys of the SigV4 derivation, all raw bytes
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKeyChain {
    pub k_date: Vec<u8>,
    pub k_region: Vec<u8>,
    pub k_service: Vec<u8>,
    pub k_signing: Vec<u8>,
}

impl fmt::Debug for SigningKeyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKeyChain(<redacted>)")
    }
}

/// Run the four chained HMAC stages from the secret key to the signing key
pub fn derive_signing_key_chain(
    secret_key: &str,
    date: &str,
    signing_region: &str,
    service: &str,
) -> Result<SigningKeyChain, PaapiError> {
    let k_secret = format!("AWS4{}", secret_key);
    let k_date = hmac_sha256(k_secret.as_bytes(), date.as_bytes())?;
    let k_region = hmac_sha256(&k_date, signing_region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    let k_signing = hmac_sha256(&k_service, TERMINATOR.as_bytes())?;

    Ok(SigningKeyChain {
        k_date,
        k_region,
        k_service,
        k_signing,
    })
}

/// Derive the signing key for a date/region/service
pub fn derive_signing_key(
    secret_key: &str,
    date: &str,
    signing_region: &str,
    service: &str,
) -> Result<Vec<u8>, PaapiError> {
    derive_signing_key_chain(secret_key, date, signing_region, service).map(|c| c.k_signing)
}

/// Lower-case hex HMAC-SHA256 of the string to sign
pub fn sign(string_to_sign: &str, signing_key: &[u8]) -> Result<String, PaapiError> {
    let signature = hmac_sha256(signing_key, string_to_sign.as_bytes())?;
    Ok(hex::encode(signature))
}

/// Build the `Authorization` header value
pub fn build_authorization_header(
    access_key: &str,
    scope: &CredentialScope,
    signed_headers: &str,
    signature: &str,
) -> String {
    format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, access_key, scope, signed_headers, signature
    )
}

/// Components of a parsed `Authorization` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationInfo {
    pub access_key: String,
    pub credential_scope: String,
    pub signed_headers: Vec<String>,
    pub signature: String,
}

/// Parse an `AWS4-HMAC-SHA256 Credential=..., SignedHeaders=..., Signature=...` header
pub fn parse_authorization_header(header: &str) -> Result<AuthorizationInfo, PaapiError> {
    let parts = header
        .strip_prefix(ALGORITHM)
        .and_then(|rest| rest.strip_prefix(' '))
        .ok_or_else(|| {
            PaapiError::InvalidRequest("Invalid authorization header format".to_string())
        })?;

    let mut credential = None;
    let mut signed_headers = None;
    let mut signature = None;

    for part in parts.split(',') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix("Credential=") {
            credential = Some(value);
        } else if let Some(value) = part.strip_prefix("SignedHeaders=") {
            signed_headers = Some(value);
        } else if let Some(value) = part.strip_prefix("Signature=") {
            signature = Some(value);
        }
    }

    let credential = credential.ok_or_else(|| {
        PaapiError::InvalidRequest("Missing Credential in authorization header".to_string())
    })?;
    let signed_headers = signed_headers.ok_or_else(|| {
        PaapiError::InvalidRequest("Missing SignedHeaders in authorization header".to_string())
    })?;
    let signature = signature.ok_or_else(|| {
        PaapiError::InvalidRequest("Missing Signature in authorization header".to_string())
    })?;

    // AKIDEXAMPLE/20150830/us-east-1/service/aws4_request
    let (access_key, credential_scope) = credential
        .split_once('/')
        .filter(|(_, scope)| scope.split('/').count() == 4)
        .ok_or_else(|| PaapiError::InvalidRequest("Invalid credential format".to_string()))?;

    Ok(AuthorizationInfo {
        access_key: access_key.to_string(),
        credential_scope: credential_scope.to_string(),
        signed_headers: signed_headers.split(';').map(str::to_string).collect(),
        signature: signature.to_string(),
    })
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, PaapiError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| PaapiError::Internal(format!("HMAC error: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
