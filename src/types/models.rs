use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::PaapiError;

/// PA-API credentials, supplied per call
///
/// Deserialize-only, so the secret can only come in, never go out.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub partner_tag: String,
    /// Marketplace code such as `com`, `co.uk` or `co.jp`
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "com".to_string()
}

impl Credentials {
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        partner_tag: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            partner_tag: partner_tag.into(),
            region: region.into(),
        }
    }

    /// Check that every field the signer needs is present
    pub fn validate(&self) -> Result<(), PaapiError> {
        let fields = [
            ("accessKey", &self.access_key),
            ("secretKey", &self.secret_key),
            ("partnerTag", &self.partner_tag),
            ("region", &self.region),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(PaapiError::Configuration(format!(
                    "missing Amazon credential field '{}'",
                    name
                )));
            }
        }

        Ok(())
    }
}

// Secret key stays out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("partner_tag", &self.partner_tag)
            .field("region", &self.region)
            .finish()
    }
}

/// Product image at a single size tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Normalized product record handed back to the CMS
///
/// Every field except `asin` and `url` is optional: absence means the vendor
/// had no data for this item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub asin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_price: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ProductImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("AK", "super-secret", "tag-20", "com");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("AK"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_validate_names_missing_field() {
        let creds = Credentials::new("AK", "SK", "  ", "com");
        match creds.validate() {
            Err(PaapiError::Configuration(msg)) => assert!(msg.contains("partnerTag")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(Credentials::new("AK", "SK", "tag-20", "co.uk").validate().is_ok());
    }

    #[test]
    fn test_credentials_deserialize_camel_case_with_default_region() {
        let creds: Credentials = serde_json::from_str(
            r#"{"accessKey":"AK","secretKey":"SK","partnerTag":"tag-20"}"#,
        )
        .unwrap();
        assert_eq!(creds.region, "com");
        assert_eq!(creds.partner_tag, "tag-20");
    }
}
