use crate::types::{Credentials, PaapiError};
use crate::variant::VariantName;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub credentials: Option<Credentials>,
    #[serde(default)]
    pub variant: VariantName,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Base URL replacing `https://<regional-host>` for outbound calls
    #[serde(default)]
    pub endpoint_override: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: None,
            variant: VariantName::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            endpoint_override: None,
        }
    }
}

/// Credential fields coming from CLI flags or the environment
#[derive(Debug, Clone, Default)]
pub struct CredentialOverrides {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub partner_tag: Option<String>,
    pub region: Option<String>,
}

impl CredentialOverrides {
    fn is_empty(&self) -> bool {
        self.access_key.is_none()
            && self.secret_key.is_none()
            && self.partner_tag.is_none()
            && self.region.is_none()
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PaapiError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PaapiError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            PaapiError::Configuration(format!("cannot parse {}: {}", path.display(), e))
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Layer CLI/env values over the file's credentials
    pub fn apply_overrides(&mut self, overrides: CredentialOverrides) {
        if overrides.is_empty() {
            return;
        }

        let mut credentials = self
            .credentials
            .take()
            .unwrap_or_else(|| Credentials::new("", "", "", crate::signing::DEFAULT_REGION));

        if let Some(v) = overrides.access_key {
            credentials.access_key = v;
        }
        if let Some(v) = overrides.secret_key {
            credentials.secret_key = v;
        }
        if let Some(v) = overrides.partner_tag {
            credentials.partner_tag = v;
        }
        if let Some(v) = overrides.region {
            credentials.region = v;
        }

        self.credentials = Some(credentials);
    }
}
