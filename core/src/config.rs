//! Credentials and base URLs.

use std::fmt;

use crate::error::{ClockifyError, Result};
use crate::http::ApiBase;

pub const DEFAULT_ENDPOINT: &str = "https://api.clockify.me/api";
pub const DEFAULT_V1_ENDPOINT: &str = "https://api.clockify.me/api/v1";

/// Immutable client configuration. Built once and handed to the client;
/// nothing mutates it afterwards.
#[derive(Clone)]
pub struct ClockifyConfig {
    api_key: String,
    endpoint: String,
    v1_endpoint: String,
}

impl ClockifyConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            v1_endpoint: DEFAULT_V1_ENDPOINT.to_string(),
        }
    }

    /// Point both base URLs somewhere else, e.g. a local mock server.
    pub fn with_endpoints(mut self, stable: &str, versioned: &str) -> Self {
        self.endpoint = stable.trim_end_matches('/').to_string();
        self.v1_endpoint = versioned.trim_end_matches('/').to_string();
        self
    }

    /// Read `CLOCKIFY_API_KEY`, plus optional `CLOCKIFY_ENDPOINT` and
    /// `CLOCKIFY_V1_ENDPOINT` overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("CLOCKIFY_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ClockifyError::MissingApiKey)?;
        let endpoint = lookup("CLOCKIFY_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let v1_endpoint =
            lookup("CLOCKIFY_V1_ENDPOINT").unwrap_or_else(|| DEFAULT_V1_ENDPOINT.to_string());
        Ok(Self::new(api_key).with_endpoints(&endpoint, &v1_endpoint))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self, base: ApiBase) -> &str {
        match base {
            ApiBase::Stable => &self.endpoint,
            ApiBase::Versioned => &self.v1_endpoint,
        }
    }
}

impl fmt::Debug for ClockifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockifyConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("v1_endpoint", &self.v1_endpoint)
            .finish()
    }
}
