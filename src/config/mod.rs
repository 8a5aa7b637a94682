#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::CredentialsProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_no_placeholder, validate_non_empty_string, validate_positive_number, validate_url,
    Validate,
};
use std::fmt;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://api.ean.com/ean-services/rs/hotel/v3/";

/// Immutable provider credentials and REST root, threaded through every call.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: Url,
    api_key: String,
    customer_id: String,
    timeout_seconds: Option<u64>,
}

impl ClientConfig {
    pub fn new<K: Into<String>, C: Into<String>>(api_key: K, customer_id: C) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            api_key: api_key.into(),
            customer_id: customer_id.into(),
            timeout_seconds: None,
        }
    }

    /// The action is appended as the last path segment, so the root always ends in `/`.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        validate_url("base_url", base_url)?;
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        self.base_url = Url::parse(&normalized)?;
        Ok(self)
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl CredentialsProvider for ClientConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn customer_id(&self) -> &str {
        &self.customer_id
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", self.base_url.as_str())?;
        validate_non_empty_string("api_key", &self.api_key)?;
        validate_no_placeholder("api_key", &self.api_key)?;
        validate_non_empty_string("customer_id", &self.customer_id)?;
        validate_no_placeholder("customer_id", &self.customer_id)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("customer_id", &self.customer_id)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}
