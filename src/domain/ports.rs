use crate::utils::error::Result;
use async_trait::async_trait;
use url::Url;

/// Issues a GET and hands back the full response body.
///
/// Timeouts, retries and connection reuse belong to the implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<String>;
}

pub trait CredentialsProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn customer_id(&self) -> &str;
    fn base_url(&self) -> &Url;
}
