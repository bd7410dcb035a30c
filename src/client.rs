use crate::app::ports::IngestionPort;
use crate::config::Config;
use crate::context::Context;
use crate::error::Result;
use crate::infra::basic_auth::BasicAuth;
use crate::infra::rest_client::RestClient;
use crate::types::{Ingestion, IngestionResponse};
use async_trait::async_trait;

/// Langfuse API client authenticated with a public/secret key pair.
///
/// Cloning is cheap and clones share one connection pool; a single client can
/// serve any number of concurrent ingestion calls.
#[derive(Clone)]
pub struct Client {
    config: Config,
    rest_client: RestClient,
}

impl Client {
    /// Builds a client from `LANGFUSE_HOST`, `LANGFUSE_PUBLIC_KEY` and
    /// `LANGFUSE_SECRET_KEY`; see [`Config::from_env`].
    pub fn new() -> Self {
        Self::from_config(Config::from_env())
    }

    pub fn from_config(config: Config) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Like [`Client::from_config`] but reusing a caller-built reqwest client
    /// (proxies, TLS roots, timeouts).
    pub fn with_http_client(config: Config, http: reqwest::Client) -> Self {
        let auth = BasicAuth::new(&config.public_key, &config.secret_key);
        let rest_client = RestClient::with_http_client(config.host.clone(), http).with_modifier(auth);
        Self {
            config,
            rest_client,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn host(&self) -> &str {
        self.rest_client.base_url()
    }

    /// Submits one ingestion batch.
    ///
    /// Makes exactly one POST. Transport failures, non-2xx statuses, decode
    /// failures and context cancellation are returned unchanged.
    pub async fn ingestion(&self, ctx: &Context, request: &Ingestion) -> Result<IngestionResponse> {
        self.rest_client.post(ctx, request).await
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IngestionPort for Client {
    async fn ingest(&self, ctx: &Context, request: &Ingestion) -> Result<IngestionResponse> {
        self.ingestion(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::DEFAULT_HOST;

    #[test]
    fn test_from_config_binds_host() {
        let client = Client::from_config(Config::new("http://localhost:3000", "pk", "sk"));
        assert_eq!(client.host(), "http://localhost:3000");
        assert_eq!(client.config().public_key, "pk");
    }

    #[test]
    fn test_default_config_binds_cloud_host() {
        let client = Client::from_config(Config::default());
        assert_eq!(client.host(), DEFAULT_HOST);
    }

    #[test]
    fn test_client_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Client>();
    }
}
