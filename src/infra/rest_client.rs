use crate::app::ports::{RequestModifier, RestResource};
use crate::context::Context;
use crate::error::{IngestError, Result};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// JSON-over-HTTP transport bound to one base URL.
///
/// Cloning shares the underlying connection pool and request modifier.
#[derive(Clone)]
pub struct RestClient {
    base_url: String,
    http: reqwest::Client,
    modifier: Option<Arc<dyn RequestModifier>>,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
            modifier: None,
        }
    }

    /// Installs the hook run on every request issued from now on, replacing
    /// any previous one.
    pub fn with_modifier<M>(mut self, modifier: M) -> Self
    where
        M: RequestModifier + 'static,
    {
        self.modifier = Some(Arc::new(modifier));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| IngestError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// POSTs `request` as JSON to its resource path and decodes the reply.
    ///
    /// The exchange is abandoned, and the in-flight request dropped, as soon as
    /// `ctx` is cancelled or its deadline passes.
    #[instrument(skip(self, ctx, request), fields(base_url = %self.base_url))]
    pub async fn post<Req, Res>(&self, ctx: &Context, request: &Req) -> Result<Res>
    where
        Req: RestResource + Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        if let Some(err) = ctx.err() {
            return Err(err);
        }

        let url = self.endpoint(&request.path())?;
        let mut http_request = self.http.post(url).json(request).build()?;
        if let Some(modifier) = &self.modifier {
            modifier.modify(&mut http_request);
        }

        tokio::select! {
            biased;
            err = ctx.done() => {
                debug!(error = %err, "Request abandoned");
                Err(err)
            }
            result = self.dispatch::<Res>(http_request) => result,
        }
    }

    async fn dispatch<Res: DeserializeOwned>(&self, http_request: reqwest::Request) -> Result<Res> {
        debug!(url = %http_request.url(), "Dispatching request");
        let response = self.http.execute(http_request).await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Received response");

        if !status.is_success() {
            return Err(IngestError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, USER_AGENT};
    use serde_json::Value;

    #[derive(Serialize)]
    struct Probe;

    impl RestResource for Probe {
        fn path(&self) -> String {
            "/probe".to_string()
        }
    }

    #[test]
    fn test_endpoint_concatenates_verbatim() {
        let client = RestClient::new("http://localhost:3000");
        assert_eq!(
            client.endpoint("/api/public/ingestion").unwrap().as_str(),
            "http://localhost:3000/api/public/ingestion"
        );
    }

    #[test]
    fn test_endpoint_rejects_garbage_host() {
        let client = RestClient::new("not a url");
        let err = client.endpoint("/probe").unwrap_err();
        assert!(matches!(err, IngestError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_done_context_short_circuits() {
        // Unroutable host: the call must fail before any connection attempt
        let client = RestClient::new("http://10.255.255.1:9");
        let (ctx, handle) = Context::with_cancel();
        handle.cancel();

        let result: Result<Value> = client.post(&ctx, &Probe).await;
        assert!(matches!(result, Err(IngestError::Cancelled)));
    }

    #[tokio::test]
    async fn test_invalid_url_surfaces_error() {
        let client = RestClient::new("::::");
        let result: Result<Value> = client.post(&Context::background(), &Probe).await;
        assert!(matches!(result, Err(IngestError::InvalidUrl(_))));
    }

    #[test]
    fn test_closure_modifier() {
        let client = RestClient::new("http://localhost").with_modifier(|req: &mut reqwest::Request| {
            req.headers_mut()
                .insert(USER_AGENT, HeaderValue::from_static("probe"));
        });
        let mut req = reqwest::Request::new(
            reqwest::Method::POST,
            Url::parse("http://localhost/probe").unwrap(),
        );
        client.modifier.as_ref().unwrap().modify(&mut req);
        assert_eq!(req.headers()[USER_AGENT], "probe");
    }
}
