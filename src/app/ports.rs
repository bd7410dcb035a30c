use crate::context::Context;
use crate::error::Result;
use crate::types::{Ingestion, IngestionResponse};
use async_trait::async_trait;

/// Pre-dispatch hook run on every outgoing request of a transport.
///
/// Implementations must only touch the request itself; the same modifier is
/// shared by all concurrent calls on a client.
pub trait RequestModifier: Send + Sync {
    fn modify(&self, request: &mut reqwest::Request);
}

impl<F> RequestModifier for F
where
    F: Fn(&mut reqwest::Request) + Send + Sync,
{
    fn modify(&self, request: &mut reqwest::Request) {
        self(request)
    }
}

/// A request payload that knows which endpoint path it is posted to.
pub trait RestResource {
    fn path(&self) -> String;
}

// Ingestion-side port, implemented by the HTTP client and by test doubles
#[async_trait]
pub trait IngestionPort: Send + Sync {
    async fn ingest(&self, ctx: &Context, request: &Ingestion) -> Result<IngestionResponse>;
}
