//! Client for the Langfuse ingestion API.
//!
//! Build a [`Client`] from an explicit [`Config`] or from the `LANGFUSE_*`
//! environment, then submit batches with [`Client::ingestion`]. Every request
//! carries a Basic auth header derived from the configured key pair.

pub mod client;
pub mod common;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod types;

// Ports and use cases, and the reqwest-backed adapters behind them
pub mod app;
pub mod infra;

pub use client::Client;
pub use config::Config;
pub use context::{CancelHandle, Context};
pub use error::{IngestError, Result};
pub use infra::basic_auth::basic_auth;
pub use types::{Ingestion, IngestionEvent, IngestionEventType, IngestionResponse};
