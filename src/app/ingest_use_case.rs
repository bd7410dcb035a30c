use crate::app::ports::IngestionPort;
use crate::context::Context;
use crate::types::{Ingestion, IngestionEvent, IngestionResponse};
use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Some events of a batch were rejected; carries the full server reply.
#[derive(Error, Debug)]
#[error("{} of {submitted} events were rejected", .response.errors.len())]
pub struct PartialRejection {
    pub submitted: usize,
    pub response: IngestionResponse,
}

/// Accepts either a full ingestion document or a bare array of events
#[derive(Deserialize)]
#[serde(untagged)]
enum BatchInput {
    Document(Ingestion),
    Events(Vec<IngestionEvent>),
}

pub fn parse_ingestion(raw: &str) -> Result<Ingestion> {
    let input: BatchInput =
        serde_json::from_str(raw).context("Input is neither an ingestion document nor an event array")?;
    Ok(match input {
        BatchInput::Document(doc) => doc,
        BatchInput::Events(batch) => Ingestion::new(batch),
    })
}

/// Reads a batch from `path`, or from stdin when `path` is `-`.
pub fn load_ingestion(path: &Path) -> Result<Ingestion> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read batch from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file '{}'", path.display()))?
    };
    parse_ingestion(&raw)
}

pub struct IngestUseCase {
    port: Arc<dyn IngestionPort>,
    allow_partial: bool,
}

impl IngestUseCase {
    pub fn new(port: Arc<dyn IngestionPort>) -> Self {
        Self {
            port,
            allow_partial: false,
        }
    }

    /// Treat per-event rejections in a 207 reply as success
    pub fn allow_partial(mut self, allow: bool) -> Self {
        self.allow_partial = allow;
        self
    }

    pub async fn submit(&self, ctx: &Context, ingestion: &Ingestion) -> Result<IngestionResponse> {
        info!(events = ingestion.batch.len(), "Submitting ingestion batch");
        let response = self
            .port
            .ingest(ctx, ingestion)
            .await
            .context("Ingestion request failed")?;

        info!(
            successes = response.successes.len(),
            errors = response.errors.len(),
            "Ingestion batch accepted"
        );
        if response.has_errors() {
            for err in &response.errors {
                warn!(id = %err.id, status = err.status, message = ?err.message, "Event rejected");
            }
            if !self.allow_partial {
                return Err(PartialRejection {
                    submitted: ingestion.batch.len(),
                    response,
                }
                .into());
            }
        }
        Ok(response)
    }
}
