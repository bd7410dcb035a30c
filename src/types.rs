use crate::app::ports::RestResource;
use crate::common::constants::INGESTION_PATH;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Event kinds accepted by the ingestion endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IngestionEventType {
    TraceCreate,
    SpanCreate,
    SpanUpdate,
    GenerationCreate,
    GenerationUpdate,
    EventCreate,
    ScoreCreate,
    SdkLog,
}

/// One entry of an ingestion batch. The body is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: IngestionEventType,
    pub body: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl IngestionEvent {
    /// Creates an event with a fresh id stamped at the current time.
    pub fn new(event_type: IngestionEventType, body: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event_type,
            body,
            metadata: None,
        }
    }
}

/// Request body of `POST /api/public/ingestion`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingestion {
    pub batch: Vec<IngestionEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Ingestion {
    pub fn new(batch: Vec<IngestionEvent>) -> Self {
        Self {
            batch,
            metadata: None,
        }
    }
}

impl RestResource for Ingestion {
    fn path(&self) -> String {
        INGESTION_PATH.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionSuccess {
    pub id: String,
    pub status: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionError {
    pub id: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

/// Per-event outcome of a batch (the server answers 207 Multi-Status)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestionResponse {
    #[serde(default)]
    pub successes: Vec<IngestionSuccess>,
    #[serde(default)]
    pub errors: Vec<IngestionError>,
}

impl IngestionResponse {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
