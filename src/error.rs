use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ingestion endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

impl IngestError {
    /// True when the caller's context ended the request.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, IngestError::Cancelled | IngestError::DeadlineExceeded)
    }

    /// HTTP status of a rejected exchange, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            IngestError::Status { status, .. } => Some(*status),
            IngestError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
