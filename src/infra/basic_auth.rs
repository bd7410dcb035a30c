use crate::app::ports::RequestModifier;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use reqwest::header::{HeaderValue, AUTHORIZATION};

/// Formats the `Authorization` value for a Langfuse key pair.
pub fn basic_auth(public_key: &str, secret_key: &str) -> String {
    let credentials = format!("{}:{}", public_key, secret_key);
    format!("Basic {}", BASE64_STANDARD.encode(credentials.as_bytes()))
}

/// Request modifier that stamps a fixed Basic auth header on every request.
///
/// The header is encoded once, at construction, so every request made through
/// the owning client carries the same credentials.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    header: HeaderValue,
}

impl BasicAuth {
    pub fn new(public_key: &str, secret_key: &str) -> Self {
        // Base64 output plus the "Basic " prefix is always visible ASCII
        let mut header = HeaderValue::from_str(&basic_auth(public_key, secret_key))
            .unwrap_or_else(|_| HeaderValue::from_static("Basic "));
        header.set_sensitive(true);
        Self { header }
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.header
    }
}

impl RequestModifier for BasicAuth {
    fn modify(&self, request: &mut reqwest::Request) {
        request.headers_mut().insert(AUTHORIZATION, self.header.clone());
    }
}
