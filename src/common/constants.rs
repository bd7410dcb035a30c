/// Endpoint and environment constants shared by the resolver, transport and CLI.

// Used when LANGFUSE_HOST is unset or empty
pub const DEFAULT_HOST: &str = "https://cloud.langfuse.com";

// Environment variable names (read once, at client construction)
pub const HOST_ENV: &str = "LANGFUSE_HOST";
pub const PUBLIC_KEY_ENV: &str = "LANGFUSE_PUBLIC_KEY";
pub const SECRET_KEY_ENV: &str = "LANGFUSE_SECRET_KEY";

/// Optional directory for the rolling JSON log file written by the CLI
pub const LOG_DIR_ENV: &str = "LANGFUSE_LOG_DIR";

// Ingestion API path, appended verbatim to the configured host
pub const INGESTION_PATH: &str = "/api/public/ingestion";
