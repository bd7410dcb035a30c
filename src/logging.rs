use crate::common::constants::LOG_DIR_ENV;
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "langfuse_ingest=info";
const LOG_FILE_PREFIX: &str = "langfuse_ingest.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Builds the subscriber: console output on stderr, plus a daily-rotated JSON
/// file layer when `log_dir` is given.
pub fn build_subscriber(
    filter: EnvFilter,
    log_dir: Option<&Path>,
) -> (impl tracing::Subscriber + Send + Sync + 'static, Option<WorkerGuard>) {
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let _ = fs::create_dir_all(dir);
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().json().with_writer(non_blocking_writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(std::io::stderr));
    (subscriber, guard)
}

/// Initializes global logging, adding the JSON file layer when
/// `LANGFUSE_LOG_DIR` is set.
///
/// Stdout stays reserved for command output. Keep the returned guard alive
/// until exit so buffered file logs are flushed.
pub fn init_logging() -> Option<WorkerGuard> {
    let log_dir = std::env::var(LOG_DIR_ENV).ok().filter(|d| !d.is_empty());
    let (subscriber, guard) = build_subscriber(env_filter(), log_dir.as_deref().map(Path::new));
    subscriber.init();
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_only_subscriber() {
        let (subscriber, guard) = build_subscriber(EnvFilter::new("info"), None);
        assert!(guard.is_none());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("console only");
        });
    }

    #[test]
    fn test_file_layer_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let (subscriber, guard) = build_subscriber(EnvFilter::new("info"), Some(dir.path()));
        assert!(guard.is_some());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(events = 3, "batch submitted");
        });
        // Dropping the guard flushes the non-blocking writer
        drop(guard);

        let contents: String = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX))
            .map(|entry| fs::read_to_string(entry.path()).unwrap())
            .collect();
        assert!(contents.contains("batch submitted"));
        assert!(contents.contains("\"events\":3"));
    }
}
