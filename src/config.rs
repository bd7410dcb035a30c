use crate::common::constants::{DEFAULT_HOST, HOST_ENV, PUBLIC_KEY_ENV, SECRET_KEY_ENV};
use std::fmt;

/// Connection parameters for the ingestion API.
///
/// Empty keys are accepted as-is: they still produce a well-formed (if
/// useless) Basic auth header, and the server is left to reject them.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub public_key: String,
    pub secret_key: String,
}

impl Config {
    pub fn new(
        host: impl Into<String>,
        public_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            public_key: public_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Resolves the config from `LANGFUSE_HOST`, `LANGFUSE_PUBLIC_KEY` and
    /// `LANGFUSE_SECRET_KEY`, falling back to the cloud endpoint for the host.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same resolution as [`Config::from_env`] against an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV)
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        Self {
            host,
            public_key: lookup(PUBLIC_KEY_ENV).unwrap_or_default(),
            secret_key: lookup(SECRET_KEY_ENV).unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, "", "")
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_unset_host_uses_default() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.public_key, "");
        assert_eq!(config.secret_key, "");
    }

    #[test]
    fn test_empty_host_uses_default() {
        let config = Config::from_lookup(lookup_from(&[(HOST_ENV, "")]));
        assert_eq!(config.host, DEFAULT_HOST);
    }

    #[test]
    fn test_host_used_verbatim() {
        let config = Config::from_lookup(lookup_from(&[
            (HOST_ENV, "http://localhost:3000/"),
            (PUBLIC_KEY_ENV, "pk-lf-1"),
            (SECRET_KEY_ENV, "sk-lf-1"),
        ]));
        assert_eq!(config.host, "http://localhost:3000/");
        assert_eq!(config, Config::new("http://localhost:3000/", "pk-lf-1", "sk-lf-1"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::new("https://x", "pk", "super-secret");
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("pk"));
        assert!(!rendered.contains("super-secret"));
    }
}
