use thiserror::Error;

pub const LOG_BUCKET_VAR: &str = "LOG_BUCKET";
pub const TOR_PROXY_VAR: &str = "TOR_PROXY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable {0} must be set")]
    Missing(&'static str),
}

/// Settings read once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficConfig {
    pub log_bucket: String,
    /// Proxy URL every request is routed through, e.g. `socks5h://127.0.0.1:9050`.
    pub tor_proxy: Option<String>,
}

impl TrafficConfig {
    /// Blank values are treated the same as unset ones.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_bucket = read(LOG_BUCKET_VAR).ok_or(ConfigError::Missing(LOG_BUCKET_VAR))?;
        let tor_proxy = read(TOR_PROXY_VAR);

        Ok(Self {
            log_bucket,
            tor_proxy,
        })
    }
}
