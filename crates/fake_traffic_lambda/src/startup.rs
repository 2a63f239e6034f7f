use thiserror::Error;

use crate::adapters::traffic_client::TrafficClientError;
use crate::config::{ConfigError, TrafficConfig};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    TrafficClient(#[from] TrafficClientError),
}

/// Everything built once per cold start.
#[derive(Debug)]
pub struct ColdStart<C> {
    pub config: TrafficConfig,
    pub traffic_client: C,
}

/// Validates configuration, then builds the traffic client from its proxy
/// setting. `make_client` is never called when configuration is invalid.
pub fn cold_start<C>(
    lookup: impl Fn(&str) -> Option<String>,
    make_client: impl FnOnce(Option<&str>) -> Result<C, TrafficClientError>,
) -> Result<ColdStart<C>, StartupError> {
    let config = TrafficConfig::from_lookup(lookup)?;
    let traffic_client = make_client(config.tor_proxy.as_deref())?;

    Ok(ColdStart {
        config,
        traffic_client,
    })
}
