use std::path::PathBuf;

/// Everything that can stop the bridge.
///
/// Only [`BridgeError::Fetch`] and [`BridgeError::StatsdConnect`] are considered transient, see
/// [`BridgeError::is_transient`]. All other kinds point at a broken configuration or a broken upstream payload and
/// are never retried.
#[derive(thiserror::Error, Debug)]
pub enum BridgeError {
    #[error("configuration file {path:?} is not found nor readable: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("configuration file {path:?} is not valid JSON: {source}")]
    ConfigDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid Varnish stats URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("fetching Varnish stats from {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Varnish stats response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Varnish stats response has no {field:?} counter")]
    MissingCounter { field: &'static str },
    #[error("cannot open statsd client for {addr:?}: {source}")]
    StatsdConnect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

impl BridgeError {
    /// Network failures that may go away on their own.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::StatsdConnect { .. })
    }
}

pub type Result<T, E = BridgeError> = std::result::Result<T, E>;
