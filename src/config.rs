//! # Configuration Module
//!
//! The bridge reads one JSON file at startup and never looks at it again.
//!
//! ```json
//! {
//!   "VarnishUrl": "http://127.0.0.1:6085/stats",
//!   "StatsdAddr": "127.0.0.1:8125",
//!   "StatsdPrefix": "varnish.web01",
//!   "SleepPeriod": 10
//! }
//! ```
//!
//! Fields that are missing from the file fall back to an empty string or zero. Keys match case-insensitively when
//! there is no exact match, so `"varnishUrl"` fills `VarnishUrl`. Nothing beyond JSON decoding is enforced;
//! [`Config::lint`] only warns about values that make the bridge misbehave.

use crate::error::{
    BridgeError,
    Result,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    path::Path,
    time::Duration,
};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

const FIELDS: [&str; 5] = ["VarnishUrl", "StatsdAddr", "StatsdPrefix", "SleepPeriod", "FetchRetries"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Config {
    /// HTTP endpoint serving the Varnish stats JSON.
    pub varnish_url: String,
    /// `host:port` of the statsd daemon.
    pub statsd_addr: String,
    /// Namespace put in front of every metric name.
    pub statsd_prefix: String,
    /// Seconds to wait between two poll cycles. Zero or negative means no pause at all.
    pub sleep_period: i64,
    /// How many extra attempts a failed fetch or statsd connect gets. Zero keeps every failure fatal.
    pub fetch_retries: u32,
}

impl Config {
    pub fn sleep_period(&self) -> Duration {
        Duration::from_secs(u64::try_from(self.sleep_period).unwrap_or(0))
    }

    /// Warn about settings that decode fine but are almost certainly a mistake.
    pub fn lint(&self) {
        if self.varnish_url.is_empty() {
            warn!("VarnishUrl is empty, every fetch will fail");
        }
        if self.statsd_addr.is_empty() {
            warn!("StatsdAddr is empty, the statsd client cannot be opened");
        }
        if self.sleep_period <= 0 {
            warn!(sleep_period = self.sleep_period, "SleepPeriod is not positive, the bridge will poll without pausing");
        }
    }
}

pub fn parse_config(path: &Path) -> Result<Config> {
    let bytes = std::fs::read(path).map_err(|source| BridgeError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let decode_err = |source: serde_json::Error| BridgeError::ConfigDecode {
        path: path.to_path_buf(),
        source,
    };

    let raw = serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(&bytes).map_err(decode_err)?;
    serde_json::from_value::<Config>(serde_json::Value::Object(normalize_keys(raw))).map_err(decode_err)
}

/// Renames keys that differ from a known field only by case. An exact key always wins over a case-insensitive one.
fn normalize_keys(raw: serde_json::Map<String, serde_json::Value>) -> serde_json::Map<String, serde_json::Value> {
    let mut normalized = serde_json::Map::new();
    let mut folded = Vec::new();
    for (key, value) in raw {
        match FIELDS.iter().find(|field| field.eq_ignore_ascii_case(&key)) {
            Some(field) if *field != key => folded.push((*field, value)),
            _ => {
                normalized.insert(key, value);
            }
        }
    }
    for (field, value) in folded {
        if !normalized.contains_key(field) {
            normalized.insert(field.to_string(), value);
        }
    }
    normalized
}
