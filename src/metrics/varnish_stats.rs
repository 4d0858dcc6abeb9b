use crate::error::{
    BridgeError,
    Result,
};
use serde::{
    Deserialize,
    Serialize,
};

pub const CACHE_HIT_FIELD: &str = "MAIN.cache_hit";
pub const CACHE_MISS_FIELD: &str = "MAIN.cache_miss";

/// One `MAIN.*` counter as Varnish reports it.
///
/// Varnish ships `description`, `flag` and `format` next to the value; they are kept in `extra` and otherwise
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    pub value: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Stats snapshot decoded from a single response of the Varnish stats endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VarnishStats {
    #[serde(rename = "uptime_sec", default)]
    pub uptime: f64,
    #[serde(rename = "absolute_hitrate", default)]
    pub absolute_hit_rate: f64,
    #[serde(rename = "avg_hitrate", default)]
    pub average_hit_rate: f64,
    #[serde(rename = "avg_load", default)]
    pub average_load: f64,
    #[serde(rename = "MAIN.cache_hit", default)]
    pub cache_hit: Option<Counter>,
    #[serde(rename = "MAIN.cache_miss", default)]
    pub cache_miss: Option<Counter>,
}

impl VarnishStats {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(BridgeError::Decode)
    }

    pub fn cache_hits(&self) -> Result<f64> {
        counter_value(&self.cache_hit, CACHE_HIT_FIELD)
    }

    pub fn cache_misses(&self) -> Result<f64> {
        counter_value(&self.cache_miss, CACHE_MISS_FIELD)
    }
}

fn counter_value(counter: &Option<Counter>, field: &'static str) -> Result<f64> {
    counter
        .as_ref()
        .map(|counter| counter.value)
        .ok_or(BridgeError::MissingCounter { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VARNISH_BODY: &str = r#"{
        "server_id": "web01",
        "uptime_sec": 86400.75,
        "absolute_hitrate": 91.4,
        "avg_hitrate": 88.2,
        "avg_load": 0.97,
        "MAIN.cache_hit": {"description": "Cache hits", "flag": "c", "format": "i", "value": 123.9},
        "MAIN.cache_miss": {"description": "Cache misses", "flag": "c", "format": "i", "value": 4.2},
        "MAIN.n_object": {"value": 17}
    }"#;

    #[test]
    fn decodes_a_varnish_response() {
        let stats = VarnishStats::from_slice(VARNISH_BODY.as_bytes()).unwrap();
        assert_eq!(stats.uptime, 86400.75);
        assert_eq!(stats.absolute_hit_rate, 91.4);
        assert_eq!(stats.average_hit_rate, 88.2);
        assert_eq!(stats.average_load, 0.97);
        assert_eq!(stats.cache_hits().unwrap(), 123.9);
        assert_eq!(stats.cache_misses().unwrap(), 4.2);

        let hit = stats.cache_hit.unwrap();
        assert_eq!(hit.extra.get("flag"), Some(&serde_json::json!("c")));
    }

    #[test]
    fn scalar_fields_default_to_zero() {
        let stats =
            VarnishStats::from_slice(br#"{"MAIN.cache_hit": {"value": 1}, "MAIN.cache_miss": {"value": 2}}"#).unwrap();
        assert_eq!(stats.uptime, 0.0);
        assert_eq!(stats.average_load, 0.0);
        assert_eq!(stats.cache_hits().unwrap(), 1.0);
    }

    #[test]
    fn missing_counter_is_reported() {
        let stats = VarnishStats::from_slice(br#"{"uptime_sec": 3, "MAIN.cache_miss": {"value": 2}}"#).unwrap();
        let err = stats.cache_hits().unwrap_err();
        assert!(
            matches!(err, BridgeError::MissingCounter { field } if field == CACHE_HIT_FIELD),
            "{err:?}"
        );
        assert_eq!(stats.cache_misses().unwrap(), 2.0);
    }

    #[test]
    fn non_numeric_counter_value_fails_decoding() {
        let err = VarnishStats::from_slice(br#"{"MAIN.cache_hit": {"value": "many"}}"#).unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)), "{err:?}");

        let err = VarnishStats::from_slice(br#"{"MAIN.cache_hit": {"description": "no value"}}"#).unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)), "{err:?}");
    }

    #[test]
    fn garbage_body_fails_decoding() {
        let err = VarnishStats::from_slice(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)), "{err:?}");
    }
}
