use super::VarnishStats;
use crate::error::Result;
use serde::Serialize;

/// A point-in-time value that replaces whatever statsd held under the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gauge {
    pub name: &'static str,
    pub value: i64,
}

impl Gauge {
    /// Truncates toward zero, so `0.97` becomes `0` and `-1.5` becomes `-1`. Out-of-range values saturate.
    pub fn truncated(name: &'static str, value: f64) -> Self {
        Self {
            name,
            value: value as i64,
        }
    }
}

/// Maps a snapshot onto the six gauges the bridge reports, in emission order.
///
/// Fails when either `MAIN.*` counter is absent from the snapshot.
pub fn gauges(stats: &VarnishStats) -> Result<Vec<Gauge>> {
    let cache_hit = stats.cache_hits()?;
    let cache_miss = stats.cache_misses()?;

    Ok(vec![
        Gauge::truncated("uptime", stats.uptime),
        Gauge::truncated("absolute_hitrate", stats.absolute_hit_rate),
        Gauge::truncated("avg_hitrate", stats.average_hit_rate),
        Gauge::truncated("avg_load", stats.average_load),
        Gauge::truncated("cache_hit", cache_hit),
        Gauge::truncated("cache_miss", cache_miss),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::BridgeError,
        metrics::Counter,
    };
    use pretty_assertions::assert_eq;

    fn counter(value: f64) -> Option<Counter> {
        Some(Counter {
            value,
            extra: Default::default(),
        })
    }

    #[test]
    fn six_truncated_gauges() {
        let stats = VarnishStats {
            uptime: 3600.9,
            absolute_hit_rate: 75.5,
            average_hit_rate: 0.4,
            average_load: 0.97,
            cache_hit: counter(123.9),
            cache_miss: counter(4.2),
        };

        let gauges = gauges(&stats).unwrap();
        let pairs = gauges.iter().map(|g| (g.name, g.value)).collect::<Vec<_>>();
        assert_eq!(
            pairs,
            vec![
                ("uptime", 3600),
                ("absolute_hitrate", 75),
                ("avg_hitrate", 0),
                ("avg_load", 0),
                ("cache_hit", 123),
                ("cache_miss", 4),
            ]
        );
    }

    #[test]
    fn truncation_goes_toward_zero_and_saturates() {
        assert_eq!(Gauge::truncated("x", -1.5).value, -1);
        assert_eq!(Gauge::truncated("x", f64::MAX).value, i64::MAX);
        assert_eq!(Gauge::truncated("x", f64::NAN).value, 0);
    }

    #[test]
    fn missing_miss_counter_fails_the_mapping() {
        let stats = VarnishStats {
            cache_hit: counter(1.0),
            ..Default::default()
        };
        let err = gauges(&stats).unwrap_err();
        assert!(matches!(err, BridgeError::MissingCounter { field: "MAIN.cache_miss" }), "{err:?}");
    }
}
