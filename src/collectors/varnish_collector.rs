use crate::{
    collectors::Collector,
    config::Config,
    error::{
        BridgeError,
        Result,
    },
    metrics::{
        gauges,
        Gauge,
        VarnishStats,
    },
    retry::with_retries,
    statsd::StatsdClient,
};
use reqwest::Client as HttpClient;
use std::{
    future::Future,
    pin::Pin,
};
use url::Url;

/// Polls the Varnish stats endpoint and forwards the numbers to statsd as gauges.
///
/// A new statsd client is opened for every cycle and closed once the gauges are out.
pub struct VarnishCollector {
    config: Config,
    http_client: HttpClient,
    last_snapshot: Option<VarnishStats>,
}

impl VarnishCollector {
    pub fn new(config: Config) -> Self {
        // No timeout: a hanging endpoint stalls the bridge.
        Self::with_http_client(config, HttpClient::new())
    }

    pub fn with_http_client(config: Config, http_client: HttpClient) -> Self {
        Self {
            config,
            http_client,
            last_snapshot: None,
        }
    }

    pub fn last_snapshot(&self) -> Option<&VarnishStats> {
        self.last_snapshot.as_ref()
    }

    /// GET the stats endpoint and decode the body. The status code is not checked, only the body counts.
    async fn fetch_stats(&self) -> Result<VarnishStats> {
        let url = Url::parse(&self.config.varnish_url).map_err(|source| BridgeError::InvalidUrl {
            url: self.config.varnish_url.clone(),
            source,
        })?;

        let body = with_retries(self.config.fetch_retries, "fetching Varnish stats", || {
            self.fetch_body(url.clone())
        })
        .await?;

        VarnishStats::from_slice(&body)
    }

    async fn fetch_body(&self, url: Url) -> Result<Vec<u8>> {
        let fetch_err = |source: reqwest::Error| BridgeError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.http_client.get(url.clone()).send().await.map_err(fetch_err)?;
        debug!(status = %response.status(), %url, "Varnish stats fetched");
        let body = response.bytes().await.map_err(fetch_err)?;
        Ok(body.to_vec())
    }

    async fn emit(&self, gauges: &[Gauge]) -> Result<()> {
        let mut client = with_retries(self.config.fetch_retries, "opening statsd client", || {
            StatsdClient::connect(&self.config.statsd_addr, &self.config.statsd_prefix)
        })
        .await?;

        for gauge in gauges {
            trace!(name = gauge.name, value = gauge.value, "gauge");
            client.gauge(gauge).await;
        }

        client.close().await;
        Ok(())
    }
}

impl Collector for VarnishCollector {
    fn collect(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            let stats = self.fetch_stats().await?;
            let gauges = gauges(&stats)?;
            self.emit(&gauges).await?;
            debug!(gauges = gauges.len(), addr = %self.config.statsd_addr, "gauges sent to statsd");

            self.last_snapshot = Some(stats);
            Ok(())
        })
    }

    fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "varnish_url": self.config.varnish_url,
            "statsd_addr": self.config.statsd_addr,
            "last_snapshot": self.last_snapshot,
        })
    }

    fn name(&self) -> &'static str {
        "varnish"
    }
}
