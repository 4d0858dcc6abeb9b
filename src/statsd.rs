//! # statsd Client
//!
//! A minimal client for the statsd line protocol over UDP. Only gauges are supported.
//!
//! Lines look like `<prefix>.<name>:<value>|g`. They are collected in a buffer and sent as a single datagram,
//! newline separated, once the buffer would grow past [`MAX_PACKET_SIZE`] or when the client is closed. Sending is
//! fire and forget: a failed send is logged and the buffered lines are dropped.

use crate::{
    error::{
        BridgeError,
        Result,
    },
    metrics::Gauge,
};
use std::net::{
    Ipv4Addr,
    Ipv6Addr,
    SocketAddr,
};
use tokio::net::{
    lookup_host,
    UdpSocket,
};

/// Keeps datagrams below the common 1500 byte MTU.
pub const MAX_PACKET_SIZE: usize = 1440;

pub struct StatsdClient {
    socket: UdpSocket,
    prefix: String,
    buffer: String,
    max_packet_size: usize,
}

impl StatsdClient {
    /// Resolves `addr` and connects a fresh UDP socket to it. Nothing is sent yet.
    pub async fn connect(addr: &str, prefix: &str) -> Result<Self> {
        let connect_err = |source: std::io::Error| BridgeError::StatsdConnect {
            addr: addr.to_string(),
            source,
        };

        let target = lookup_host(addr)
            .await
            .map_err(connect_err)?
            .next()
            .ok_or_else(|| {
                connect_err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "address did not resolve to anything",
                ))
            })?;

        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).await.map_err(connect_err)?;
        socket.connect(target).await.map_err(connect_err)?;
        debug!(%target, "statsd client connected");

        let prefix = if prefix.is_empty() {
            String::new()
        } else {
            format!("{prefix}.")
        };

        Ok(Self {
            socket,
            prefix,
            buffer: String::new(),
            max_packet_size: MAX_PACKET_SIZE,
        })
    }

    pub fn with_max_packet_size(mut self, max_packet_size: usize) -> Self {
        self.max_packet_size = max_packet_size;
        self
    }

    pub async fn gauge(&mut self, gauge: &Gauge) {
        let line = format!("{}{}:{}|g", self.prefix, gauge.name, gauge.value);
        self.write_line(&line).await;
    }

    async fn write_line(&mut self, line: &str) {
        if !self.buffer.is_empty() && self.buffer.len() + 1 + line.len() > self.max_packet_size {
            self.flush().await;
        }
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(line);
    }

    /// Sends whatever is buffered as one datagram.
    pub async fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        match self.socket.send(self.buffer.as_bytes()).await {
            Ok(sent) => trace!(sent, "statsd datagram sent"),
            Err(err) => warn!(%err, "failed to send statsd datagram"),
        }
        self.buffer.clear();
    }

    pub async fn close(mut self) {
        self.flush().await;
    }
}
