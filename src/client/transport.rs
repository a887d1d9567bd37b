//! Default HTTP transport.
//!
//! Every client built without an explicit `reqwest::Client` gets one configured from
//! [`TransportSettings::default`]. `reqwest` does not expose a separate TLS handshake or
//! expect-continue timeout; both are bounded by the connect and total timeouts.

use std::time::Duration;

use crate::client::error::ClientResult;

pub const USER_AGENT: &str = "prixfixe Service Client";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest request timeout the transport accepts. Larger values are clamped.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub keep_alive: Duration,
    pub tls_handshake_timeout: Duration,
    pub expect_continue_timeout: Duration,
    pub max_idle_connections: usize,
    pub max_idle_per_host: usize,
    pub idle_connection_timeout: Duration,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }
}

impl TransportSettings {
    /// Idle connections live three times as long as a request may take. The wait for
    /// `100 Continue` is twice the request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        if timeout > MAX_TIMEOUT {
            tracing::warn!("Request timeout {:?} exceeds {:?}; clamping", timeout, MAX_TIMEOUT);
        }
        let timeout = timeout.min(MAX_TIMEOUT);

        Self {
            timeout,
            connect_timeout: Duration::from_secs(30),
            keep_alive: Duration::from_secs(30),
            tls_handshake_timeout: Duration::from_secs(10),
            expect_continue_timeout: timeout.saturating_mul(2),
            max_idle_connections: 100,
            max_idle_per_host: 100,
            idle_connection_timeout: timeout.saturating_mul(3),
        }
    }

    pub fn build(&self) -> ClientResult<reqwest::Client> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .tcp_keepalive(self.keep_alive)
            .pool_max_idle_per_host(self.max_idle_per_host.min(self.max_idle_connections))
            .pool_idle_timeout(self.idle_connection_timeout)
            .build()?;

        Ok(client)
    }
}

/// Builds a `reqwest::Client` with the default settings and the given total timeout.
pub fn build_default_transport(timeout: Duration) -> ClientResult<reqwest::Client> {
    TransportSettings::with_timeout(timeout).build()
}
