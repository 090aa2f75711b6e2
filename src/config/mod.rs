//! Configuration for ThoughtSpot clients.

use crate::errors::{ThoughtSpotError, ThoughtSpotResult};
use std::time::Duration;
use url::Url;

/// Value of the `X-Requested-By` marker header required on every call.
pub const DEFAULT_REQUESTED_BY: &str = "ThoughtSpot";

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default TCP keep-alive idle interval. Long-running TML imports hold the
/// connection open well past common NAT idle cutoffs.
pub const DEFAULT_TCP_KEEPALIVE: Duration = Duration::from_secs(120);

/// Connection pool tuning.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum idle connections per host.
    pub max_idle_per_host: usize,
    /// Idle connection timeout.
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 4,
            idle_timeout: Duration::from_secs(90),
        }
    }
}

/// ThoughtSpot client configuration.
///
/// One config describes one deployment (`server_url`); both the V1 and V2
/// clients build from the same shape. The request timeout is `None` by
/// default — the transport waits indefinitely unless the caller tunes it,
/// matching the platform's long-running import/export calls.
#[derive(Debug, Clone)]
pub struct ThoughtSpotConfig {
    /// Deployment root URL, e.g. `https://mycompany.thoughtspot.cloud`.
    /// Stored without a trailing slash.
    pub server_url: String,
    /// `X-Requested-By` header value.
    pub requested_by: String,
    /// Optional `Accept-Language` default header.
    pub accept_language: Option<String>,
    /// Per-request timeout. `None` means no timeout.
    pub timeout: Option<Duration>,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// TCP keep-alive idle interval. `None` disables keep-alive probes.
    pub tcp_keepalive: Option<Duration>,
    /// Connection pool tuning.
    pub pool: PoolConfig,
}

impl ThoughtSpotConfig {
    /// Creates a configuration for a deployment with all defaults.
    pub fn new(server_url: impl Into<String>) -> ThoughtSpotResult<Self> {
        Self::builder().server_url(server_url).build()
    }

    /// Creates a new configuration builder.
    pub fn builder() -> ThoughtSpotConfigBuilder {
        ThoughtSpotConfigBuilder::default()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ThoughtSpotResult<()> {
        if self.server_url.is_empty() {
            return Err(ThoughtSpotError::config("server URL cannot be empty"));
        }
        let parsed = Url::parse(&self.server_url)
            .map_err(|e| ThoughtSpotError::config(format!("invalid server URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ThoughtSpotError::config(
                "server URL must use http or https",
            ));
        }
        if self.requested_by.is_empty() {
            return Err(ThoughtSpotError::config(
                "X-Requested-By value cannot be empty",
            ));
        }
        Ok(())
    }
}

/// Builder for [`ThoughtSpotConfig`].
#[derive(Debug, Default)]
pub struct ThoughtSpotConfigBuilder {
    server_url: Option<String>,
    requested_by: Option<String>,
    accept_language: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    tcp_keepalive: Option<Option<Duration>>,
    pool: Option<PoolConfig>,
}

impl ThoughtSpotConfigBuilder {
    /// Sets the deployment root URL.
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Overrides the `X-Requested-By` marker value.
    pub fn requested_by(mut self, value: impl Into<String>) -> Self {
        self.requested_by = Some(value.into());
        self
    }

    /// Sets a default `Accept-Language` header.
    pub fn accept_language(mut self, value: impl Into<String>) -> Self {
        self.accept_language = Some(value.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the TCP keep-alive idle interval.
    pub fn tcp_keepalive(mut self, interval: Duration) -> Self {
        self.tcp_keepalive = Some(Some(interval));
        self
    }

    /// Disables TCP keep-alive probes.
    pub fn no_tcp_keepalive(mut self) -> Self {
        self.tcp_keepalive = Some(None);
        self
    }

    /// Sets the connection pool tuning.
    pub fn pool(mut self, pool: PoolConfig) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> ThoughtSpotResult<ThoughtSpotConfig> {
        let server_url = self
            .server_url
            .ok_or_else(|| ThoughtSpotError::config("server URL is required"))?;
        let config = ThoughtSpotConfig {
            server_url: server_url.trim_end_matches('/').to_string(),
            requested_by: self
                .requested_by
                .unwrap_or_else(|| DEFAULT_REQUESTED_BY.to_string()),
            accept_language: self.accept_language,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            tcp_keepalive: self.tcp_keepalive.unwrap_or(Some(DEFAULT_TCP_KEEPALIVE)),
            pool: self.pool.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let with_slash = ThoughtSpotConfig::new("https://ts.example.com/").unwrap();
        let without = ThoughtSpotConfig::new("https://ts.example.com").unwrap();
        assert_eq!(with_slash.server_url, without.server_url);
        assert_eq!(with_slash.server_url, "https://ts.example.com");
    }

    #[test]
    fn empty_url_is_rejected() {
        assert!(ThoughtSpotConfig::new("").is_err());
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        assert!(ThoughtSpotConfig::new("ftp://ts.example.com").is_err());
    }

    #[test]
    fn builder_defaults() {
        let config = ThoughtSpotConfig::builder()
            .server_url("https://ts.example.com")
            .build()
            .unwrap();
        assert_eq!(config.requested_by, DEFAULT_REQUESTED_BY);
        assert_eq!(config.timeout, None);
        assert_eq!(config.tcp_keepalive, Some(DEFAULT_TCP_KEEPALIVE));
    }

    #[test]
    fn builder_overrides() {
        let config = ThoughtSpotConfig::builder()
            .server_url("https://ts.example.com")
            .requested_by("my-app")
            .timeout(Duration::from_secs(300))
            .no_tcp_keepalive()
            .build()
            .unwrap();
        assert_eq!(config.requested_by, "my-app");
        assert_eq!(config.timeout, Some(Duration::from_secs(300)));
        assert_eq!(config.tcp_keepalive, None);
    }
}
