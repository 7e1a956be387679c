// # HTTP IP Source
//
// Implements the `IpSource` seam against a public IP-echo service.
//
// The service returns the caller's public address as the plain-text
// response body. The protocol preference picks the hostname: the `ipv4.`
// and `ipv6.` prefixes force an address family, the bare hostname lets
// the service choose. The body is trimmed and returned as-is — a value
// the service got wrong fails later at the provider or succeeds
// idempotently.

use std::time::Duration;

use async_trait::async_trait;
use dyndns_core::config::Protocol;
use dyndns_core::traits::IpSource;
use dyndns_core::{Error, Result};

/// The echo service queried in pull mode
const ECHO_HOST: &str = "icanhazip.com";

/// HTTP timeout for the echo request
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// IP-echo lookup over plain HTTP
pub struct HttpIpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a source for the given protocol preference
    pub fn new(protocol: Protocol) -> Result<Self> {
        let prefix = match protocol {
            Protocol::Ipv4 => "ipv4.",
            Protocol::Ipv6 => "ipv6.",
            Protocol::Auto => "",
        };

        Self::from_url(format!("http://{prefix}{ECHO_HOST}"))
    }

    /// Create a source querying a specific URL (alternate echo services, tests)
    pub fn from_url(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// The URL this source queries
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl IpSource for HttpIpSource {
    async fn lookup(&self) -> Result<String> {
        tracing::debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(format!("IP echo request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::network(format!(
                "IP echo service returned HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("failed to read IP echo response: {e}")))?;

        Ok(body.trim().to_string())
    }
}
