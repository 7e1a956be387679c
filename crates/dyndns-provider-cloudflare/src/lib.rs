// # Cloudflare DNS Provider
//
// Implements the `DnsProvider` seam against Cloudflare API v4.
//
// - One HTTP request per trait call, no retry (a failed call fails the
//   invocation; the external scheduler retries)
// - Legacy header authentication: account email + API key
// - Any `success: false` envelope surfaces as a provider error carrying
//   Cloudflare's own messages
//
// ## API Reference
//
// - List Zones: GET `/zones?name=...`
// - List DNS Records: GET `/zones/:zone_id/dns_records?name=...`
// - Create DNS Record: POST `/zones/:zone_id/dns_records`
// - Update DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`

use std::time::Duration;

use async_trait::async_trait;
use dyndns_core::traits::{DnsProvider, Record, RecordUpdate, Zone};
use dyndns_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Cloudflare API base URL
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// HTTP timeout for API requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const PROVIDER: &str = "cloudflare";

/// Cloudflare API response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiError>,
    result: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiError {
    code: u64,
    message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Payload for record creation
#[derive(Debug, Serialize)]
struct CreateRecordPayload<'a> {
    #[serde(rename = "type")]
    record_type: &'a str,
    name: &'a str,
    content: &'a str,
    ttl: u32,
}

/// Cloudflare DNS provider
///
/// # Security
///
/// The Debug implementation intentionally does not expose the API key.
pub struct CloudflareProvider {
    email: String,
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("email", &self.email)
            .field("api_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider
    ///
    /// # Parameters
    ///
    /// - `email`: account email
    /// - `api_key`: account API key (never logged)
    pub fn new(email: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(email, api_key, CLOUDFLARE_API_BASE)
    }

    /// Create a provider talking to a custom API base URL (for testing)
    pub fn with_base_url(
        email: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            email: email.into(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            client,
        })
    }

    /// Attach the authentication headers to a request
    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Auth-Email", &self.email)
            .header("X-Auth-Key", &self.api_key)
    }

    /// Unwrap the Cloudflare envelope, surfacing API errors as one message
    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T> {
        let status = response.status();
        let body: ApiResponse<T> = response.json().await.map_err(|e| {
            Error::provider(
                PROVIDER,
                format!("{what}: invalid response (HTTP {status}): {e}"),
            )
        })?;

        if !body.success {
            let message = if body.errors.is_empty() {
                format!("HTTP {status}")
            } else {
                body.errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            return Err(Error::provider(PROVIDER, format!("{what} failed: {message}")));
        }

        body.result
            .ok_or_else(|| Error::provider(PROVIDER, format!("{what}: response has no result")))
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    async fn get_zone(&self, domain: &str) -> Result<Option<Zone>> {
        let url = format!("{}/zones", self.base_url);
        tracing::debug!("GET {} (name={})", url, domain);

        let response = self
            .authed(self.client.get(&url).query(&[("name", domain)]))
            .send()
            .await
            .map_err(|e| Error::network(format!("zone lookup request failed: {e}")))?;

        let zones: Vec<Zone> = Self::parse(response, "zone lookup").await?;
        Ok(zones.into_iter().next())
    }

    async fn zone_records(&self, zone_id: &str, name: &str) -> Result<Vec<Record>> {
        let url = format!("{}/zones/{}/dns_records", self.base_url, zone_id);
        tracing::debug!("GET {} (name={})", url, name);

        let response = self
            .authed(self.client.get(&url).query(&[("name", name)]))
            .send()
            .await
            .map_err(|e| Error::network(format!("record listing request failed: {e}")))?;

        Self::parse(response, "record listing").await
    }

    async fn create_record(
        &self,
        zone_id: &str,
        record_type: &str,
        name: &str,
        content: &str,
        ttl: u32,
    ) -> Result<Record> {
        let url = format!("{}/zones/{}/dns_records", self.base_url, zone_id);
        tracing::debug!("POST {} ({} {} -> {})", url, record_type, name, content);

        let payload = CreateRecordPayload {
            record_type,
            name,
            content,
            ttl,
        };

        let response = self
            .authed(self.client.post(&url).json(&payload))
            .send()
            .await
            .map_err(|e| Error::network(format!("record creation request failed: {e}")))?;

        Self::parse(response, "record creation").await
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        update: &RecordUpdate,
    ) -> Result<Record> {
        let url = format!(
            "{}/zones/{}/dns_records/{}",
            self.base_url, zone_id, record_id
        );
        tracing::debug!("PUT {} ({} -> {})", url, update.name, update.content);

        let response = self
            .authed(self.client.put(&url).json(update))
            .send()
            .await
            .map_err(|e| Error::network(format!("record update request failed: {e}")))?;

        Self::parse(response, "record update").await
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
