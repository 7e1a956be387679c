// # DNS Provider Trait
//
// Defines the interface for reading and mutating DNS records via provider
// APIs. The reconciler drives this seam with at most one mutating call per
// invocation.
//
// ## Implementations
//
// - Cloudflare: `dyndns-provider-cloudflare` crate

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A DNS zone at the provider
///
/// Zones are looked up, never created or modified by this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-side zone identifier
    pub id: String,
    /// Zone name (the domain)
    pub name: String,
}

/// A DNS record inside a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-side record identifier
    pub id: String,
    /// Record type, e.g. "A"
    #[serde(rename = "type")]
    pub record_type: String,
    /// Fully qualified record name
    pub name: String,
    /// Record content (the address)
    pub content: String,
    /// Time-to-live in seconds
    pub ttl: u32,
}

/// Desired field values for a record update
///
/// Updates overwrite type, content, and ttl in one call; the name is sent
/// along unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordUpdate {
    /// Record type, e.g. "A"
    #[serde(rename = "type")]
    pub record_type: String,
    /// Fully qualified record name
    pub name: String,
    /// Record content (the address)
    pub content: String,
    /// Time-to-live in seconds
    pub ttl: u32,
}

/// Trait for DNS provider implementations
///
/// Implementations map these calls onto the provider's HTTP API and must
/// surface any non-success response as an error carrying the provider's
/// message. No retry or backoff here; a failed call fails the invocation.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Look up the zone for a domain
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Zone))`: the zone exists
    /// - `Ok(None)`: the provider knows no zone by that name
    /// - `Err(Error)`: the lookup itself failed
    async fn get_zone(&self, domain: &str) -> Result<Option<Zone>, crate::Error>;

    /// List records in a zone, filtered by record name
    ///
    /// The returned order is the provider's; callers select the first
    /// exact-name match.
    async fn zone_records(&self, zone_id: &str, name: &str) -> Result<Vec<Record>, crate::Error>;

    /// Create a record in a zone
    async fn create_record(
        &self,
        zone_id: &str,
        record_type: &str,
        name: &str,
        content: &str,
        ttl: u32,
    ) -> Result<Record, crate::Error>;

    /// Overwrite an existing record's type, name, content, and ttl
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        update: &RecordUpdate,
    ) -> Result<Record, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
