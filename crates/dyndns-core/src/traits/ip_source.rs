// # IP Source Trait
//
// Defines the interface for learning the caller's public address in pull
// mode.
//
// ## Implementations
//
// - HTTP IP-echo service: `dyndns-ip-http` crate

use async_trait::async_trait;

/// Trait for pull-mode address lookup
///
/// The returned string is trimmed but otherwise opaque; a bad value fails
/// later at the provider or succeeds idempotently.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Fetch the current public address
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: the trimmed address string the service reported
    /// - `Err(Error)`: the lookup failed or timed out
    async fn lookup(&self) -> Result<String, crate::Error>;
}
