// # Address Cache Trait
//
// Defines the interface for persisting the last successfully published
// address between invocations. The cache exists purely to avoid redundant
// provider calls; losing it is harmless.

use async_trait::async_trait;

/// Trait for last-published-address persistence
///
/// `load` is called once at the start of reconciliation, `store` at most
/// once at the end of a successful one. A stale or corrupt cache must never
/// block reconciliation, so implementations report unusable contents as
/// `Ok(None)` rather than an error.
#[async_trait]
pub trait AddressCache: Send + Sync {
    /// Read the cached address, if a usable one exists
    async fn load(&self) -> Result<Option<String>, crate::Error>;

    /// Overwrite the cache with an address just confirmed at the provider
    async fn store(&self, address: &str) -> Result<(), crate::Error>;
}
