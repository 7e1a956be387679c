// # Memory Address Cache
//
// In-memory implementation of AddressCache. Nothing survives the process;
// the first reconciliation after a restart simply takes the full path.
// Useful for tests and for embedders that do not want a cache file.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::traits::AddressCache;
use crate::Error;

/// In-memory address cache
#[derive(Debug, Clone, Default)]
pub struct MemoryAddressCache {
    inner: Arc<RwLock<Option<String>>>,
}

impl MemoryAddressCache {
    /// Create a new empty memory cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache pre-seeded with an address
    pub fn seeded(address: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(address.into()))),
        }
    }
}

#[async_trait]
impl AddressCache for MemoryAddressCache {
    async fn load(&self) -> Result<Option<String>, Error> {
        Ok(self.inner.read().await.clone())
    }

    async fn store(&self, address: &str) -> Result<(), Error> {
        *self.inner.write().await = Some(address.to_string());
        Ok(())
    }
}
