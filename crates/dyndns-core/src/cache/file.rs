// # File Address Cache
//
// File-based implementation of AddressCache.
//
// ## File Format
//
// The whole file is the last published address as plain text. No framing,
// no metadata.
//
// ## Lenient Load
//
// A missing file, a value that is not a syntactically valid IPv4 address
// (when the configured protocol is `ipv4`), or any value under the other
// protocols reads back as "no cache". The cache only ever vouches for an
// IPv4 address; whatever else is in the file triggers a full
// reconciliation instead of an error.

use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::config::Protocol;
use crate::traits::AddressCache;
use crate::Error;

/// Plain-text cache of the last published address
#[derive(Debug)]
pub struct FileAddressCache {
    path: PathBuf,
    protocol: Protocol,
}

impl FileAddressCache {
    /// Create a cache backed by the given file
    ///
    /// The file is not touched until `load` or `store` is called.
    pub fn new<P: AsRef<Path>>(path: P, protocol: Protocol) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            protocol,
        }
    }

    /// Path to the sibling temp file used for writes
    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }
}

#[async_trait]
impl AddressCache for FileAddressCache {
    async fn load(&self) -> Result<Option<String>, Error> {
        if !self.path.exists() {
            tracing::debug!("no cache file at {}", self.path.display());
            return Ok(None);
        }

        tracing::debug!("reading cache file {}", self.path.display());
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            Error::cache(format!(
                "failed to read cache file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let value = content.trim();

        match self.protocol {
            Protocol::Ipv4 => {
                if value.parse::<Ipv4Addr>().is_ok() {
                    Ok(Some(value.to_string()))
                } else {
                    tracing::warn!(
                        "cache file {} does not hold a valid IPv4 address, ignoring it",
                        self.path.display()
                    );
                    Ok(None)
                }
            }
            // The cached value is only trusted for ipv4; other protocols
            // always take the full reconciliation path.
            Protocol::Ipv6 | Protocol::Auto => Ok(None),
        }
    }

    async fn store(&self, address: &str) -> Result<(), Error> {
        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::cache(format!(
                    "failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(address.as_bytes()).await.map_err(|e| {
                Error::cache(format!(
                    "failed to write temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.flush().await.map_err(|e| {
                Error::cache(format!(
                    "failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        // Rename so a crash mid-write cannot leave a half-written cache
        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::cache(format!(
                "failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!("cached address {} in {}", address, self.path.display());
        Ok(())
    }
}
