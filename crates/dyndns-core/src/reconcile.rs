//! The reconciliation algorithm
//!
//! Compares the resolved address against the cached one and, when they
//! differ (or no usable cache exists), against the provider's record, then
//! performs the minimal remote mutation: create, update, or nothing.
//!
//! ## Control Flow
//!
//! 1. Cache equality → done, zero provider calls.
//! 2. Zone lookup; an absent zone is fatal.
//! 3. Record lookup, first exact-name match wins.
//! 4. Three-way branch: create / update / already correct.
//! 5. Cache write, only after the provider confirmed the state.
//!
//! Any provider error between steps 2 and 4 propagates out and leaves the
//! cache untouched, so the next invocation retries from scratch.

use tracing::{debug, info};

use crate::config::Config;
use crate::traits::{AddressCache, DnsProvider, RecordUpdate};
use crate::{Error, Result};

/// Managed records are always plain "A" records.
const RECORD_TYPE: &str = "A";

/// What a reconciliation pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Resolved address equals the cached one; no provider calls were made
    CacheHit,
    /// No record existed; one was created
    Created,
    /// A record existed with stale type/content/ttl; it was overwritten
    Updated,
    /// The record already carried the desired type/content/ttl
    AlreadyCorrect,
}

impl Outcome {
    /// Whether the pass mutated anything at the provider
    pub fn mutated(&self) -> bool {
        matches!(self, Outcome::Created | Outcome::Updated)
    }
}

/// One-shot reconciler
///
/// Owns its collaborators for the duration of a single invocation. The
/// cache is an explicit resource here rather than ambient state, so tests
/// drive the whole algorithm with in-memory stand-ins.
pub struct Reconciler {
    provider: Box<dyn DnsProvider>,
    cache: Box<dyn AddressCache>,
    config: Config,
}

impl Reconciler {
    /// Create a reconciler for one invocation
    pub fn new(
        provider: Box<dyn DnsProvider>,
        cache: Box<dyn AddressCache>,
        config: Config,
    ) -> Self {
        Self {
            provider,
            cache,
            config,
        }
    }

    /// Reconcile the provider record with the resolved address
    ///
    /// Performs at most one mutating provider call. On success the cache
    /// holds `resolved`; on any error the cache is left as it was.
    pub async fn run(&self, resolved: &str) -> Result<Outcome> {
        let cached = self.cache.load().await?;

        if let Some(cached) = &cached {
            debug!("cached address is {}", cached);
            if cached == resolved {
                info!("current address matches the cache, nothing to do");
                return Ok(Outcome::CacheHit);
            }
        }

        let zone = self
            .provider
            .get_zone(&self.config.domain)
            .await?
            .ok_or_else(|| Error::domain_not_found(&self.config.domain))?;
        debug!("zone {} has id {}", zone.name, zone.id);

        let records = self
            .provider
            .zone_records(&zone.id, &self.config.record_name)
            .await?;
        let existing = records
            .into_iter()
            .find(|r| r.name == self.config.record_name);

        let outcome = match existing {
            None => {
                info!("no existing record found, creating a new one");
                self.provider
                    .create_record(
                        &zone.id,
                        RECORD_TYPE,
                        &self.config.record_name,
                        resolved,
                        self.config.ttl,
                    )
                    .await?;
                Outcome::Created
            }
            Some(record)
                if record.record_type != RECORD_TYPE
                    || record.content != resolved
                    || record.ttl != self.config.ttl =>
            {
                info!("updating record {}", record.name);
                let update = RecordUpdate {
                    record_type: RECORD_TYPE.to_string(),
                    name: self.config.record_name.clone(),
                    content: resolved.to_string(),
                    ttl: self.config.ttl,
                };
                self.provider
                    .update_record(&zone.id, &record.id, &update)
                    .await?;
                Outcome::Updated
            }
            Some(_) => {
                info!("record appears OK, no need to update");
                Outcome::AlreadyCorrect
            }
        };

        // Only reached after the provider confirmed the record; a failure
        // above leaves the old cache in place for the next attempt.
        self.cache.store(resolved).await?;
        info!("stored address {} in the cache", resolved);

        Ok(outcome)
    }
}
