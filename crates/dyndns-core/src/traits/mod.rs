//! Collaborator seams for the reconciler
//!
//! The reconciler only ever talks to these traits, so every external
//! dependency (provider API, IP-echo service, cache file) can be swapped
//! for an in-memory stand-in under test.

pub mod address_cache;
pub mod dns_provider;
pub mod ip_source;

pub use address_cache::AddressCache;
pub use dns_provider::{DnsProvider, Record, RecordUpdate, Zone};
pub use ip_source::IpSource;
