//! Test doubles and common utilities for the reconciliation contract tests
//!
//! The mocks share their counters across clones so a test can hand the
//! reconciler an owned box and still observe the calls afterwards.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dyndns_core::config::{Config, Protocol};
use dyndns_core::error::Result;
use dyndns_core::traits::{AddressCache, DnsProvider, Record, RecordUpdate, Zone};
use dyndns_core::Error;

/// A scripted DnsProvider that records every call
#[derive(Clone)]
pub struct MockDnsProvider {
    zone: Option<Zone>,
    records: Vec<Record>,
    fail_mutations: bool,
    zone_calls: Arc<AtomicUsize>,
    record_calls: Arc<AtomicUsize>,
    create_calls: Arc<AtomicUsize>,
    update_calls: Arc<AtomicUsize>,
    created: Arc<Mutex<Vec<Record>>>,
    updated: Arc<Mutex<Vec<(String, RecordUpdate)>>>,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            zone: None,
            records: Vec::new(),
            fail_mutations: false,
            zone_calls: Arc::new(AtomicUsize::new(0)),
            record_calls: Arc::new(AtomicUsize::new(0)),
            create_calls: Arc::new(AtomicUsize::new(0)),
            update_calls: Arc::new(AtomicUsize::new(0)),
            created: Arc::new(Mutex::new(Vec::new())),
            updated: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script a zone for the given domain
    pub fn with_zone(mut self, id: &str, name: &str) -> Self {
        self.zone = Some(Zone {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    /// Script a record returned by the record listing
    pub fn with_record(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    /// Make create/update calls fail like a provider-side error
    pub fn failing_mutations(mut self) -> Self {
        self.fail_mutations = true;
        self
    }

    pub fn zone_calls(&self) -> usize {
        self.zone_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Total number of provider API calls of any kind
    pub fn total_calls(&self) -> usize {
        self.zone_calls.load(Ordering::SeqCst)
            + self.record_calls.load(Ordering::SeqCst)
            + self.create_calls.load(Ordering::SeqCst)
            + self.update_calls.load(Ordering::SeqCst)
    }

    /// Records passed to create_record
    pub fn created(&self) -> Vec<Record> {
        self.created.lock().unwrap().clone()
    }

    /// (record id, update) pairs passed to update_record
    pub fn updated(&self) -> Vec<(String, RecordUpdate)> {
        self.updated.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    async fn get_zone(&self, domain: &str) -> Result<Option<Zone>> {
        self.zone_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.zone.clone().filter(|z| z.name == domain))
    }

    async fn zone_records(&self, _zone_id: &str, _name: &str) -> Result<Vec<Record>> {
        self.record_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }

    async fn create_record(
        &self,
        _zone_id: &str,
        record_type: &str,
        name: &str,
        content: &str,
        ttl: u32,
    ) -> Result<Record> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations {
            return Err(Error::provider("mock", "create rejected"));
        }

        let record = Record {
            id: "rec-created".to_string(),
            record_type: record_type.to_string(),
            name: name.to_string(),
            content: content.to_string(),
            ttl,
        };
        self.created.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        _zone_id: &str,
        record_id: &str,
        update: &RecordUpdate,
    ) -> Result<Record> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations {
            return Err(Error::provider("mock", "update rejected"));
        }

        self.updated
            .lock()
            .unwrap()
            .push((record_id.to_string(), update.clone()));
        Ok(Record {
            id: record_id.to_string(),
            record_type: update.record_type.clone(),
            name: update.name.clone(),
            content: update.content.clone(),
            ttl: update.ttl,
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// An in-memory AddressCache that counts loads and stores
#[derive(Clone, Default)]
pub struct MockAddressCache {
    value: Arc<Mutex<Option<String>>>,
    load_calls: Arc<AtomicUsize>,
    store_calls: Arc<AtomicUsize>,
}

impl MockAddressCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(address: &str) -> Self {
        let cache = Self::default();
        *cache.value.lock().unwrap() = Some(address.to_string());
        cache
    }

    pub fn value(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }

    pub fn store_calls(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressCache for MockAddressCache {
    async fn load(&self) -> Result<Option<String>> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.value.lock().unwrap().clone())
    }

    async fn store(&self, address: &str) -> Result<()> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        *self.value.lock().unwrap() = Some(address.to_string());
        Ok(())
    }
}

/// A plain "A" record as the provider would return it
pub fn a_record(id: &str, name: &str, content: &str, ttl: u32) -> Record {
    Record {
        id: id.to_string(),
        record_type: "A".to_string(),
        name: name.to_string(),
        content: content.to_string(),
        ttl,
    }
}

/// Minimal pull-mode config for contract tests
pub fn test_config() -> Config {
    Config {
        email: "admin@example.com".to_string(),
        api_key: "k-123".to_string(),
        domain: "example.com".to_string(),
        record_name: "home.example.com".to_string(),
        ttl: 120,
        protocol: Protocol::Ipv4,
        auth_token: None,
        cache_file: "ip4.cache".into(),
    }
}
