//! Test doubles for engine contract tests

#![allow(dead_code)]

use notion_ip_core::error::{Error, Result};
use notion_ip_core::{AddressSource, Ipv4Address, RecordOutcome, Recorder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An address source that returns a fixed answer and counts calls
pub struct StaticSource {
    ip: Option<Ipv4Address>,
    resolve_call_count: Arc<AtomicUsize>,
}

impl StaticSource {
    pub fn returning(ip: &str) -> Self {
        Self {
            ip: Some(Ipv4Address::parse(ip).expect("test address is IPv4-shaped")),
            resolve_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn exhausted() -> Self {
        Self {
            ip: None,
            resolve_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn resolve_call_count(&self) -> usize {
        self.resolve_call_count.load(Ordering::SeqCst)
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            ip: other.ip.clone(),
            resolve_call_count: Arc::clone(&other.resolve_call_count),
        }
    }
}

#[async_trait::async_trait]
impl AddressSource for StaticSource {
    async fn resolve(&self) -> Result<Ipv4Address> {
        self.resolve_call_count.fetch_add(1, Ordering::SeqCst);
        self.ip
            .clone()
            .ok_or_else(|| Error::resolver_exhausted("no service succeeded"))
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// A recorder that applies the append policy against an in-memory "page"
pub struct MockRecorder {
    page: Arc<Mutex<Vec<Ipv4Address>>>,
    record_call_count: Arc<AtomicUsize>,
    fail_writes: bool,
}

impl MockRecorder {
    pub fn new() -> Self {
        Self {
            page: Arc::new(Mutex::new(Vec::new())),
            record_call_count: Arc::new(AtomicUsize::new(0)),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    pub fn with_recorded(ip: &str) -> Self {
        let recorder = Self::new();
        recorder
            .page
            .lock()
            .unwrap()
            .push(Ipv4Address::parse(ip).unwrap());
        recorder
    }

    pub fn record_call_count(&self) -> usize {
        self.record_call_count.load(Ordering::SeqCst)
    }

    pub fn recorded(&self) -> Vec<Ipv4Address> {
        self.page.lock().unwrap().clone()
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            page: Arc::clone(&other.page),
            record_call_count: Arc::clone(&other.record_call_count),
            fail_writes: other.fail_writes,
        }
    }
}

#[async_trait::async_trait]
impl Recorder for MockRecorder {
    async fn record(&self, ip: &Ipv4Address) -> Result<RecordOutcome> {
        self.record_call_count.fetch_add(1, Ordering::SeqCst);
        let mut page = self.page.lock().unwrap();
        let previous = page.last().cloned();
        if previous.as_ref() == Some(ip) {
            return Ok(RecordOutcome::Unchanged);
        }
        if self.fail_writes {
            return Err(Error::notion_write("status 400: body failed validation"));
        }
        page.push(ip.clone());
        Ok(RecordOutcome::Appended { previous })
    }

    fn recorder_name(&self) -> &'static str {
        "mock"
    }
}
