//! In-memory providers for pipeline tests.

use crate::source::{DeviceSource, RecordStore};
use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::sync::Mutex;
use tailflare_core::{Device, DnsRecord, NewRecord, Result, SyncError};

const ZONE_NAME: &str = "example.com";

/// A mutation the pipeline asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(String, String),
    Update(String, String),
    Delete(String),
}

pub struct FakeTailnet {
    devices: Vec<Device>,
}

impl FakeTailnet {
    pub fn new(devices: Vec<Device>) -> Self {
        Self { devices }
    }
}

#[async_trait]
impl DeviceSource for FakeTailnet {
    async fn devices(&self) -> Result<Vec<Device>> {
        Ok(self.devices.clone())
    }
}

/// A zone that applies mutations to its own record list
pub struct FakeZone {
    records: Mutex<Vec<DnsRecord>>,
    calls: Mutex<Vec<Call>>,
    fail_on: Option<String>,
    next_id: Mutex<usize>,
}

impl FakeZone {
    pub fn new(records: Vec<DnsRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            calls: Mutex::new(Vec::new()),
            fail_on: None,
            next_id: Mutex::new(0),
        }
    }

    /// Reject any create for `name` with a 400
    pub fn failing_on(mut self, name: &str) -> Self {
        self.fail_on = Some(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for FakeZone {
    async fn records(&self) -> Result<Vec<DnsRecord>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create(&self, record: &NewRecord) -> Result<DnsRecord> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Create(record.name.clone(), record.content.clone()));

        if self.fail_on.as_deref() == Some(record.name.as_str()) {
            return Err(SyncError::Protocol {
                status: 400,
                body: "record rejected".to_string(),
            });
        }

        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("new-{next}")
        };
        let created = DnsRecord::address(id, &record.name, &record.content, ZONE_NAME);
        self.records.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, record_id: &str, addr: Ipv4Addr) -> Result<DnsRecord> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Update(record_id.to_string(), addr.to_string()));

        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| SyncError::Protocol {
                status: 404,
                body: record_id.to_string(),
            })?;
        record.content = addr.to_string();
        Ok(record.clone())
    }

    async fn delete(&self, record_id: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Delete(record_id.to_string()));
        self.records.lock().unwrap().retain(|r| r.id != record_id);
        Ok(())
    }
}
