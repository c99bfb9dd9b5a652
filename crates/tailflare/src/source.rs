//! Seams between the sync pipeline and the two providers.

use async_trait::async_trait;
use std::net::Ipv4Addr;
use tailflare_client::api::{TailnetApi, ZoneApi};
use tailflare_core::{Device, DnsRecord, NewRecord, Result};

/// Where the device roster comes from
#[async_trait]
pub trait DeviceSource: Send + Sync {
    /// Every device in the network, authorized or not
    async fn devices(&self) -> Result<Vec<Device>>;
}

/// The zone being reconciled
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Existing address records (a single page)
    async fn records(&self) -> Result<Vec<DnsRecord>>;

    /// Create one single-address record
    async fn create(&self, record: &NewRecord) -> Result<DnsRecord>;

    /// Replace the content of an existing record
    async fn update(&self, record_id: &str, addr: Ipv4Addr) -> Result<DnsRecord>;

    /// Delete a record by id
    async fn delete(&self, record_id: &str) -> Result<()>;
}

#[async_trait]
impl<'a> DeviceSource for TailnetApi<'a> {
    async fn devices(&self) -> Result<Vec<Device>> {
        TailnetApi::devices(self).await
    }
}

#[async_trait]
impl<'a> RecordStore for ZoneApi<'a> {
    async fn records(&self) -> Result<Vec<DnsRecord>> {
        self.address_records().await
    }

    async fn create(&self, record: &NewRecord) -> Result<DnsRecord> {
        self.create_record(record).await
    }

    async fn update(&self, record_id: &str, addr: Ipv4Addr) -> Result<DnsRecord> {
        self.update_content(record_id, addr).await
    }

    async fn delete(&self, record_id: &str) -> Result<()> {
        self.delete_record(record_id).await.map(|_| ())
    }
}

#[async_trait]
impl<T: DeviceSource + ?Sized> DeviceSource for &T {
    async fn devices(&self) -> Result<Vec<Device>> {
        (**self).devices().await
    }
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for &T {
    async fn records(&self) -> Result<Vec<DnsRecord>> {
        (**self).records().await
    }

    async fn create(&self, record: &NewRecord) -> Result<DnsRecord> {
        (**self).create(record).await
    }

    async fn update(&self, record_id: &str, addr: Ipv4Addr) -> Result<DnsRecord> {
        (**self).update(record_id, addr).await
    }

    async fn delete(&self, record_id: &str) -> Result<()> {
        (**self).delete(record_id).await
    }
}
