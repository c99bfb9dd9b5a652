//! Cloudflare zone DNS record endpoints.

use crate::config::RECORDS_PAGE_SIZE;
use crate::ApiClient;
use std::net::Ipv4Addr;
use tailflare_core::{
    DeletedRecord, DnsRecord, Envelope, NewRecord, RecordPatch, Result, ADDRESS_RECORD_TYPE,
};
use tracing::debug;

/// DNS record endpoints of one zone
pub struct ZoneApi<'a> {
    client: &'a ApiClient,
    zone_id: String,
}

impl<'a> ZoneApi<'a> {
    pub(crate) const fn new(client: &'a ApiClient, zone_id: String) -> Self {
        Self { client, zone_id }
    }

    /// The zone identifier these endpoints address
    #[must_use]
    pub fn id(&self) -> &str {
        &self.zone_id
    }

    fn records_path(&self) -> String {
        format!("/zones/{}/dns_records", self.zone_id)
    }

    /// List unproxied `A` records, first page only
    pub async fn address_records(&self) -> Result<Vec<DnsRecord>> {
        let per_page = RECORDS_PAGE_SIZE.to_string();
        let envelope: Envelope<Vec<DnsRecord>> = self
            .client
            .get_with_query(
                &self.records_path(),
                &[
                    ("per_page", per_page.as_str()),
                    ("proxied", "false"),
                    ("type", ADDRESS_RECORD_TYPE),
                ],
            )
            .await?;

        let records = envelope.result;
        debug!(zone = %self.zone_id, count = records.len(), "listed records");
        Ok(records)
    }

    /// Create one `A` record
    pub async fn create_record(&self, record: &NewRecord) -> Result<DnsRecord> {
        let envelope: Envelope<DnsRecord> = self.client.post(&self.records_path(), record).await?;
        Ok(envelope.result)
    }

    /// Point an existing record at a new address
    pub async fn update_content(&self, record_id: &str, addr: Ipv4Addr) -> Result<DnsRecord> {
        let patch = RecordPatch {
            content: addr.to_string(),
        };
        let envelope: Envelope<DnsRecord> = self
            .client
            .patch(&format!("{}/{record_id}", self.records_path()), &patch)
            .await?;
        Ok(envelope.result)
    }

    /// Delete a record by id
    pub async fn delete_record(&self, record_id: &str) -> Result<DeletedRecord> {
        let envelope: Envelope<DeletedRecord> = self
            .client
            .delete(&format!("{}/{record_id}", self.records_path()))
            .await?;
        Ok(envelope.result)
    }
}
