//! Tailscale tailnet endpoints.

use crate::ApiClient;
use tailflare_core::{Device, DevicesResponse, Result};
use tracing::debug;

/// Device endpoints of one tailnet
pub struct TailnetApi<'a> {
    client: &'a ApiClient,
    tailnet: String,
}

impl<'a> TailnetApi<'a> {
    pub(crate) const fn new(client: &'a ApiClient, tailnet: String) -> Self {
        Self { client, tailnet }
    }

    /// The tailnet name these endpoints address
    #[must_use]
    pub fn name(&self) -> &str {
        &self.tailnet
    }

    /// List every device in the tailnet with the default field set
    pub async fn devices(&self) -> Result<Vec<Device>> {
        let response: DevicesResponse = self
            .client
            .get_with_query(
                &format!("/tailnet/{}/devices", self.tailnet),
                &[("fields", "default")],
            )
            .await?;

        debug!(tailnet = %self.tailnet, count = response.devices.len(), "listed devices");
        Ok(response.devices)
    }
}
