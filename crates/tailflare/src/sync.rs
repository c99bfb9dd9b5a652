//! The end-to-end sync pipeline.
//!
//! fetch roster → desired mapping → fetch records → suffix → diff → apply

use crate::apply::{apply, MutationSummary};
use crate::source::{DeviceSource, RecordStore};
use serde::{Deserialize, Serialize};
use tailflare_client::RECORDS_PAGE_SIZE;
use tailflare_core::{
    desired_mapping, reconcile, validate_subdomain, zone_name_from_records, ChangeSet,
    Diagnostics, IdentifierMode, RecordSuffix, Result, SyncError, Warning,
};
use tracing::{debug, info};

/// Settings for one sync run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Tailnet name, stripped from machine names
    pub tailnet: String,

    /// Label(s) between the device identifier and the zone; empty for the apex
    #[serde(default)]
    pub subdomain: String,

    /// Zone name to use instead of reading it off an existing record
    #[serde(default)]
    pub zone_name: Option<String>,

    /// How device identifiers are derived
    #[serde(default)]
    pub mode: IdentifierMode,

    /// Compute and report changes without applying them
    #[serde(default)]
    pub dry_run: bool,

    /// Rewrite records whose address drifted instead of leaving them
    #[serde(default)]
    pub apply_updates: bool,
}

impl SyncOptions {
    /// Check settings that can be verified before any network call
    pub fn validate(&self) -> Result<()> {
        if self.tailnet.is_empty() {
            return Err(SyncError::Config("tailnet name is required".to_string()));
        }
        validate_subdomain(&self.subdomain)?;
        let bad_zone_name = |name: &str| {
            name.is_empty() || name.starts_with('.') || name.ends_with('.')
        };
        if self.zone_name.as_deref().is_some_and(bad_zone_name) {
            return Err(SyncError::Config(
                "zone name must be non-empty and must not start or end with '.'".to_string(),
            ));
        }
        Ok(())
    }
}

/// The computed change set and the context it was computed in
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    /// Suffix every managed record carries
    pub suffix: String,
    /// Devices listed by the mesh provider
    pub devices: usize,
    /// Identifiers in the desired mapping
    pub desired: usize,
    /// Address records fetched from the zone
    pub records: usize,
    /// What has to change
    pub changes: ChangeSet,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Dry run; nothing was sent to the DNS provider
    DryRun,
    /// Every queued mutation succeeded
    Applied(MutationSummary),
}

/// Reconciles one tailnet into one zone
pub struct Synchronizer<D, S> {
    source: D,
    store: S,
    options: SyncOptions,
}

impl<D: DeviceSource, S: RecordStore> Synchronizer<D, S> {
    /// Create a synchronizer; fails on settings that are invalid up front
    pub fn new(source: D, store: S, options: SyncOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            source,
            store,
            options,
        })
    }

    /// Settings this synchronizer runs with
    #[must_use]
    pub const fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Fetch both sides and compute the change set without mutating anything
    pub async fn plan(&self, diag: &mut impl Diagnostics) -> Result<Plan> {
        let devices = self.source.devices().await?;
        debug!(count = devices.len(), "fetched devices");

        let desired = desired_mapping(&devices, &self.options.tailnet, self.options.mode, diag);
        debug!(?desired, "IPv4 mappings");

        let records = self.store.records().await?;
        debug!(count = records.len(), "fetched records");
        if records.len() >= RECORDS_PAGE_SIZE {
            diag.warn(Warning::PageCeiling {
                count: records.len(),
            });
        }

        let zone_name = match &self.options.zone_name {
            Some(name) => name.as_str(),
            None => zone_name_from_records(&records)?,
        };
        let suffix = RecordSuffix::new(zone_name, &self.options.subdomain)?;

        let changes = reconcile(&desired, &records, &suffix, diag)?;
        info!(
            suffix = %suffix,
            create = changes.create_count(),
            update = changes.to_update().len(),
            delete = changes.delete_count(),
            to_create = ?changes.to_create(),
            to_update = ?changes.to_update(),
            to_delete = ?changes.to_delete(),
            "queued Cloudflare changes"
        );

        Ok(Plan {
            suffix: suffix.to_string(),
            devices: devices.len(),
            desired: desired.len(),
            records: records.len(),
            changes,
        })
    }

    /// Apply a plan, or stop here on a dry run
    pub async fn execute(&self, plan: Plan) -> Result<Outcome> {
        if self.options.dry_run {
            info!("dry run; not applying changes");
            return Ok(Outcome::DryRun);
        }
        let summary = apply(&self.store, plan.changes, self.options.apply_updates).await?;
        Ok(Outcome::Applied(summary))
    }

    /// Plan and execute in one go
    pub async fn run(&self, diag: &mut impl Diagnostics) -> Result<Outcome> {
        let plan = self.plan(diag).await?;
        self.execute(plan).await
    }
}
