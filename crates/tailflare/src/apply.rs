//! Applying a change set to the zone.
//!
//! Calls are issued one at a time: every create, then (when enabled) every
//! update, then every delete. The first failure aborts the run and nothing
//! already applied is rolled back; the next run recomputes the diff.

use crate::source::RecordStore;
use serde::Serialize;
use tailflare_core::{ChangeSet, NewRecord, Result};
use tracing::{debug, info};

/// Mutation calls that succeeded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MutationSummary {
    /// Records created
    pub created: usize,
    /// Records whose content was replaced
    pub updated: usize,
    /// Records deleted
    pub deleted: usize,
}

/// Apply `changes` to `store`
///
/// Each address of a created name becomes its own single-address record.
/// Stale records are only rewritten when `apply_updates` is set.
pub async fn apply<S: RecordStore + ?Sized>(
    store: &S,
    changes: ChangeSet,
    apply_updates: bool,
) -> Result<MutationSummary> {
    let mut summary = MutationSummary::default();

    for (name, addresses) in changes.to_create() {
        for addr in addresses {
            let created = store.create(&NewRecord::address(name.as_str(), *addr)).await?;
            info!(record = %name, content = %addr, id = %created.id, "created record");
            summary.created += 1;
        }
    }

    if apply_updates {
        for (name, update) in changes.to_update() {
            store.update(&update.id, update.desired).await?;
            info!(
                record = %name,
                id = %update.id,
                from = %update.current,
                to = %update.desired,
                "updated record"
            );
            summary.updated += 1;
        }
    } else if !changes.to_update().is_empty() {
        info!(
            stale = changes.to_update().len(),
            "leaving records with outdated addresses untouched; updates are disabled"
        );
    }

    for (name, ids) in changes.to_delete() {
        for id in ids {
            store.delete(id).await?;
            info!(record = %name, id = %id, "deleted record");
            summary.deleted += 1;
        }
    }

    debug!(?summary, "applied changes");
    Ok(summary)
}
