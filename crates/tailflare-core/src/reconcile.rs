//! Diffing desired tailnet state against the records already in the zone.
//!
//! The diff is computed from scratch on every run, so re-running after a
//! partial failure converges without any stored state. Every key is decided
//! independently and all outputs are ordered by record name, which makes the
//! result independent of input order.

use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Result, SyncError};
use crate::normalize::DesiredMapping;
use crate::types::DnsRecord;
use crate::zone::{group_by_name, RecordSuffix};
use serde::Serialize;
use std::collections::BTreeMap;
use std::net::Ipv4Addr;

/// An existing record whose address no longer matches its device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordUpdate {
    /// Provider record identifier
    pub id: String,
    /// Content currently in the zone
    pub current: String,
    /// Address the device has now
    pub desired: Ipv4Addr,
}

/// Output of one reconciliation pass
///
/// Read-only once built; hand it to the mutator by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    to_create: BTreeMap<String, Vec<Ipv4Addr>>,
    to_update: BTreeMap<String, RecordUpdate>,
    to_delete: BTreeMap<String, Vec<String>>,
}

impl ChangeSet {
    /// Record name → addresses that need new records
    #[must_use]
    pub const fn to_create(&self) -> &BTreeMap<String, Vec<Ipv4Addr>> {
        &self.to_create
    }

    /// Record name → single record whose content is stale
    #[must_use]
    pub const fn to_update(&self) -> &BTreeMap<String, RecordUpdate> {
        &self.to_update
    }

    /// Record name → record ids to remove
    #[must_use]
    pub const fn to_delete(&self) -> &BTreeMap<String, Vec<String>> {
        &self.to_delete
    }

    /// Number of create calls applying this change set takes
    #[must_use]
    pub fn create_count(&self) -> usize {
        self.to_create.values().map(Vec::len).sum()
    }

    /// Number of delete calls applying this change set takes
    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.to_delete.values().map(Vec::len).sum()
    }

    /// True when the zone already matches the tailnet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

/// Compute what to create, update and delete
///
/// Fails with [`SyncError::Ambiguous`] as soon as a desired name is backed
/// by more than one existing record. Records whose names fall outside
/// `suffix` are never considered.
pub fn reconcile(
    desired: &DesiredMapping,
    records: &[DnsRecord],
    suffix: &RecordSuffix,
    diag: &mut impl Diagnostics,
) -> Result<ChangeSet> {
    let by_name = group_by_name(records);
    let mut changes = ChangeSet::default();

    for (identifier, addresses) in desired {
        let record_name = suffix.record_name(identifier);

        match by_name.get(record_name.as_str()).map(Vec::as_slice) {
            None | Some([]) => {
                changes.to_create.insert(record_name, addresses.clone());
            }
            Some([existing]) => match addresses.first() {
                None => diag.warn(Warning::NoAddressForExisting { record_name }),
                Some(&first) if existing.as_ipv4() != Some(first) => {
                    changes.to_update.insert(
                        record_name,
                        RecordUpdate {
                            id: existing.id.clone(),
                            current: existing.content.clone(),
                            desired: first,
                        },
                    );
                }
                Some(_) => {}
            },
            Some(many) => {
                return Err(SyncError::Ambiguous {
                    record_name,
                    count: many.len(),
                });
            }
        }
    }

    for record in records {
        let Some(identifier) = suffix.strip(&record.name) else {
            continue;
        };
        if !desired.contains_key(identifier) {
            changes
                .to_delete
                .entry(record.name.clone())
                .or_default()
                .push(record.id.clone());
        }
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{desired_mapping, IdentifierMode};
    use crate::types::Device;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    const ZONE: &str = "example.com";

    fn suffix() -> RecordSuffix {
        RecordSuffix::new(ZONE, "tailnet").unwrap()
    }

    fn record(id: &str, name: &str, content: &str) -> DnsRecord {
        DnsRecord::address(id, name, content, ZONE)
    }

    fn desired(entries: &[(&str, &[&str])]) -> DesiredMapping {
        entries
            .iter()
            .map(|(name, addrs)| {
                (
                    (*name).to_string(),
                    addrs
                        .iter()
                        .map(|a| a.parse::<Ipv4Addr>().unwrap())
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }

    #[test]
    fn test_new_device_is_created() {
        let changes = reconcile(
            &desired(&[("node-a", &["10.0.0.1"])]),
            &[],
            &suffix(),
            &mut Vec::new(),
        )
        .unwrap();

        assert_eq!(
            changes.to_create(),
            &BTreeMap::from([(
                "node-a.tailnet.example.com".to_string(),
                vec![Ipv4Addr::new(10, 0, 0, 1)]
            )])
        );
        assert!(changes.to_delete().is_empty());
        assert!(changes.to_update().is_empty());
    }

    #[test]
    fn test_departed_device_is_deleted() {
        let changes = reconcile(
            &DesiredMapping::new(),
            &[record("abc", "node-a.tailnet.example.com", "10.0.0.1")],
            &suffix(),
            &mut Vec::new(),
        )
        .unwrap();

        assert!(changes.to_create().is_empty());
        assert_eq!(
            changes.to_delete(),
            &BTreeMap::from([(
                "node-a.tailnet.example.com".to_string(),
                vec!["abc".to_string()]
            )])
        );
    }

    #[test]
    fn test_matching_record_is_left_alone() {
        let changes = reconcile(
            &desired(&[("node-a", &["10.0.0.1"])]),
            &[record("abc", "node-a.tailnet.example.com", "10.0.0.1")],
            &suffix(),
            &mut Vec::new(),
        )
        .unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_changed_address_is_an_update() {
        let changes = reconcile(
            &desired(&[("node-a", &["10.0.0.2", "10.0.0.3"])]),
            &[record("abc", "node-a.tailnet.example.com", "10.0.0.1")],
            &suffix(),
            &mut Vec::new(),
        )
        .unwrap();

        assert!(changes.to_create().is_empty());
        assert!(changes.to_delete().is_empty());
        assert_eq!(
            changes.to_update()["node-a.tailnet.example.com"],
            RecordUpdate {
                id: "abc".into(),
                current: "10.0.0.1".into(),
                desired: Ipv4Addr::new(10, 0, 0, 2),
            }
        );
    }

    #[test]
    fn test_records_outside_suffix_are_never_deleted() {
        let records = vec![
            record("1", "www.example.com", "192.0.2.1"),
            record("2", "example.com", "192.0.2.2"),
            record("3", "tailnet.example.com", "192.0.2.3"),
            record("4", "mytailnet.example.com", "192.0.2.4"),
        ];
        let changes = reconcile(
            &DesiredMapping::new(),
            &records,
            &suffix(),
            &mut Vec::new(),
        )
        .unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_apex_suffix_protects_zone_apex() {
        let suffix = RecordSuffix::new(ZONE, "").unwrap();
        let records = vec![
            record("1", "example.com", "192.0.2.1"),
            record("2", "gone.example.com", "100.64.0.9"),
        ];
        let changes = reconcile(
            &DesiredMapping::new(),
            &records,
            &suffix,
            &mut Vec::new(),
        )
        .unwrap();
        assert_eq!(changes.to_delete().keys().collect::<Vec<_>>(), vec!["gone.example.com"]);
    }

    #[test]
    fn test_duplicate_records_for_desired_name_fail() {
        let err = reconcile(
            &desired(&[("node-a", &["10.0.0.1"])]),
            &[
                record("1", "node-a.tailnet.example.com", "10.0.0.1"),
                record("2", "node-a.tailnet.example.com", "10.0.0.2"),
            ],
            &suffix(),
            &mut Vec::new(),
        )
        .unwrap_err();

        match err {
            SyncError::Ambiguous { record_name, count } => {
                assert_eq!(record_name, "node-a.tailnet.example.com");
                assert_eq!(count, 2);
            }
            other => panic!("expected ambiguity error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_records_for_departed_name_are_all_deleted() {
        let changes = reconcile(
            &DesiredMapping::new(),
            &[
                record("1", "old.tailnet.example.com", "10.0.0.1"),
                record("2", "old.tailnet.example.com", "10.0.0.2"),
            ],
            &suffix(),
            &mut Vec::new(),
        )
        .unwrap();
        assert_eq!(changes.delete_count(), 2);
    }

    #[test]
    fn test_device_without_addresses_keeps_its_record() {
        let mut warnings = Vec::new();
        let changes = reconcile(
            &desired(&[("v6only", &[])]),
            &[record("abc", "v6only.tailnet.example.com", "10.0.0.1")],
            &suffix(),
            &mut warnings,
        )
        .unwrap();

        assert!(changes.is_empty());
        assert_eq!(
            warnings,
            vec![Warning::NoAddressForExisting {
                record_name: "v6only.tailnet.example.com".into()
            }]
        );
    }

    #[test]
    fn test_device_without_addresses_creates_nothing() {
        let changes = reconcile(
            &desired(&[("v6only", &[])]),
            &[],
            &suffix(),
            &mut Vec::new(),
        )
        .unwrap();
        assert_eq!(changes.create_count(), 0);
        assert!(changes.to_create().contains_key("v6only.tailnet.example.com"));
    }

    #[test]
    fn test_unauthorized_device_record_is_deleted() {
        let devices = vec![Device {
            authorized: false,
            ..Device::authorized("node-a.corp.ts.net", ["10.0.0.1"])
        }];
        let mapping = desired_mapping(
            &devices,
            "corp.ts.net",
            IdentifierMode::MachineName,
            &mut Vec::new(),
        );
        let changes = reconcile(
            &mapping,
            &[record("abc", "node-a.tailnet.example.com", "10.0.0.1")],
            &suffix(),
            &mut Vec::new(),
        )
        .unwrap();

        assert!(changes.to_create().is_empty());
        assert_eq!(changes.delete_count(), 1);
    }

    #[test]
    fn test_second_pass_after_apply_is_empty() {
        let wanted = desired(&[("node-a", &["10.0.0.1"]), ("node-b", &["10.0.0.2"])]);
        let first = reconcile(
            &wanted,
            &[record("old", "node-z.tailnet.example.com", "10.0.0.9")],
            &suffix(),
            &mut Vec::new(),
        )
        .unwrap();
        assert_eq!(first.create_count(), 2);
        assert_eq!(first.delete_count(), 1);

        // Zone after the first pass was applied.
        let applied: Vec<DnsRecord> = first
            .to_create()
            .iter()
            .flat_map(|(name, addrs)| {
                addrs
                    .iter()
                    .map(move |addr| record(&format!("id-{name}"), name, &addr.to_string()))
            })
            .collect();

        let second = reconcile(&wanted, &applied, &suffix(), &mut Vec::new()).unwrap();
        assert!(second.is_empty());
        let third = reconcile(&wanted, &applied, &suffix(), &mut Vec::new()).unwrap();
        assert_eq!(second, third);
    }

    #[test]
    fn test_result_is_order_independent() {
        let devices: Vec<Device> = (0..12)
            .map(|i| Device::authorized(format!("node-{i}.corp.ts.net"), [format!("100.64.0.{i}")]))
            .collect();
        let records: Vec<DnsRecord> = (6..18)
            .map(|i| {
                record(
                    &format!("r{i}"),
                    &format!("node-{i}.tailnet.example.com"),
                    "100.64.1.1",
                )
            })
            .chain([record("w", "www.example.com", "192.0.2.1")])
            .collect();

        let baseline = {
            let mapping = desired_mapping(
                &devices,
                "corp.ts.net",
                IdentifierMode::MachineName,
                &mut Vec::new(),
            );
            reconcile(&mapping, &records, &suffix(), &mut Vec::new()).unwrap()
        };
        assert_eq!(baseline.create_count(), 6);
        assert_eq!(baseline.to_update().len(), 6);
        assert_eq!(baseline.delete_count(), 6);

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..16 {
            let mut devices = devices.clone();
            let mut records = records.clone();
            devices.shuffle(&mut rng);
            records.shuffle(&mut rng);

            let mapping = desired_mapping(
                &devices,
                "corp.ts.net",
                IdentifierMode::MachineName,
                &mut Vec::new(),
            );
            let changes = reconcile(&mapping, &records, &suffix(), &mut Vec::new()).unwrap();
            assert_eq!(changes, baseline);
        }
    }
}
