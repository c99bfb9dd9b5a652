//! Record suffix computation and grouping of existing records.

use crate::error::{Result, SyncError};
use crate::types::DnsRecord;
use std::collections::BTreeMap;
use std::fmt;

/// Existing records grouped by exact name
pub type RecordsByName<'a> = BTreeMap<&'a str, Vec<&'a DnsRecord>>;

/// Reject subdomains that start or end with a dot
pub fn validate_subdomain(subdomain: &str) -> Result<()> {
    if subdomain.starts_with('.') || subdomain.ends_with('.') {
        return Err(SyncError::Config(format!(
            "subdomain {subdomain:?} must not start or end with '.'"
        )));
    }
    Ok(())
}

/// Take the zone name off the first fetched record
///
/// There is no separate zone lookup, so an empty zone cannot be resolved.
pub fn zone_name_from_records(records: &[DnsRecord]) -> Result<&str> {
    records
        .first()
        .map(|record| record.zone_name.as_str())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            SyncError::Config(
                "cannot determine the zone name: the zone has no A records to read it from; \
                 pass the zone name explicitly"
                    .to_string(),
            )
        })
}

/// The fixed tail shared by every managed record name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSuffix(String);

impl RecordSuffix {
    /// `<subdomain>.<zone>`, or just `<zone>` when the subdomain is empty
    pub fn new(zone_name: &str, subdomain: &str) -> Result<Self> {
        validate_subdomain(subdomain)?;
        if zone_name.is_empty() {
            return Err(SyncError::Config("zone name is empty".to_string()));
        }
        if subdomain.is_empty() {
            Ok(Self(zone_name.to_string()))
        } else {
            Ok(Self(format!("{subdomain}.{zone_name}")))
        }
    }

    /// The suffix text, without a leading dot
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full record name for an identifier
    #[must_use]
    pub fn record_name(&self, identifier: &str) -> String {
        format!("{identifier}.{}", self.0)
    }

    /// Identifier a managed record name was built from
    ///
    /// Returns `None` for names outside the suffix, including the suffix
    /// itself and names that only share its trailing text.
    #[must_use]
    pub fn strip<'a>(&self, record_name: &'a str) -> Option<&'a str> {
        record_name
            .strip_suffix(self.0.as_str())?
            .strip_suffix('.')
            .filter(|identifier| !identifier.is_empty())
    }
}

impl fmt::Display for RecordSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Group records by exact name
#[must_use]
pub fn group_by_name(records: &[DnsRecord]) -> RecordsByName<'_> {
    let mut grouped = RecordsByName::new();
    for record in records {
        grouped.entry(record.name.as_str()).or_default().push(record);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdomain_dots_rejected() {
        assert!(validate_subdomain("ts").is_ok());
        assert!(validate_subdomain("").is_ok());
        assert!(validate_subdomain("a.b").is_ok());
        assert!(validate_subdomain(".ts").unwrap_err().is_config_error());
        assert!(validate_subdomain("ts.").unwrap_err().is_config_error());
    }

    #[test]
    fn test_suffix_with_and_without_subdomain() {
        assert_eq!(RecordSuffix::new("example.com", "ts").unwrap().as_str(), "ts.example.com");
        assert_eq!(RecordSuffix::new("example.com", "").unwrap().as_str(), "example.com");
        assert!(RecordSuffix::new("example.com", ".ts").is_err());
    }

    #[test]
    fn test_zone_name_from_records() {
        let records = vec![DnsRecord::address("1", "www.example.com", "192.0.2.1", "example.com")];
        assert_eq!(zone_name_from_records(&records).unwrap(), "example.com");
        assert!(zone_name_from_records(&[]).unwrap_err().is_config_error());
    }

    #[test]
    fn test_strip() {
        let suffix = RecordSuffix::new("example.com", "ts").unwrap();
        assert_eq!(suffix.strip("laptop.ts.example.com"), Some("laptop"));
        assert_eq!(suffix.strip("a.b.ts.example.com"), Some("a.b"));
        assert_eq!(suffix.strip("ts.example.com"), None);
        assert_eq!(suffix.strip("laptopts.example.com"), None);
        assert_eq!(suffix.strip("www.example.com"), None);
        assert_eq!(suffix.strip(".ts.example.com"), None);
    }

    #[test]
    fn test_group_by_name() {
        let records = vec![
            DnsRecord::address("1", "a.example.com", "192.0.2.1", "example.com"),
            DnsRecord::address("2", "b.example.com", "192.0.2.2", "example.com"),
            DnsRecord::address("3", "a.example.com", "192.0.2.3", "example.com"),
        ];
        let grouped = group_by_name(&records);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["a.example.com"].len(), 2);
        assert_eq!(grouped["b.example.com"][0].id, "2");
    }
}
