//! Decoded instance metadata records.

use crate::prelude::*;

/// Attribute map for one advertised SQL Server instance.
///
/// The Browser service emits attributes as a flat key/value sequence and the
/// key set is open-ended, so the record is an ordered association list rather
/// than a fixed struct: iteration yields pairs in the order the server
/// emitted them, which is part of the observable contract.
///
/// A duplicate key overwrites the earlier value in place and keeps the first
/// occurrence's position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceRecord {
    pairs: Vec<(String, String)>,
}

impl InstanceRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, overwriting in place if the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Look up an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of attributes in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the record has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over attributes in server emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The `ServerName` attribute, if present.
    #[must_use]
    pub fn server_name(&self) -> Option<&str> {
        self.get("ServerName")
    }

    /// The `InstanceName` attribute, if present.
    #[must_use]
    pub fn instance_name(&self) -> Option<&str> {
        self.get("InstanceName")
    }

    /// The `Version` attribute, if present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.get("Version")
    }

    /// The `IsClustered` attribute, decoded from its `Yes`/`No` encoding.
    #[must_use]
    pub fn is_clustered(&self) -> Option<bool> {
        match self.get("IsClustered") {
            Some("Yes") => Some(true),
            Some("No") => Some(false),
            _ => None,
        }
    }

    /// The `tcp` attribute parsed as a port number, if present and numeric.
    #[must_use]
    pub fn tcp_port(&self) -> Option<u16> {
        self.get("tcp").and_then(|v| v.parse().ok())
    }

    /// The `np` (named pipe) attribute, if present.
    #[must_use]
    pub fn named_pipe(&self) -> Option<&str> {
        self.get("np")
    }
}

impl<'a> IntoIterator for &'a InstanceRecord {
    type Item = (&'a str, &'a str);
    type IntoIter = core::iter::Map<
        core::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
