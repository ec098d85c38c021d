//! Id-keyed storage of sequence records.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use thiserror::Error;

use crate::record::SequenceRecord;

/// Opaque registry handle. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceId(u64);

impl SequenceId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("No sequence registered under id {0}")]
    UnknownSequence(SequenceId),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Owns the registered records, iterated in id order.
#[derive(Debug, Clone)]
pub struct SequenceRegistry {
    records: BTreeMap<SequenceId, SequenceRecord>,
    next_id: u64,
}

impl SequenceRegistry {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Stores a record under a fresh id.
    pub fn register(&mut self, record: SequenceRecord) -> SequenceId {
        let id = SequenceId(self.next_id);
        self.next_id += 1;
        debug!("Registered {} {:?} as {}", record.kind(), record.name(), id);
        self.records.insert(id, record);
        id
    }

    /// Removes a record and hands it back.
    pub fn unregister(&mut self, id: SequenceId) -> RegistryResult<SequenceRecord> {
        let record = self
            .records
            .remove(&id)
            .ok_or(RegistryError::UnknownSequence(id))?;
        debug!("Unregistered {} {:?}", id, record.name());
        Ok(record)
    }

    pub fn get(&self, id: SequenceId) -> Option<&SequenceRecord> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: SequenceId) -> bool {
        self.records.contains_key(&id)
    }

    /// Records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (SequenceId, &SequenceRecord)> {
        self.records.iter().map(|(&id, record)| (id, record))
    }

    pub fn ids(&self) -> impl Iterator<Item = SequenceId> + '_ {
        self.records.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record. The id counter keeps running.
    pub fn clear(&mut self) {
        debug!("Cleared {} registered sequences", self.records.len());
        self.records.clear();
    }
}

impl Default for SequenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amino(name: &str) -> SequenceRecord {
        SequenceRecord::amino(name, "MKV")
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut registry = SequenceRegistry::new();
        let first = registry.register(amino("a"));
        let second = registry.register(amino("b"));
        assert_eq!(first.get(), 1);
        assert!(second > first);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_ids_never_reused() {
        let mut registry = SequenceRegistry::new();
        let first = registry.register(amino("a"));
        registry.unregister(first).unwrap();
        let second = registry.register(amino("b"));
        assert_ne!(first, second);

        registry.clear();
        assert!(registry.is_empty());
        let third = registry.register(amino("c"));
        assert!(third > second);
    }

    #[test]
    fn test_get_and_unregister() {
        let mut registry = SequenceRegistry::new();
        let id = registry.register(amino("kept"));
        assert_eq!(registry.get(id).map(|record| record.name()), Some("kept"));

        let record = registry.unregister(id).unwrap();
        assert_eq!(record.name(), "kept");
        assert!(registry.get(id).is_none());
        assert_eq!(
            registry.unregister(id),
            Err(RegistryError::UnknownSequence(id))
        );
    }

    #[test]
    fn test_iteration_in_id_order() {
        let mut registry = SequenceRegistry::new();
        for name in ["x", "y", "z"] {
            registry.register(amino(name));
        }
        let names: Vec<&str> = registry.iter().map(|(_, record)| record.name()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);

        let ids: Vec<SequenceId> = registry.ids().collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
