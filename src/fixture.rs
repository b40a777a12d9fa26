//! In-memory registry of entities created during a run.

use std::collections::HashMap;

use crate::model::entity::{EntityKind, EntityRecord};

/// Snapshots of created entities keyed by `(kind, id)`.
///
/// Owned by a single [`HarnessContext`](crate::context::HarnessContext), never shared
/// between workers.
#[derive(Debug, Default)]
pub struct FixtureStore {
    records: HashMap<(EntityKind, i64), EntityRecord>,
}

impl FixtureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a snapshot, returning the one it replaced.
    pub fn record(
        &mut self,
        kind: EntityKind,
        id: i64,
        data: EntityRecord,
    ) -> Option<EntityRecord> {
        self.records.insert((kind, id), data)
    }

    pub fn lookup(&self, kind: EntityKind, id: i64) -> Option<&EntityRecord> {
        self.records.get(&(kind, id))
    }

    /// Every snapshot of `kind`, ordered by id.
    pub fn records_of(&self, kind: EntityKind) -> Vec<(i64, &EntityRecord)> {
        let mut records: Vec<_> = self
            .records
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|((_, id), record)| (*id, record))
            .collect();
        records.sort_by_key(|(id, _)| *id);
        records
    }

    pub fn reset(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn record_overwrites_silently() {
        let mut store = FixtureStore::new();
        let first = EntityRecord::from([("name", json!("first"))]);
        let second = EntityRecord::from([("name", json!("second"))]);

        assert!(store.record(EntityKind::Tag, 1, first.clone()).is_none());
        assert_eq!(store.record(EntityKind::Tag, 1, second.clone()), Some(first));
        assert_eq!(store.lookup(EntityKind::Tag, 1), Some(&second));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn same_id_of_different_kinds_are_separate() {
        let mut store = FixtureStore::new();
        store.record(EntityKind::Tag, 1, EntityRecord::new());
        store.record(EntityKind::Comment, 1, EntityRecord::new());

        assert_eq!(store.len(), 2);
        assert!(store.lookup(EntityKind::News, 1).is_none());
    }

    #[test]
    fn records_of_is_ordered_by_id() {
        let mut store = FixtureStore::new();
        for id in [5, 2, 9] {
            store.record(EntityKind::Comment, id, EntityRecord::new());
        }
        store.record(EntityKind::Tag, 3, EntityRecord::new());

        let ids: Vec<i64> = store
            .records_of(EntityKind::Comment)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut store = FixtureStore::new();
        store.record(EntityKind::Tag, 1, EntityRecord::new());
        store.reset();
        assert!(store.is_empty());
    }
}
