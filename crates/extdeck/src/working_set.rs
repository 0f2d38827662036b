//! The in-memory, authoritative list of items.

use std::collections::HashSet;

use crate::error::SnapshotError;
use crate::identity::{IdentitySource, ItemId};
use crate::item::{Item, SeedRecord, StoredRecord};

/// Ordered items for the running session. Order is display order.
///
/// Mutated only by [`set_active`](Self::set_active), [`remove`](Self::remove)
/// and the bulk constructors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingSet {
    items: Vec<Item>,
}

impl WorkingSet {
    /// Adopts records read back from a snapshot.
    ///
    /// Records without a usable identity, or whose identity was already taken
    /// by an earlier record, get a fresh one. Returns the set and the number of
    /// identities that were assigned.
    pub fn from_stored(records: Vec<StoredRecord>, ids: &mut impl IdentitySource) -> (Self, usize) {
        // Stored identities are claimed first so a fresh one never steals one
        // that appears later in the list.
        let mut taken = HashSet::with_capacity(records.len());
        let keeps: Vec<bool> = records
            .iter()
            .map(|record| record.usable_id().is_some_and(|id| taken.insert(id.clone())))
            .collect();
        let mut assigned = 0;
        let items = records
            .into_iter()
            .zip(keeps)
            .map(|(record, keep)| {
                let id = match record.usable_id() {
                    Some(id) if keep => id.clone(),
                    _ => {
                        assigned += 1;
                        let id = fresh_id(ids, &taken);
                        taken.insert(id.clone());
                        id
                    }
                };
                Item::from_stored(record, id)
            })
            .collect();
        (Self { items }, assigned)
    }

    /// Adopts seed records, giving every one a fresh identity.
    pub fn from_seed(records: Vec<SeedRecord>, ids: &mut impl IdentitySource) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let items = records
            .into_iter()
            .map(|record| {
                let id = fresh_id(ids, &seen);
                seen.insert(id.clone());
                Item::from_seed(record, id)
            })
            .collect();
        Self { items }
    }

    /// Parses a serialized working set and adopts it.
    pub fn from_snapshot(snapshot: &str, ids: &mut impl IdentitySource) -> Result<(Self, usize), SnapshotError> {
        let records: Vec<StoredRecord> = serde_json::from_str(snapshot)?;
        Ok(Self::from_stored(records, ids))
    }

    pub fn to_snapshot(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(&self.items)?)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Sets the active flag of the item with `id`. Returns the previous flag,
    /// or `None` when no such item exists.
    pub fn set_active(&mut self, id: &ItemId, is_active: bool) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| &item.id == id)?;
        Some(std::mem::replace(&mut item.is_active, is_active))
    }

    /// Removes the item with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: &ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }
}

impl<'a> IntoIterator for &'a WorkingSet {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Item> for WorkingSet {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

fn fresh_id(ids: &mut impl IdentitySource, taken: &HashSet<ItemId>) -> ItemId {
    loop {
        let id = ids.next_id();
        if !id.is_empty() && !taken.contains(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::SequentialIds;

    fn sample() -> WorkingSet {
        WorkingSet::from_iter([
            Item::new("a", "A", "first", "a.svg").active(true),
            Item::new("b", "B", "second", "b.svg"),
            Item::new("c", "C", "third", "c.svg").active(true),
        ])
    }

    fn ids(set: &WorkingSet) -> Vec<&str> {
        set.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn snapshot_round_trip_preserves_fields_and_order() {
        let mut original = sample();
        original.items[1]
            .extra
            .insert("vendor".to_string(), serde_json::Value::from("acme"));
        let snapshot = original.to_snapshot().unwrap();
        let (reloaded, assigned) = WorkingSet::from_snapshot(&snapshot, &mut SequentialIds::new("n")).unwrap();
        assert_eq!(assigned, 0);
        assert_eq!(reloaded, original);
    }

    #[test]
    fn missing_and_duplicate_ids_are_assigned() {
        let records: Vec<StoredRecord> = serde_json::from_str(
            r#"[{"id":"a","name":"A"},{"name":"B"},{"id":"a","name":"C"},{"id":"","name":"D"}]"#,
        )
        .unwrap();
        let (set, assigned) = WorkingSet::from_stored(records, &mut SequentialIds::new("n"));
        assert_eq!(assigned, 3);
        assert_eq!(ids(&set), ["a", "n-1", "n-2", "n-3"]);
        assert_eq!(set.iter().map(|item| item.name.as_str()).collect::<Vec<_>>(), ["A", "B", "C", "D"]);
    }

    #[test]
    fn fresh_ids_skip_collisions_with_stored_ids() {
        let records: Vec<StoredRecord> =
            serde_json::from_str(r#"[{"id":"n-1","name":"A"},{"name":"B"}]"#).unwrap();
        let (set, _) = WorkingSet::from_stored(records, &mut SequentialIds::new("n"));
        assert_eq!(ids(&set), ["n-1", "n-2"]);

        let records: Vec<StoredRecord> =
            serde_json::from_str(r#"[{"name":"B"},{"id":"n-1","name":"A"}]"#).unwrap();
        let (set, assigned) = WorkingSet::from_stored(records, &mut SequentialIds::new("n"));
        assert_eq!(assigned, 1);
        assert_eq!(ids(&set), ["n-2", "n-1"]);
    }

    #[test]
    fn set_active_reports_previous_flag() {
        let mut set = sample();
        assert_eq!(set.set_active(&ItemId::from("b"), true), Some(false));
        assert_eq!(set.set_active(&ItemId::from("b"), true), Some(true));
        assert_eq!(set.set_active(&ItemId::from("zz"), true), None);
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut set = sample();
        let removed = set.remove(&ItemId::from("b")).unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(ids(&set), ["a", "c"]);
        assert!(set.remove(&ItemId::from("b")).is_none());
    }
}
