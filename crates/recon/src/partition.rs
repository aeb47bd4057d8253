//! Exact `(state, zip)` partitioning of a channel's accumulated keys.

use std::collections::BTreeMap;

use crate::model::{Key, PartitionKey, Record};

/// Group keys by exact `(state, zip)`. A strict refinement: the union of all
/// partitions equals the input key set and partitions are pairwise disjoint.
/// Keys within a partition stay in sorted order (BTreeMap iteration).
pub fn partition(records: &BTreeMap<Key, Record>) -> BTreeMap<PartitionKey, Vec<Key>> {
    let mut partitions: BTreeMap<PartitionKey, Vec<Key>> = BTreeMap::new();
    for key in records.keys() {
        partitions
            .entry(PartitionKey::of(key))
            .or_default()
            .push(key.clone());
    }
    partitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn key(name: &str, state: &str, zip: &str) -> Key {
        Key::new(name, "1 Main St", "Somewhere", state, zip)
    }

    fn table(keys: &[Key]) -> BTreeMap<Key, Record> {
        keys.iter().map(|k| (k.clone(), Record::default())).collect()
    }

    #[test]
    fn groups_by_state_zip() {
        let keys = [
            key("A", "CA", "90401"),
            key("B", "CA", "90401"),
            key("C", "CA", "92231"),
            key("D", "NV", "90401"),
        ];
        let partitions = partition(&table(&keys));
        assert_eq!(partitions.len(), 3);
        assert_eq!(
            partitions[&PartitionKey { state: "CA".into(), zip: "90401".into() }].len(),
            2
        );
    }

    #[test]
    fn refinement_covers_all_keys_exactly_once() {
        let keys = [
            key("A", "CA", "90401"),
            key("B", "CA", "92231"),
            key("C", "OR", "97201"),
        ];
        let input = table(&keys);
        let partitions = partition(&input);

        let mut seen: Vec<Key> = partitions.into_values().flatten().collect();
        seen.sort();
        let mut expected: Vec<Key> = input.into_keys().collect();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn empty_input_yields_no_partitions() {
        assert!(partition(&BTreeMap::new()).is_empty());
    }
}
