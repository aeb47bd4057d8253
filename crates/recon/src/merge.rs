//! Fold cluster members into canonical records and keep the audit trail.

use std::collections::BTreeMap;

use crate::model::{ClusterMap, DupeLedger, Key, Record};

/// For each cluster, fold every member's record into a fresh record for the
/// canonical key. Non-singleton clusters additionally deposit every member's
/// unmerged `(Key, Record)` pair into the dupe ledger under the canonical
/// key. Every input key ends up in exactly one canonical record; it appears
/// in the ledger iff its cluster had more than one member.
pub fn merge_clusters(
    records: &BTreeMap<Key, Record>,
    clusters: &ClusterMap,
) -> (BTreeMap<Key, Record>, DupeLedger) {
    let mut canonical_records: BTreeMap<Key, Record> = BTreeMap::new();
    let mut ledger = DupeLedger::new();

    for (canonical, members) in clusters {
        let mut merged = Record::default();
        // BTreeSet iteration: deterministic member order. Order does not
        // change the result (the merge rule is associative) but it keeps
        // runs reproducible byte for byte.
        for member in members {
            if let Some(record) = records.get(member) {
                merged.absorb(record);
            }
        }
        canonical_records.insert(canonical.clone(), merged);

        if members.len() > 1 {
            let entry = ledger.entry(canonical.clone()).or_default();
            for member in members {
                if let Some(record) = records.get(member) {
                    entry.insert(member.clone(), record.clone());
                }
            }
        }
    }

    (canonical_records, ledger)
}
