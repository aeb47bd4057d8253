//! Similarity clustering within one `(state, zip)` partition.
//!
//! Pairwise similarity is not transitive, so the pairwise relation has to be
//! resolved into disjoint clusters by some discipline. This module uses
//! connected components over the similarity graph: deterministic for any
//! input ordering, unlike greedy first-match assignment which depends on
//! enumeration order. The canonical key of a cluster is its smallest member
//! in Key order.

use std::collections::BTreeSet;

use crate::model::{ClusterMap, Key};
use crate::similarity::{EditDistanceIndex, SimilarityIndex};

/// Cluster a partition's keys with the default edit-distance index.
pub fn cluster_keys(keys: &[Key], tolerance: f64) -> ClusterMap {
    if keys.len() <= 1 {
        // Zero comparisons for a singleton partition.
        return keys
            .iter()
            .map(|k| (k.clone(), BTreeSet::from([k.clone()])))
            .collect();
    }
    let identities: Vec<String> = keys.iter().map(Key::identity).collect();
    let index = EditDistanceIndex::build(identities.clone(), tolerance);
    cluster_with_index(keys, &identities, &index)
}

/// Cluster keys given their pre-built identity strings and an index over
/// them. `identities[i]` must be the identity of `keys[i]`.
pub fn cluster_with_index(
    keys: &[Key],
    identities: &[String],
    index: &dyn SimilarityIndex,
) -> ClusterMap {
    debug_assert_eq!(keys.len(), identities.len());

    let mut dsu = DisjointSet::new(keys.len());
    for (i, identity) in identities.iter().enumerate() {
        for j in index.matches(identity) {
            dsu.union(i, j);
        }
    }

    // Canonical member = minimum key in the component.
    let mut canonicals: Vec<Option<usize>> = vec![None; keys.len()];
    for i in 0..keys.len() {
        let root = dsu.find(i);
        match canonicals[root] {
            Some(c) if keys[c] <= keys[i] => {}
            _ => canonicals[root] = Some(i),
        }
    }

    let mut clusters = ClusterMap::new();
    for i in 0..keys.len() {
        let root = dsu.find(i);
        let canonical = canonicals[root].unwrap_or(i);
        clusters
            .entry(keys[canonical].clone())
            .or_default()
            .insert(keys[i].clone());
    }
    clusters
}

/// Union-find with path halving; no ranks, components here are tiny.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            // Attach the larger root under the smaller so roots stay stable
            // under reordering of union calls.
            if ra < rb {
                self.parent[rb] = ra;
            } else {
                self.parent[ra] = rb;
            }
        }
    }
}
