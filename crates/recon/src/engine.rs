//! Pipeline driver: accumulate, drop the degenerate key, partition,
//! cluster, merge. Runs once per channel with independent state.

use crate::accumulate::Accumulator;
use crate::cluster::cluster_keys;
use crate::config::ReconConfig;
use crate::merge::merge_clusters;
use crate::model::{
    Channel, ChannelResult, ChannelSummary, ClusterMap, Contribution, ReconMeta, ReconResult,
};
use crate::partition::partition;

/// Pre-loaded contributions from every source, both channels mixed.
pub struct ReconInput {
    pub contributions: Vec<Contribution>,
}

/// Run one full reconciliation pass. Deterministic given the same input
/// set; contribution order never changes the result (merge rule is
/// associative and commutative, clustering is order-independent).
pub fn run(config: &ReconConfig, input: &ReconInput) -> ReconResult {
    let tolerance = config.tolerance.similarity;

    let mut accumulator = Accumulator::new();
    for contribution in &input.contributions {
        accumulator.contribute(contribution);
    }
    accumulator.remove_empty();

    let mut channels = Vec::with_capacity(Channel::ALL.len());
    for channel in Channel::ALL {
        let records = accumulator.take(channel);
        let partitions = partition(&records);

        let mut clusters = ClusterMap::new();
        for keys in partitions.values() {
            clusters.append(&mut cluster_keys(keys, tolerance));
        }

        let (canonical_records, dupes) = merge_clusters(&records, &clusters);

        let summary = ChannelSummary {
            channel,
            input_keys: records.len(),
            partitions: partitions.len(),
            clusters: canonical_records.len(),
            duplicates: dupes.values().map(|members| members.len()).sum(),
        };

        channels.push(ChannelResult {
            channel,
            records: canonical_records,
            dupes,
            summary,
        });
    }

    ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            tolerance,
        },
        channels,
    }
}
