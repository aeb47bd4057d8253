use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::normalize::normalize;

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// Top-level business partition. Each channel is reconciled end-to-end with
/// independent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    OnPremise,
    OffPremise,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::OnPremise, Channel::OffPremise];
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OnPremise => write!(f, "On-Premise"),
            Self::OffPremise => write!(f, "Off-Premise"),
        }
    }
}

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Immutable location identity. Equality and ordering are structural,
/// lexicographic over the five normalized fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key {
    pub customer_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Key {
    /// Build a key, normalizing every field. The only constructor, so raw
    /// text never reaches identity comparison.
    pub fn new(customer_name: &str, address: &str, city: &str, state: &str, zip: &str) -> Self {
        Self {
            customer_name: normalize(customer_name),
            address: normalize(address),
            city: normalize(city),
            state: normalize(state),
            zip: normalize(zip),
        }
    }

    /// The degenerate sentinel: all five fields empty. Removed right after
    /// accumulation, never present in final output.
    pub fn is_empty(&self) -> bool {
        self.customer_name.is_empty()
            && self.address.is_empty()
            && self.city.is_empty()
            && self.state.is_empty()
            && self.zip.is_empty()
    }

    /// Composite identity string used for fuzzy comparison within a
    /// partition. State and zip are excluded: they already match exactly.
    pub fn identity(&self) -> String {
        format!("{} | {} | {}", self.customer_name, self.address, self.city)
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Per-location attribute bag. Mutated only through [`Record::absorb`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub tdlinx_code: Option<String>,
    pub sold_to: Option<String>,
    pub license_number: Option<String>,
    pub channel: Option<String>,
    pub sub_channel: Option<String>,
    pub in_spectra: bool,
    pub in_gallo: bool,
    pub in_ww: bool,
}

impl Record {
    /// Fold another record's contribution into this one.
    ///
    /// Scalar fields: incoming overwrites only when non-empty; an existing
    /// value is never cleared. Provenance flags: once true, always true.
    /// Commutative, associative, and idempotent; contributions arrive from
    /// independently ordered sources and cluster members in no guaranteed
    /// order.
    pub fn absorb(&mut self, other: &Record) {
        prefer(&mut self.tdlinx_code, &other.tdlinx_code);
        prefer(&mut self.sold_to, &other.sold_to);
        prefer(&mut self.license_number, &other.license_number);
        prefer(&mut self.channel, &other.channel);
        prefer(&mut self.sub_channel, &other.sub_channel);
        self.in_spectra |= other.in_spectra;
        self.in_gallo |= other.in_gallo;
        self.in_ww |= other.in_ww;
    }
}

fn prefer(existing: &mut Option<String>, incoming: &Option<String>) {
    if let Some(value) = incoming {
        if !value.is_empty() {
            *existing = Some(value.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Contributions + partitions
// ---------------------------------------------------------------------------

/// One source row after loading: which channel it belongs to, the location
/// it identifies, and the attributes it brings.
#[derive(Debug, Clone)]
pub struct Contribution {
    pub channel: Channel,
    pub key: Key,
    pub record: Record,
}

/// Exact-match grouping key. State and zip are low-noise, bounded-cardinality
/// codes; constraining fuzzy search to one partition bounds pairwise cost.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionKey {
    pub state: String,
    pub zip: String,
}

impl PartitionKey {
    pub fn of(key: &Key) -> Self {
        Self {
            state: key.state.clone(),
            zip: key.zip.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Clusters + ledger
// ---------------------------------------------------------------------------

/// Canonical key → every key in its cluster (itself included).
pub type ClusterMap = BTreeMap<Key, BTreeSet<Key>>;

/// Canonical key → member key → unmerged record. Audit trail only; an
/// absent canonical key means its cluster had no duplicates.
pub type DupeLedger = BTreeMap<Key, BTreeMap<Key, Record>>;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ChannelSummary {
    pub channel: Channel,
    pub input_keys: usize,
    pub partitions: usize,
    pub clusters: usize,
    pub duplicates: usize,
}

#[derive(Debug)]
pub struct ChannelResult {
    pub channel: Channel,
    pub records: BTreeMap<Key, Record>,
    pub dupes: DupeLedger,
    pub summary: ChannelSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub tolerance: f64,
}

#[derive(Debug)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub channels: Vec<ChannelResult>,
}

/// Serializable digest of a run, for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub meta: ReconMeta,
    pub channels: Vec<ChannelSummary>,
}

impl ReconResult {
    pub fn report(&self) -> RunReport {
        RunReport {
            meta: self.meta.clone(),
            channels: self.channels.iter().map(|c| c.summary.clone()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
