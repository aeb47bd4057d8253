//! Per-channel accumulation of source contributions.

use std::collections::BTreeMap;

use crate::model::{Channel, Contribution, Key, Record};

/// Owns one `Key -> Record` table per channel and folds every contribution
/// into the existing record via the merge rule. Replaces any notion of
/// process-wide state: one accumulator per run.
#[derive(Debug, Default)]
pub struct Accumulator {
    on_premise: BTreeMap<Key, Record>,
    off_premise: BTreeMap<Key, Record>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contribute(&mut self, contribution: &Contribution) {
        self.table_mut(contribution.channel)
            .entry(contribution.key.clone())
            .or_default()
            .absorb(&contribution.record);
    }

    /// Drop the degenerate all-empty key from both channels. The one
    /// expected, deliberately tolerated input anomaly.
    pub fn remove_empty(&mut self) {
        let empty = Key::new("", "", "", "", "");
        self.on_premise.remove(&empty);
        self.off_premise.remove(&empty);
    }

    pub fn table(&self, channel: Channel) -> &BTreeMap<Key, Record> {
        match channel {
            Channel::OnPremise => &self.on_premise,
            Channel::OffPremise => &self.off_premise,
        }
    }

    /// Hand the channel's table to the partitioner, leaving the slot empty.
    pub fn take(&mut self, channel: Channel) -> BTreeMap<Key, Record> {
        std::mem::take(self.table_mut(channel))
    }

    fn table_mut(&mut self, channel: Channel) -> &mut BTreeMap<Key, Record> {
        match channel {
            Channel::OnPremise => &mut self.on_premise,
            Channel::OffPremise => &mut self.off_premise,
        }
    }
}
