//! Pluggable similarity metric behind a small index interface.
//!
//! Clustering never touches the metric directly; it asks an index which
//! corpus entries sit at or above tolerance for a probe string. Tests swap
//! in a deterministic fake to pin down clustering behavior independent of
//! any real string metric.

/// Queries over a fixed corpus of identity strings. Entries are addressed
/// by corpus position, which callers map back to their own keys.
pub trait SimilarityIndex {
    /// Positions of every corpus entry whose similarity to `probe` is at or
    /// above the index tolerance. A probe equal to a corpus entry always
    /// matches that entry (similarity 1.0).
    fn matches(&self, probe: &str) -> Vec<usize>;
}

/// Default metric: normalized Levenshtein similarity, where 1.0 means
/// identical strings and 0.0 means unrelated.
pub struct EditDistanceIndex {
    entries: Vec<String>,
    tolerance: f64,
}

impl EditDistanceIndex {
    pub fn build(entries: Vec<String>, tolerance: f64) -> Self {
        Self { entries, tolerance }
    }
}

impl SimilarityIndex for EditDistanceIndex {
    fn matches(&self, probe: &str) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| strsim::normalized_levenshtein(probe, entry) >= self.tolerance)
            .map(|(i, _)| i)
            .collect()
    }
}
