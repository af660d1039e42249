//! Per-draft registry of accepted fingerprints.

use super::compare::are_similar;
use super::fingerprint::Fingerprint;

/// Index of the first entry in `existing` within `threshold` of `candidate`.
///
/// Scans in insertion order and stops at the first hit, so results are stable
/// for a given registry even when several entries would match.
pub fn find_duplicate(
    candidate: &Fingerprint,
    existing: &[Fingerprint],
    threshold: u32,
) -> Option<usize> {
    existing
        .iter()
        .position(|entry| are_similar(candidate, entry, threshold))
}

/// Ordered, append-only collection of fingerprints accepted in one draft.
///
/// Insertion order is upload order. Only [`DuplicateRegistry::clear`] removes
/// entries, when the draft is submitted or abandoned.
#[derive(Debug, Clone, Default)]
pub struct DuplicateRegistry {
    entries: Vec<Fingerprint>,
}

impl DuplicateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// First registered fingerprint similar to `candidate`.
    pub fn find(&self, candidate: &Fingerprint, threshold: u32) -> Option<usize> {
        find_duplicate(candidate, &self.entries, threshold)
    }

    pub fn push(&mut self, fingerprint: Fingerprint) {
        self.entries.push(fingerprint);
    }

    pub fn extend<I: IntoIterator<Item = Fingerprint>>(&mut self, fingerprints: I) {
        self.entries.extend(fingerprints);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[Fingerprint] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
