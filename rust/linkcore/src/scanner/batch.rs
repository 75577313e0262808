//! Batch scanning across many notes
//!
//! Equivalent to calling [`MentionScanner::scan`] once per note. The only
//! shared work is the automaton, which is built once for the whole batch.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use tracing::info;

use super::index::ConceptNameIndex;
use super::mention::{MentionAggregate, MentionScanner};
use crate::error::LinkCoreResult;

/// Performance statistics for a batch scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    pub notes_scanned: usize,
    pub notes_with_mentions: usize,
    pub total_mentions: usize,
    pub elapsed_us: u64,
}

/// Per-note aggregates for a whole batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchScanResult<K: Eq + Hash> {
    /// Every input note has an entry, possibly empty
    pub notes: HashMap<K, Vec<MentionAggregate>>,
    pub stats: BatchStats,
}

impl MentionScanner {
    /// Scan many notes with one automaton
    pub fn scan_many<K, T, I>(&self, notes: I) -> BatchScanResult<K>
    where
        K: Eq + Hash,
        T: AsRef<str>,
        I: IntoIterator<Item = (K, T)>,
    {
        let start = instant::Instant::now();
        let mut stats = BatchStats::default();
        let mut results: HashMap<K, Vec<MentionAggregate>> = HashMap::new();

        for (note_id, text) in notes {
            let aggregates = self.scan(text.as_ref());

            stats.notes_scanned += 1;
            if !aggregates.is_empty() {
                stats.notes_with_mentions += 1;
            }
            stats.total_mentions += aggregates.iter().map(|a| a.total_mentions).sum::<usize>();

            results.insert(note_id, aggregates);
        }

        stats.elapsed_us = start.elapsed().as_micros() as u64;
        info!(
            notes = stats.notes_scanned,
            with_mentions = stats.notes_with_mentions,
            mentions = stats.total_mentions,
            elapsed_us = stats.elapsed_us,
            "batch mention scan complete"
        );

        BatchScanResult {
            notes: results,
            stats,
        }
    }
}

/// One-shot batch scan: build the automaton once and scan every note
pub fn scan_many<K, T, I>(notes: I, concepts: &ConceptNameIndex) -> LinkCoreResult<BatchScanResult<K>>
where
    K: Eq + Hash,
    T: AsRef<str>,
    I: IntoIterator<Item = (K, T)>,
{
    Ok(MentionScanner::new(concepts)?.scan_many(notes))
}
