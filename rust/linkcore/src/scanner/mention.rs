//! MentionScanner: Concept Name Detection in Note Text
//!
//! Uses Aho-Corasick to find every occurrence of every concept name in one
//! pass, then keeps only whole-word occurrences and resolves overlaps with
//! longest-match precedence.
//!
//! # Resolution order
//! Candidates are ranked by matched length (longest first), then by the
//! concept's position in the [`ConceptNameIndex`], then by start offset.
//! A candidate is accepted unless it overlaps an already accepted span, so
//! "machine learning" consumes its span before "machine" is considered, and
//! "machine" still matches anywhere outside that span.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

use super::index::{ConceptId, ConceptNameIndex};
use super::text::{fold, FoldedText};
use crate::config::MentionConfig;
use crate::error::LinkCoreResult;

// =============================================================================
// Types
// =============================================================================

/// A single accepted occurrence of a concept name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionMatch {
    pub concept_id: ConceptId,
    /// Inclusive start, in characters of the original text
    pub start: usize,
    /// Exclusive end, in characters of the original text
    pub end: usize,
    /// Substring of the original text (original casing)
    pub matched_text: String,
}

impl MentionMatch {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Per-concept summary of the mentions in one note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionAggregate {
    pub concept_id: ConceptId,
    pub first_mention_position: usize,
    pub total_mentions: usize,
}

/// Metadata for each pattern in the automaton
#[derive(Debug, Clone)]
struct PatternMeta {
    concept_id: ConceptId,
    /// Position of the concept in the index (tiebreak)
    rank: usize,
}

/// Whole-word occurrence before overlap resolution
#[derive(Debug, Clone, Copy)]
struct Candidate {
    pattern: usize,
    start: usize,
    end: usize,
}

// =============================================================================
// MentionScanner
// =============================================================================

/// Concept mention matcher, built once per concept set and reused across notes
#[derive(Debug, Clone)]
pub struct MentionScanner {
    automaton: Option<AhoCorasick>,
    pattern_meta: Vec<PatternMeta>,
    concept_count: usize,
}

impl MentionScanner {
    /// Build a scanner with default settings
    pub fn new(concepts: &ConceptNameIndex) -> LinkCoreResult<Self> {
        Self::with_config(concepts, &MentionConfig::default())
    }

    /// Build a scanner, skipping blank names and names shorter than
    /// `config.min_name_chars`
    pub fn with_config(concepts: &ConceptNameIndex, config: &MentionConfig) -> LinkCoreResult<Self> {
        let mut patterns: Vec<String> = Vec::with_capacity(concepts.len());
        let mut pattern_meta: Vec<PatternMeta> = Vec::with_capacity(concepts.len());
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut skipped = 0usize;

        for (rank, entry) in concepts.iter().enumerate() {
            let name = entry.name.trim();
            if name.is_empty() || name.chars().count() < config.min_name_chars {
                skipped += 1;
                continue;
            }

            // Identical folded names share a pattern; the earlier concept owns it
            let folded = fold(name);
            if let Some(&owner) = seen.get(&folded) {
                debug!(
                    concept_id = %entry.id,
                    owner = %pattern_meta[owner].concept_id,
                    "duplicate concept name, earlier concept wins"
                );
                continue;
            }

            seen.insert(folded.clone(), patterns.len());
            patterns.push(folded);
            pattern_meta.push(PatternMeta {
                concept_id: entry.id,
                rank,
            });
        }

        let automaton = if patterns.is_empty() {
            None
        } else {
            Some(
                AhoCorasickBuilder::new()
                    .match_kind(MatchKind::Standard)
                    .build(&patterns)?,
            )
        };

        debug!(
            patterns = patterns.len(),
            skipped,
            "mention automaton built"
        );

        Ok(Self {
            automaton,
            pattern_meta,
            concept_count: concepts.len(),
        })
    }

    /// Number of patterns in the automaton
    pub fn pattern_count(&self) -> usize {
        self.pattern_meta.len()
    }

    /// Number of concepts the scanner was built from (including skipped ones)
    pub fn concept_count(&self) -> usize {
        self.concept_count
    }

    /// Find all accepted, non-overlapping mentions, sorted by start
    pub fn find_matches(&self, text: &str) -> Vec<MentionMatch> {
        let automaton = match &self.automaton {
            Some(a) => a,
            None => return vec![],
        };

        if text.is_empty() {
            return vec![];
        }

        let folded = FoldedText::new(text);
        let candidates = self.collect_candidates(automaton, &folded);
        let accepted = self.resolve_overlaps(candidates);

        accepted
            .into_iter()
            .map(|c| MentionMatch {
                concept_id: self.pattern_meta[c.pattern].concept_id,
                start: c.start,
                end: c.end,
                matched_text: folded.original_slice(c.start, c.end).to_string(),
            })
            .collect()
    }

    /// Scan one note and aggregate mentions per concept.
    /// Concepts without mentions are omitted; the result is ordered by
    /// first mention position.
    pub fn scan(&self, text: &str) -> Vec<MentionAggregate> {
        let matches = self.find_matches(text);
        let aggregates = aggregate(&matches);
        trace!(
            text_len = text.len(),
            matches = matches.len(),
            concepts = aggregates.len(),
            "note scanned"
        );
        aggregates
    }

    /// Quick check for at least one whole-word mention
    pub fn contains_mention(&self, text: &str) -> bool {
        let automaton = match &self.automaton {
            Some(a) => a,
            None => return false,
        };
        if text.is_empty() {
            return false;
        }

        let folded = FoldedText::new(text);
        !self.collect_candidates(automaton, &folded).is_empty()
    }

    /// Every whole-word occurrence of every pattern, overlaps included
    fn collect_candidates(&self, automaton: &AhoCorasick, text: &FoldedText<'_>) -> Vec<Candidate> {
        automaton
            .find_overlapping_iter(text.folded())
            .filter_map(|m| {
                let start = text.char_index(m.start());
                let end = text.char_index(m.end());
                if end > start && text.is_whole_word(start, end) {
                    Some(Candidate {
                        pattern: m.pattern().as_usize(),
                        start,
                        end,
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// Longest-match precedence with insertion-order and leftmost tiebreaks
    fn resolve_overlaps(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        if candidates.len() <= 1 {
            return candidates;
        }

        candidates.sort_by(|a, b| {
            (b.end - b.start)
                .cmp(&(a.end - a.start))
                .then_with(|| {
                    self.pattern_meta[a.pattern]
                        .rank
                        .cmp(&self.pattern_meta[b.pattern].rank)
                })
                .then_with(|| a.start.cmp(&b.start))
        });

        // Accepted spans keyed by start; spans are disjoint so ends ascend too
        let mut taken: BTreeMap<usize, usize> = BTreeMap::new();
        let mut accepted: Vec<Candidate> = Vec::new();

        for candidate in candidates {
            let overlaps = taken
                .range(..candidate.end)
                .next_back()
                .map_or(false, |(_, &end)| end > candidate.start);
            if !overlaps {
                taken.insert(candidate.start, candidate.end);
                accepted.push(candidate);
            }
        }

        accepted.sort_by_key(|c| c.start);
        accepted
    }
}

/// Group matches by concept, in order of first mention
pub fn aggregate(matches: &[MentionMatch]) -> Vec<MentionAggregate> {
    let mut slots: HashMap<ConceptId, usize> = HashMap::new();
    let mut aggregates: Vec<MentionAggregate> = Vec::new();

    for m in matches {
        match slots.get(&m.concept_id) {
            Some(&slot) => {
                let agg = &mut aggregates[slot];
                agg.total_mentions += 1;
                agg.first_mention_position = agg.first_mention_position.min(m.start);
            }
            None => {
                slots.insert(m.concept_id, aggregates.len());
                aggregates.push(MentionAggregate {
                    concept_id: m.concept_id,
                    first_mention_position: m.start,
                    total_mentions: 1,
                });
            }
        }
    }

    aggregates.sort_by_key(|a| a.first_mention_position);
    aggregates
}

/// One-shot scan: build a scanner for `concepts` and scan `text`
pub fn scan_mentions(text: &str, concepts: &ConceptNameIndex) -> LinkCoreResult<Vec<MentionAggregate>> {
    if text.is_empty() || concepts.is_empty() {
        return Ok(vec![]);
    }
    Ok(MentionScanner::new(concepts)?.scan(text))
}

// =============================================================================
// Tests
// =============================================================================
