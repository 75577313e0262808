//! ConceptNameIndex: ordered concept id -> name mapping
//!
//! Built by the caller from the active ontology. Insertion order is the
//! tiebreak for equal-length matches, so it is preserved exactly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Types
// =============================================================================

/// Opaque concept identifier supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(pub i64);

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ConceptId {
    fn from(id: i64) -> Self {
        ConceptId(id)
    }
}

impl From<i32> for ConceptId {
    fn from(id: i32) -> Self {
        ConceptId(i64::from(id))
    }
}

/// Concept entry for hydration from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptEntry {
    pub id: ConceptId,
    pub name: String,
}

// =============================================================================
// ConceptNameIndex
// =============================================================================

/// Ordered mapping from concept id to display name
#[derive(Debug, Clone, Default)]
pub struct ConceptNameIndex {
    entries: Vec<ConceptEntry>,
    positions: HashMap<ConceptId, usize>,
}

impl ConceptNameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a concept. Re-inserting an existing id replaces its name but
    /// keeps its original position.
    pub fn insert(&mut self, id: impl Into<ConceptId>, name: impl Into<String>) {
        let id = id.into();
        let name = name.into();
        match self.positions.get(&id) {
            Some(&pos) => self.entries[pos].name = name,
            None => {
                self.positions.insert(id, self.entries.len());
                self.entries.push(ConceptEntry { id, name });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: ConceptId) -> Option<&str> {
        self.positions
            .get(&id)
            .map(|&pos| self.entries[pos].name.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ConceptEntry> {
        self.entries.iter()
    }
}

impl<I, S> FromIterator<(I, S)> for ConceptNameIndex
where
    I: Into<ConceptId>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (I, S)>>(iter: T) -> Self {
        let mut index = ConceptNameIndex::new();
        for (id, name) in iter {
            index.insert(id, name);
        }
        index
    }
}

impl FromIterator<ConceptEntry> for ConceptNameIndex {
    fn from_iter<T: IntoIterator<Item = ConceptEntry>>(iter: T) -> Self {
        iter.into_iter().map(|e| (e.id, e.name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let index: ConceptNameIndex = vec![(3, "gamma"), (1, "alpha"), (2, "beta")]
            .into_iter()
            .collect();

        let ids: Vec<i64> = index.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_reinsert_replaces_name_in_place() {
        let mut index = ConceptNameIndex::new();
        index.insert(1, "Old");
        index.insert(2, "Other");
        index.insert(1, "New");

        assert_eq!(index.len(), 2);
        assert_eq!(index.get(ConceptId(1)), Some("New"));
        assert_eq!(index.iter().next().unwrap().name, "New");
    }

    #[test]
    fn test_empty() {
        let index = ConceptNameIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.get(ConceptId(7)), None);
    }

    #[test]
    fn test_entries_from_json() {
        let entries: Vec<ConceptEntry> =
            serde_json::from_str(r#"[{"id": 10, "name": "Person"}, {"id": 11, "name": "Place"}]"#)
                .unwrap();
        let index: ConceptNameIndex = entries.into_iter().collect();
        assert_eq!(index.get(ConceptId(11)), Some("Place"));
    }
}
