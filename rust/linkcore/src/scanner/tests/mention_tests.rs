use crate::scanner::batch::scan_many;
use crate::scanner::index::{ConceptId, ConceptNameIndex};
use crate::scanner::mention::{scan_mentions, MentionAggregate, MentionScanner};

fn index(concepts: &[(i64, &str)]) -> ConceptNameIndex {
    concepts.iter().map(|&(id, name)| (id, name)).collect()
}

fn scan(text: &str, concepts: &[(i64, &str)]) -> Vec<MentionAggregate> {
    scan_mentions(text, &index(concepts)).unwrap()
}

fn find(result: &[MentionAggregate], id: i64) -> Option<&MentionAggregate> {
    result.iter().find(|a| a.concept_id == ConceptId(id))
}

// ============================================================================
// Longest-match precedence
// ============================================================================

#[test]
fn test_longest_match_wins() {
    let result = scan(
        "Machine learning is a field of study.",
        &[(1, "machine"), (2, "machine learning")],
    );

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].concept_id, ConceptId(2));
    assert_eq!(result[0].total_mentions, 1);
    assert_eq!(result[0].first_mention_position, 0);
    assert!(find(&result, 1).is_none());
}

#[test]
fn test_longest_match_independent_of_insertion_order() {
    let a = scan("Machine learning rocks", &[(1, "machine"), (2, "machine learning")]);
    let b = scan("Machine learning rocks", &[(2, "machine learning"), (1, "machine")]);
    assert_eq!(a, b);
}

#[test]
fn test_shorter_names_rematch_outside_consumed_span() {
    let result = scan(
        "A neural network is used for this. A network can be neural.",
        &[(1, "neural"), (2, "neural network"), (3, "network")],
    );

    assert_eq!(result.len(), 3);
    for id in [1, 2, 3] {
        assert_eq!(find(&result, id).unwrap().total_mentions, 1, "concept {}", id);
    }
    assert_eq!(find(&result, 2).unwrap().first_mention_position, 2);
    assert_eq!(find(&result, 3).unwrap().first_mention_position, 37);
}

#[test]
fn test_matches_never_overlap() {
    let scanner = MentionScanner::new(&index(&[
        (1, "new"),
        (2, "new york"),
        (3, "york city"),
        (4, "city"),
    ]))
    .unwrap();

    let matches = scanner.find_matches("new york city and new city");
    for pair in matches.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }
    // "york city" is the longest candidate, so it takes "york" from "new york"
    let ids: Vec<i64> = matches.iter().map(|m| m.concept_id.0).collect();
    assert_eq!(ids, vec![1, 3, 1, 4]);
}

// ============================================================================
// Whole-word boundaries
// ============================================================================

#[test]
fn test_whole_word_only() {
    let result = scan(
        "Machine learning is different from elearning or relearning.",
        &[(1, "learning")],
    );

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].total_mentions, 1);
    assert_eq!(result[0].first_mention_position, 8);
}

#[test]
fn test_digits_and_underscore_are_word_chars() {
    assert!(scan("web2 and web_app", &[(1, "web")]).is_empty());
}

#[test]
fn test_punctuation_is_a_boundary() {
    let result = scan("(Ontology), ontology. \"ONTOLOGY\"", &[(1, "ontology")]);
    assert_eq!(result[0].total_mentions, 3);
}

// ============================================================================
// Case-insensitivity and literal names
// ============================================================================

#[test]
fn test_case_insensitive() {
    let result = scan(
        "Neural Network, neural network and NEURAL NETWORK.",
        &[(1, "neural network")],
    );
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].total_mentions, 3);
}

#[test]
fn test_stored_casing_irrelevant() {
    let result = scan("the ontology editor", &[(1, "ONTOLOGY Editor")]);
    assert_eq!(result[0].total_mentions, 1);
    assert_eq!(result[0].first_mention_position, 4);
}

#[test]
fn test_special_characters_match_literally() {
    let result = scan("C++ is a language. I love C++ development.", &[(1, "C++")]);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].total_mentions, 2);
}

#[test]
fn test_metacharacters_are_not_wildcards() {
    assert!(scan("version 1x0 released", &[(1, "1.0")]).is_empty());
    assert!(scan("aaa", &[(1, "a*")]).is_empty());
    assert_eq!(scan("node.js and .NET", &[(1, "node.js")])[0].total_mentions, 1);
}

// ============================================================================
// Empty input
// ============================================================================

#[test]
fn test_empty_text() {
    assert!(scan("", &[(1, "anything")]).is_empty());
}

#[test]
fn test_empty_concepts() {
    assert!(scan("Some text with words", &[]).is_empty());
}

#[test]
fn test_blank_concept_names_never_match() {
    assert!(scan("   lots   of   spaces   ", &[(1, " "), (2, "")]).is_empty());
}

#[test]
fn test_zero_match_concepts_omitted() {
    let result = scan("Only Frodo here", &[(1, "Frodo"), (2, "Sam")]);
    assert_eq!(result.len(), 1);
    assert!(find(&result, 2).is_none());
}

// ============================================================================
// Counting property
// ============================================================================

#[test]
fn test_total_never_exceeds_literal_occurrences() {
    let concepts = [(1, "data"), (2, "data science"), (3, "science")];
    let text = "Data science uses data. Science! data science, science data.";
    let result = scan(text, &concepts);

    let total: usize = result.iter().map(|a| a.total_mentions).sum();
    let literal: usize = concepts
        .iter()
        .map(|&(_, name)| scan(text, &[(99, name)])[0].total_mentions)
        .sum();
    assert!(total <= literal);
    assert_eq!(find(&result, 2).unwrap().total_mentions, 2);
    assert_eq!(find(&result, 1).unwrap().total_mentions, 2);
    assert_eq!(find(&result, 3).unwrap().total_mentions, 2);
}

#[test]
fn test_batch_equals_individual_scans() {
    let concepts = index(&[(1, "graph"), (2, "knowledge graph"), (3, "ontology")]);
    let notes = vec![
        ("n1", "A knowledge graph is a graph."),
        ("n2", "Ontology first."),
        ("n3", ""),
    ];
    let batch = scan_many(notes.clone(), &concepts).unwrap();
    let scanner = MentionScanner::new(&concepts).unwrap();

    for (id, text) in notes {
        assert_eq!(batch.notes[id], scanner.scan(text));
    }
}

// ============================================================================
// Thread safety
// ============================================================================

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_scanners_are_send_sync() {
    assert_send_sync::<MentionScanner>();
    assert_send_sync::<crate::scanner::wikilink::WikiLinkParser>();
    assert_send_sync::<ConceptNameIndex>();
}

#[test]
fn test_shared_scanner_across_threads() {
    let scanner = MentionScanner::new(&index(&[(1, "rust"), (2, "rust compiler")])).unwrap();
    let texts = ["Rust is fast", "The Rust compiler is strict", "no mention here"];

    let results: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = texts
            .iter()
            .map(|text| {
                let scanner = &scanner;
                s.spawn(move || scanner.scan(text).len())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, vec![1, 1, 0]);
}
