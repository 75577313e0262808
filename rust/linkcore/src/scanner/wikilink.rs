//! WikiLinkParser - Author-written `[[Concept]]` / `[[Concept|Display]]` links
//!
//! The inner content of a link is everything up to the first `]]` on the same
//! line; a single embedded `]` stays part of the content. The first `|` splits
//! concept name from display text. A link whose name is blank is parsed and
//! then dropped from every result.
//!
//! All offsets are char offsets into the original text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::text::{collapse_whitespace, CharCursor};
use crate::config::WikiLinkConfig;

/// Ellipsis marking a truncated snippet edge
const ELLIPSIS: &str = "...";

// ==================== TYPE DEFINITIONS ====================

/// One parsed wiki-link occurrence
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WikiLink {
    /// Concept name, trimmed
    pub concept_name: String,
    /// Display text after `|`, trimmed; absent when missing or blank
    pub display_text: Option<String>,
    /// Char offset of the opening `[[`
    pub start: usize,
    /// Full match including brackets
    pub matched_text: String,
    /// Whitespace-collapsed excerpt around the link
    pub context: String,
}

impl WikiLink {
    /// Text a reader sees: display text if present, else the concept name
    pub fn label(&self) -> &str {
        self.display_text.as_deref().unwrap_or(&self.concept_name)
    }

    /// Char offset just past the closing `]]`
    pub fn end(&self) -> usize {
        self.start + self.matched_text.chars().count()
    }
}

/// Raw link span in byte offsets, before snippet generation
struct RawLink<'t> {
    byte_start: usize,
    byte_end: usize,
    matched: &'t str,
    name: &'t str,
    display: Option<&'t str>,
}

// ==================== MAIN IMPLEMENTATION ====================

/// Wiki-link parser with a precompiled link pattern
#[derive(Debug, Clone)]
pub struct WikiLinkParser {
    link_re: Regex,
    context_chars: usize,
}

impl WikiLinkParser {
    pub fn new() -> Self {
        Self::with_config(&WikiLinkConfig::default())
    }

    pub fn with_config(config: &WikiLinkConfig) -> Self {
        // Group 1: everything up to the first `]]` (lazy, single line)
        let link_re = Regex::new(r"\[\[(.*?)\]\]").expect("wiki-link pattern is valid");
        Self {
            link_re,
            context_chars: config.context_chars,
        }
    }

    /// Every non-blank link span, left to right
    fn raw_links<'a>(&'a self, text: &'a str) -> impl Iterator<Item = RawLink<'a>> + 'a {
        self.link_re.captures_iter(text).filter_map(|cap| {
            let full = cap.get(0)?;
            let inner = cap.get(1)?.as_str();

            let (name, display) = match inner.split_once('|') {
                Some((name, display)) => (name.trim(), Some(display.trim())),
                None => (inner.trim(), None),
            };
            if name.is_empty() {
                return None;
            }

            Some(RawLink {
                byte_start: full.start(),
                byte_end: full.end(),
                matched: full.as_str(),
                name,
                display: display.filter(|d| !d.is_empty()),
            })
        })
    }

    /// Distinct concept names in order of first appearance
    pub fn extract_concept_names(&self, text: &str) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.raw_links(text)
            .filter(|link| seen.insert(link.name))
            .map(|link| link.name.to_string())
            .collect()
    }

    /// Every link with its context snippet
    pub fn extract_links_with_context(&self, text: &str) -> Vec<WikiLink> {
        self.collect_links(text, true)
    }

    /// Every link without computing snippets (`context` is empty)
    pub fn extract_links(&self, text: &str) -> Vec<WikiLink> {
        self.collect_links(text, false)
    }

    /// Number of link occurrences, duplicates included
    pub fn count_links(&self, text: &str) -> usize {
        self.raw_links(text).count()
    }

    pub fn contains_links(&self, text: &str) -> bool {
        text.contains("[[") && self.raw_links(text).next().is_some()
    }

    /// Replace each link with `renderer(link)`. Matching runs once over the
    /// original text; everything outside links, including blank-name spans,
    /// is copied verbatim.
    pub fn replace_links<F>(&self, text: &str, renderer: F) -> String
    where
        F: FnMut(&WikiLink) -> String,
    {
        self.rewrite_links(text, true, renderer)
    }

    /// Like `replace_links`, but the renderer sees links with an empty
    /// `context`. Used for HTML output, which never reads the snippet.
    pub fn render_links<F>(&self, text: &str, renderer: F) -> String
    where
        F: FnMut(&WikiLink) -> String,
    {
        self.rewrite_links(text, false, renderer)
    }

    fn rewrite_links<F>(&self, text: &str, with_context: bool, mut renderer: F) -> String
    where
        F: FnMut(&WikiLink) -> String,
    {
        let mut out = String::with_capacity(text.len());
        let mut cursor = CharCursor::new(text);
        let mut last = 0usize;

        for raw in self.raw_links(text) {
            let start = cursor.advance_to(raw.byte_start);
            let link = self.build_link(text, &raw, start, with_context);
            out.push_str(&text[last..raw.byte_start]);
            out.push_str(&renderer(&link));
            last = raw.byte_end;
        }

        out.push_str(&text[last..]);
        out
    }

    fn collect_links(&self, text: &str, with_context: bool) -> Vec<WikiLink> {
        let mut cursor = CharCursor::new(text);
        self.raw_links(text)
            .map(|raw| {
                let start = cursor.advance_to(raw.byte_start);
                self.build_link(text, &raw, start, with_context)
            })
            .collect()
    }

    fn build_link(&self, text: &str, raw: &RawLink<'_>, start: usize, with_context: bool) -> WikiLink {
        let context = if with_context {
            self.context_snippet(text, raw.byte_start, raw.byte_end)
        } else {
            String::new()
        };

        WikiLink {
            concept_name: raw.name.to_string(),
            display_text: raw.display.map(str::to_string),
            start,
            matched_text: raw.matched.to_string(),
            context,
        }
    }

    /// Window of `context_chars` characters on each side of the link,
    /// whitespace-collapsed, with `...` only on truncated edges
    fn context_snippet(&self, text: &str, byte_start: usize, byte_end: usize) -> String {
        let before = &text[..byte_start];
        let after = &text[byte_end..];

        let window_start = before
            .char_indices()
            .rev()
            .nth(self.context_chars.saturating_sub(1))
            .map(|(i, _)| i);
        let window_start = match (self.context_chars, window_start) {
            (0, _) => byte_start,
            (_, Some(i)) => i,
            (_, None) => 0,
        };

        let window_end = match after.char_indices().nth(self.context_chars) {
            Some((i, _)) => byte_end + i,
            None => text.len(),
        };

        let mut snippet = String::new();
        if window_start > 0 {
            snippet.push_str(ELLIPSIS);
        }
        snippet.push_str(&collapse_whitespace(&text[window_start..window_end]));
        if window_end < text.len() {
            snippet.push_str(ELLIPSIS);
        }
        snippet
    }
}

impl Default for WikiLinkParser {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wikilink_simple() {
        let parser = WikiLinkParser::new();
        let links = parser.extract_links("Visit [[Rivendell]] today");

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].concept_name, "Rivendell");
        assert_eq!(links[0].display_text, None);
        assert_eq!(links[0].start, 6);
        assert_eq!(links[0].end(), 19);
    }

    #[test]
    fn test_wikilink_with_label() {
        let parser = WikiLinkParser::new();
        let links = parser.extract_links("Visit [[Rivendell|The Last Homely House]]");

        assert_eq!(links[0].concept_name, "Rivendell");
        assert_eq!(links[0].display_text.as_deref(), Some("The Last Homely House"));
        assert_eq!(links[0].label(), "The Last Homely House");
    }

    #[test]
    fn test_name_and_display_trimmed() {
        let parser = WikiLinkParser::new();
        let links = parser.extract_links("[[  Person  |  John  ]]");
        assert_eq!(links[0].concept_name, "Person");
        assert_eq!(links[0].display_text.as_deref(), Some("John"));
    }

    #[test]
    fn test_blank_display_is_absent() {
        let parser = WikiLinkParser::new();
        let links = parser.extract_links("[[Person|  ]]");
        assert_eq!(links[0].display_text, None);
        assert_eq!(links[0].label(), "Person");
    }

    #[test]
    fn test_single_embedded_bracket_kept() {
        let parser = WikiLinkParser::new();
        let links = parser.extract_links("[[Array]Type]] here");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].concept_name, "Array]Type");
        assert_eq!(links[0].matched_text, "[[Array]Type]]");
    }

    #[test]
    fn test_links_do_not_span_lines() {
        let parser = WikiLinkParser::new();
        assert_eq!(parser.count_links("[[Broken\nLink]]"), 0);
    }

    #[test]
    fn test_unclosed_link_ignored() {
        let parser = WikiLinkParser::new();
        assert!(!parser.contains_links("[[Never closed"));
        assert!(parser.extract_concept_names("[[Never closed").is_empty());
    }

    #[test]
    fn test_start_offsets_in_chars() {
        let parser = WikiLinkParser::new();
        let links = parser.extract_links("Ärger — [[Zorn]]");
        assert_eq!(links[0].start, 8);
    }

    #[test]
    fn test_blank_name_not_counted() {
        let parser = WikiLinkParser::new();
        assert_eq!(parser.count_links("[[]] and [[  |x]] and [[Real]]"), 1);
        assert!(!parser.contains_links("[[]]"));
    }

    #[test]
    fn test_context_window_width() {
        let parser = WikiLinkParser::with_config(&WikiLinkConfig::default().with_context_chars(5));
        let links = parser.extract_links_with_context("0123456789 [[Link]] 0123456789");
        assert_eq!(links[0].context, "...6789 [[Link]] 0123...");
    }

    #[test]
    fn test_zero_context_window() {
        let parser = WikiLinkParser::with_config(&WikiLinkConfig::default().with_context_chars(0));
        let links = parser.extract_links_with_context("a [[Link]] b");
        assert_eq!(links[0].context, "...[[Link]]...");

        let links = parser.extract_links_with_context("[[Link]]");
        assert_eq!(links[0].context, "[[Link]]");
    }

    #[test]
    fn test_replace_receives_links_in_order() {
        let parser = WikiLinkParser::new();
        let mut seen = Vec::new();
        let out = parser.replace_links("[[A]] then [[B|bee]]", |link| {
            seen.push(link.start);
            link.label().to_uppercase()
        });
        assert_eq!(out, "A then BEE");
        assert_eq!(seen, vec![0, 11]);
    }

    #[test]
    fn test_replace_carries_context_render_does_not() {
        let parser = WikiLinkParser::new();
        let text = "before [[A]] after";

        let mut contexts = Vec::new();
        parser.replace_links(text, |link| {
            contexts.push(link.context.clone());
            String::new()
        });
        assert_eq!(contexts, vec![text.to_string()]);

        let out = parser.render_links(text, |link| {
            assert!(link.context.is_empty());
            assert_eq!(link.start, 7);
            link.label().to_string()
        });
        assert_eq!(out, "before A after");
    }
}
