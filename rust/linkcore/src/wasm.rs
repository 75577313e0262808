//! JavaScript bindings
//!
//! # Usage (JavaScript)
//! ```javascript,ignore
//! import init, { ConceptScanner, extractLinksWithContext } from 'linkcore';
//!
//! await init();
//! const scanner = new ConceptScanner();
//! scanner.hydrateConcepts([{ id: 1, name: 'Machine Learning' }]);
//! const mentions = scanner.scan(noteText);
//! const links = extractLinksWithContext(noteText);
//! ```

use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::config::{LinkCoreConfig, WikiLinkConfig, DEFAULT_URL_TEMPLATE};
use crate::error::LinkCoreError;
use crate::scanner::{
    convert_links_to_html, convert_links_to_html_with, escape_concept_name, is_valid_concept_name,
    ConceptEntry, ConceptNameIndex, MentionScanner, WikiLinkParser,
};

/// Maps become plain objects so `result.notes[noteId]` works in JS
fn serialize<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serialize(value)
        .map_err(|e| JsValue::from_str(&LinkCoreError::Serialization(e.to_string()).to_string()))
}

fn error_to_js(e: LinkCoreError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serialize for JS, logging instead of throwing
fn to_js_or_null<T: Serialize>(value: &T, context: &str) -> JsValue {
    match serialize(value) {
        Ok(v) => v,
        Err(e) => {
            web_sys::console::error_1(&format!("[{}] Serialization failed: {:?}", context, e).into());
            JsValue::NULL
        }
    }
}

// ==================== ConceptScanner ====================

/// Mention scanner bound to one ontology's concept set
#[wasm_bindgen]
pub struct ConceptScanner {
    scanner: MentionScanner,
    parser: WikiLinkParser,
    config: LinkCoreConfig,
}

#[wasm_bindgen]
impl ConceptScanner {
    /// Create a scanner with optional configuration (null/undefined for defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ConceptScanner, JsValue> {
        let config: LinkCoreConfig = if config.is_null() || config.is_undefined() {
            LinkCoreConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        config.validate().map_err(error_to_js)?;

        let scanner = MentionScanner::with_config(&ConceptNameIndex::new(), &config.mention)
            .map_err(error_to_js)?;

        Ok(Self {
            scanner,
            parser: WikiLinkParser::with_config(&config.wikilink),
            config,
        })
    }

    /// Replace the concept set: `[{ id, name }, ...]` in tiebreak order
    #[wasm_bindgen(js_name = hydrateConcepts)]
    pub fn hydrate_concepts(&mut self, concepts: JsValue) -> Result<(), JsValue> {
        let entries: Vec<ConceptEntry> = serde_wasm_bindgen::from_value(concepts)
            .map_err(|e| JsValue::from_str(&format!("Invalid concepts: {}", e)))?;
        let index: ConceptNameIndex = entries.into_iter().collect();

        self.scanner = MentionScanner::with_config(&index, &self.config.mention).map_err(error_to_js)?;
        Ok(())
    }

    /// Per-concept mention aggregates for one note
    #[wasm_bindgen(js_name = scan)]
    pub fn js_scan(&self, text: Option<String>) -> JsValue {
        let result = self.scanner.scan(text.as_deref().unwrap_or_default());
        to_js_or_null(&result, "ConceptScanner")
    }

    /// Accepted mention spans for highlighting
    #[wasm_bindgen(js_name = findMatches)]
    pub fn js_find_matches(&self, text: Option<String>) -> JsValue {
        let result = self.scanner.find_matches(text.as_deref().unwrap_or_default());
        to_js_or_null(&result, "ConceptScanner")
    }

    /// `{ noteId: text }` -> `{ notes: { noteId: aggregates }, stats }`
    #[wasm_bindgen(js_name = scanMany)]
    pub fn js_scan_many(&self, notes: JsValue) -> Result<JsValue, JsValue> {
        let notes: HashMap<String, Option<String>> = serde_wasm_bindgen::from_value(notes)
            .map_err(|e| JsValue::from_str(&format!("Invalid notes: {}", e)))?;

        let result = self
            .scanner
            .scan_many(notes.into_iter().map(|(id, text)| (id, text.unwrap_or_default())));
        to_js(&result)
    }

    #[wasm_bindgen(js_name = containsMention)]
    pub fn js_contains_mention(&self, text: Option<String>) -> bool {
        self.scanner.contains_mention(text.as_deref().unwrap_or_default())
    }

    #[wasm_bindgen(js_name = patternCount)]
    pub fn pattern_count(&self) -> usize {
        self.scanner.pattern_count()
    }

    /// Wiki-links with snippets, using this scanner's configured window
    #[wasm_bindgen(js_name = extractLinksWithContext)]
    pub fn js_extract_links_with_context(&self, text: Option<String>) -> JsValue {
        let links = self.parser.extract_links_with_context(text.as_deref().unwrap_or_default());
        to_js_or_null(&links, "ConceptScanner")
    }

    /// HTML rendering with this scanner's configured template and class
    #[wasm_bindgen(js_name = convertLinksToHtml)]
    pub fn js_convert_links_to_html(&self, text: Option<String>) -> String {
        convert_links_to_html_with(text.as_deref().unwrap_or_default(), &self.config.wikilink)
    }
}

// ==================== Wiki-link functions ====================

#[wasm_bindgen(js_name = extractConceptNames)]
pub fn js_extract_concept_names(text: Option<String>) -> Vec<String> {
    WikiLinkParser::new().extract_concept_names(text.as_deref().unwrap_or_default())
}

#[wasm_bindgen(js_name = extractLinksWithContext)]
pub fn js_extract_links_with_context(text: Option<String>) -> JsValue {
    let links = WikiLinkParser::new().extract_links_with_context(text.as_deref().unwrap_or_default());
    to_js_or_null(&links, "WikiLinkParser")
}

#[wasm_bindgen(js_name = countLinks)]
pub fn js_count_links(text: Option<String>) -> usize {
    WikiLinkParser::new().count_links(text.as_deref().unwrap_or_default())
}

#[wasm_bindgen(js_name = containsLinks)]
pub fn js_contains_links(text: Option<String>) -> bool {
    WikiLinkParser::new().contains_links(text.as_deref().unwrap_or_default())
}

/// Replace each link with `renderer(link)`. A renderer that throws or
/// returns a non-string leaves that link's original text in place.
#[wasm_bindgen(js_name = replaceLinks)]
pub fn js_replace_links(text: Option<String>, renderer: &js_sys::Function) -> String {
    WikiLinkParser::new().replace_links(text.as_deref().unwrap_or_default(), |link| {
        let arg = to_js_or_null(link, "replaceLinks");
        match renderer.call1(&JsValue::NULL, &arg) {
            Ok(value) => value.as_string().unwrap_or_else(|| {
                warn!(concept = %link.concept_name, "renderer returned a non-string");
                link.matched_text.clone()
            }),
            Err(e) => {
                web_sys::console::error_1(&format!("[replaceLinks] Renderer failed: {:?}", e).into());
                link.matched_text.clone()
            }
        }
    })
}

#[wasm_bindgen(js_name = convertLinksToHtml)]
pub fn js_convert_links_to_html(text: Option<String>, url_template: Option<String>) -> Result<String, JsValue> {
    let text = text.unwrap_or_default();
    match url_template {
        Some(template) => {
            let config = LinkCoreConfig {
                wikilink: WikiLinkConfig::default().with_url_template(template),
                ..LinkCoreConfig::default()
            };
            config.validate().map_err(error_to_js)?;
            Ok(convert_links_to_html_with(&text, &config.wikilink))
        }
        None => Ok(convert_links_to_html(&text, DEFAULT_URL_TEMPLATE)),
    }
}

#[wasm_bindgen(js_name = isValidConceptName)]
pub fn js_is_valid_concept_name(name: Option<String>) -> bool {
    name.as_deref().map_or(false, is_valid_concept_name)
}

#[wasm_bindgen(js_name = escapeConceptName)]
pub fn js_escape_concept_name(name: Option<String>) -> String {
    escape_concept_name(name.as_deref().unwrap_or_default())
}
