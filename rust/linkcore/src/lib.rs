//! LinkCore: Concept Mention Scanner + Wiki-Link Parser
//!
//! A Rust/WASM implementation of the note-to-concept linking engine.
//!
//! # Architecture
//!
//! ## Scanner Components
//! - `index.rs` - ConceptNameIndex: ordered concept id -> name mapping
//! - `mention.rs` - MentionScanner: whole-word concept mentions via Aho-Corasick
//! - `batch.rs` - Batch scanning of many notes with one automaton
//! - `wikilink.rs` - WikiLinkParser: `[[Concept]]` / `[[Concept|Display]]` links with context
//! - `render.rs` - HTML rendering, concept-name validation and escaping
//! - `text.rs` - Case folding, char offsets, word boundaries
//!
//! ## Support
//! - `config.rs` - Configuration types and defaults
//! - `error.rs` - Error types
//! - `wasm.rs` - JavaScript bindings
//!
//! # Usage (Rust)
//! ```
//! use linkcore::{ConceptNameIndex, MentionScanner, WikiLinkParser};
//!
//! let concepts: ConceptNameIndex = vec![(1, "machine"), (2, "machine learning")]
//!     .into_iter()
//!     .collect();
//! let scanner = MentionScanner::new(&concepts).unwrap();
//!
//! let mentions = scanner.scan("Machine learning is fun");
//! assert_eq!(mentions.len(), 1);
//! assert_eq!(mentions[0].concept_id.0, 2);
//!
//! let names = WikiLinkParser::new().extract_concept_names("[[Person|John]] founded it");
//! assert_eq!(names, vec!["Person"]);
//! ```

pub mod config;
pub mod error;
pub mod scanner;
pub mod wasm;

// Public exports
pub use config::*;
pub use error::*;
pub use scanner::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("linkcore v{}", env!("CARGO_PKG_VERSION"))
}
