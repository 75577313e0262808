//! Configuration types and defaults for LinkCore
//!
//! Every field carries a serde default so callers can send partial JSON
//! (or nothing at all) from JavaScript.

use serde::{Deserialize, Serialize};

use crate::error::{LinkCoreError, LinkCoreResult};

/// Placeholder substituted with the URL-encoded concept name
pub const URL_PLACEHOLDER: &str = "{0}";

/// Default href template for rendered wiki-links
pub const DEFAULT_URL_TEMPLATE: &str = "/concept/{0}";

/// Default CSS class for rendered wiki-links
pub const DEFAULT_CSS_CLASS: &str = "wiki-link";

/// Default snippet window (characters on each side of a link)
pub const DEFAULT_CONTEXT_CHARS: usize = 40;

fn default_min_name_chars() -> usize { 1 }
fn default_context_chars() -> usize { DEFAULT_CONTEXT_CHARS }
fn default_url_template() -> String { DEFAULT_URL_TEMPLATE.to_string() }
fn default_css_class() -> String { DEFAULT_CSS_CLASS.to_string() }

// =============================================================================
// Mention scanning
// =============================================================================

/// Settings for the concept mention scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionConfig {
    /// Names shorter than this (in characters, after trimming) are never matched. Default: 1
    #[serde(default = "default_min_name_chars")]
    pub min_name_chars: usize,
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            min_name_chars: default_min_name_chars(),
        }
    }
}

// =============================================================================
// Wiki-links
// =============================================================================

/// Settings for wiki-link snippets and HTML rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiLinkConfig {
    /// Characters of context taken on each side of a link. Default: 40
    #[serde(default = "default_context_chars")]
    pub context_chars: usize,
    /// href template; `{0}` is replaced by the URL-encoded concept name
    #[serde(default = "default_url_template")]
    pub url_template: String,
    /// CSS class applied to rendered anchors. Default: "wiki-link"
    #[serde(default = "default_css_class")]
    pub css_class: String,
}

impl Default for WikiLinkConfig {
    fn default() -> Self {
        Self {
            context_chars: default_context_chars(),
            url_template: default_url_template(),
            css_class: default_css_class(),
        }
    }
}

impl WikiLinkConfig {
    /// Same defaults with a different href template
    pub fn with_url_template(mut self, url_template: impl Into<String>) -> Self {
        self.url_template = url_template.into();
        self
    }

    pub fn with_context_chars(mut self, context_chars: usize) -> Self {
        self.context_chars = context_chars;
        self
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Top-level LinkCore configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkCoreConfig {
    #[serde(default)]
    pub mention: MentionConfig,
    #[serde(default)]
    pub wikilink: WikiLinkConfig,
}

impl LinkCoreConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> LinkCoreResult<Self> {
        let config: LinkCoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the scanner or renderer cannot work with
    pub fn validate(&self) -> LinkCoreResult<()> {
        if self.mention.min_name_chars == 0 {
            return Err(LinkCoreError::InvalidConfig(
                "mention.min_name_chars must be at least 1".to_string(),
            ));
        }
        if !self.wikilink.url_template.contains(URL_PLACEHOLDER) {
            return Err(LinkCoreError::InvalidConfig(format!(
                "wikilink.url_template must contain {}: {:?}",
                URL_PLACEHOLDER, self.wikilink.url_template
            )));
        }
        if self.wikilink.css_class.trim().is_empty() {
            return Err(LinkCoreError::InvalidConfig(
                "wikilink.css_class must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
