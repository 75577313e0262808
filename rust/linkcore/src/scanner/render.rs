//! Wiki-link rendering and concept-name hygiene
//!
//! - `convert_links_to_html`: `[[Name|Label]]` -> `<a href=... class=... data-concept=...>`
//! - `is_valid_concept_name`: can this name be written inside `[[...]]`?
//! - `escape_concept_name`: make a name safe to write inside `[[...]]`

use super::wikilink::{WikiLink, WikiLinkParser};
use crate::config::{WikiLinkConfig, URL_PLACEHOLDER};

/// Characters that would break link syntax
fn is_link_syntax_char(c: char) -> bool {
    matches!(c, '[' | ']' | '|' | '\r' | '\n')
}

/// Minimal escaping for HTML attribute values and text
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render one link as an anchor
pub fn render_anchor(link: &WikiLink, config: &WikiLinkConfig) -> String {
    let encoded = urlencoding::encode(&link.concept_name);
    let href = config.url_template.replace(URL_PLACEHOLDER, &encoded);
    format!(
        r#"<a href="{}" class="{}" data-concept="{}">{}</a>"#,
        escape_html(&href),
        escape_html(&config.css_class),
        escape_html(&link.concept_name),
        escape_html(link.label()),
    )
}

/// Render every link in `text` with the configured template and class
pub fn convert_links_to_html_with(text: &str, config: &WikiLinkConfig) -> String {
    let parser = WikiLinkParser::with_config(config);
    parser.render_links(text, |link| render_anchor(link, config))
}

/// Render every link in `text`, substituting the URL-encoded concept name
/// into `url_template` at `{0}`
pub fn convert_links_to_html(text: &str, url_template: &str) -> String {
    let config = WikiLinkConfig::default().with_url_template(url_template);
    convert_links_to_html_with(text, &config)
}

/// False for blank names and names containing `[`, `]`, `|`, CR or LF
pub fn is_valid_concept_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.chars().any(is_link_syntax_char)
}

/// Strip brackets, turn `|` into `-` and line breaks into a space.
/// A run of adjacent replacements becomes one separator, `-` if the run
/// holds a pipe, and the result is trimmed, so `"[Person]|Test\n"` becomes
/// `"Person-Test"`. A name made only of brackets and whitespace escapes to
/// `""`, which `is_valid_concept_name` rejects.
pub fn escape_concept_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending: Option<char> = None;

    for c in name.chars() {
        match c {
            '[' | ']' => {}
            '|' => pending = Some('-'),
            '\r' | '\n' => pending = pending.or(Some(' ')),
            _ => {
                if let Some(sep) = pending.take() {
                    out.push(sep);
                }
                out.push(c);
            }
        }
    }
    if let Some(sep) = pending {
        out.push(sep);
    }

    out.trim().to_string()
}
