//! Documentation normalization
//!
//! Raw documentation comments are turned into XHTML inline markup before
//! they are embedded into `xs:documentation` blocks. The generator accepts
//! any [`DocNormalizer`]; [`InlineMarkup`] is the default.

use crate::XHTML_NAMESPACE;
use once_cell::sync::Lazy;
use quick_xml::escape::{escape, unescape};
use regex::Regex;

static INLINE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{@(code|literal|link|linkplain)\s+([^}]*)\}").unwrap()
});

static BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Converts raw documentation text into an inline markup snippet
pub trait DocNormalizer {
    /// Normalize raw text; the result must be well-formed XHTML content
    fn normalize(&self, raw: &str) -> String;
}

/// Check if a snippet is well-formed content for an XHTML `div`
pub fn is_well_formed_fragment(snippet: &str) -> bool {
    let wrapped = format!("<div xmlns=\"{}\">{}</div>", XHTML_NAMESPACE, snippet);
    roxmltree::Document::parse(&wrapped).is_ok()
}

/// Escape text so it can be embedded as XHTML content
pub fn escape_text(text: &str) -> String {
    escape(text).into_owned()
}

/// Default normalizer
///
/// Markup that is already well-formed is kept. Anything else is escaped,
/// split into paragraphs at blank lines and gets doc comment inline tags
/// (`{@code ...}`, `{@link ...}`) rewritten to `<code>` elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineMarkup;

impl InlineMarkup {
    fn inline_tags(text: &str) -> String {
        INLINE_TAG
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let body = caps[2].trim();
                let shown = match &caps[1] {
                    "link" | "linkplain" => body
                        .split_once(char::is_whitespace)
                        .map(|(_, label)| label.trim())
                        .unwrap_or(body),
                    _ => body,
                };
                format!("<code>{}</code>", shown)
            })
            .into_owned()
    }

    fn paragraphs(text: &str) -> Vec<String> {
        BLANK_LINE
            .split(text)
            .map(|p| WHITESPACE.replace_all(p.trim(), " ").into_owned())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

impl DocNormalizer for InlineMarkup {
    fn normalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.contains('<') && is_well_formed_fragment(trimmed) {
            return trimmed.to_string();
        }

        // Entities already present are decoded first so they are escaped once
        let decoded = unescape(trimmed).unwrap_or(std::borrow::Cow::Borrowed(trimmed));
        let escaped = escape_text(&decoded);
        let paragraphs: Vec<String> = Self::paragraphs(&escaped)
            .iter()
            .map(|p| Self::inline_tags(p))
            .collect();

        match paragraphs.as_slice() {
            [single] => single.clone(),
            many => many
                .iter()
                .map(|p| format!("<p>{}</p>", p))
                .collect::<String>(),
        }
    }
}
