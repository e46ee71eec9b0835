//! Text primitives for summary extraction.
//!
//! Whitespace normalization, punctuation-based sentence splitting and
//! word-boundary truncation. All functions here are pure.

use lazy_static::lazy_static;
use regex::Regex;

/// Marker appended to truncated text
pub const ELLIPSIS: &str = "&hellip;";

lazy_static! {
    /// A sentence: shortest run starting at a word character and ending at
    /// the first `.`, `?` or `!`.
    static ref SENTENCE: Regex = Regex::new(r"\w.+?[?.!]").unwrap();
    static ref NEWLINES: Regex = Regex::new(r"[\r\n]+").unwrap();
}

/// Trim surrounding whitespace and collapse internal newline runs to a
/// single space.
pub fn normalize(text: &str) -> String {
    NEWLINES.replace_all(text.trim(), " ").into_owned()
}

/// Extract up to `count` sentences from `text` (0 = all), joined by single
/// spaces.
///
/// Sentence boundaries are heuristic: abbreviations, decimal numbers and
/// embedded quotes are not handled specially. Text without any terminal
/// punctuation counts as one sentence.
pub fn sentences(text: &str, count: usize) -> String {
    let text = normalize(text);
    let matches: Vec<&str> = SENTENCE.find_iter(&text).map(|m| m.as_str()).collect();
    if matches.is_empty() {
        return text;
    }
    if count == 0 {
        matches.join(" ")
    } else {
        matches[..matches.len().min(count)].join(" ")
    }
}

/// Cut `text` at its last space and append an ellipsis marker.
///
/// The caller is expected to have sliced `text` down to its character budget
/// already. Trailing punctuation (`? ! . , ; : -`) and spaces are stripped
/// from the cut so the result never ends mid-word and never shows a stray
/// punctuation character before the marker. Input without any space collapses
/// to the bare marker.
pub fn truncate_at_word(text: &str) -> String {
    let cut = match text.rfind(' ') {
        Some(idx) => &text[..idx],
        None => "",
    };
    let cut = cut.trim_end_matches([' ', '?', '!', '.', ',', ';', ':', '-']);
    format!("{}{}", cut, ELLIPSIS)
}

/// First `count` characters of `text` (Unicode scalars, not bytes).
pub fn slice_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Escape text for embedding in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
