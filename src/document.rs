//! Owned document model the pipeline operates on.
//!
//! A document is the ordered sequence of sibling elements under the scan
//! root, plus the page-level description when one was found. The model is
//! deliberately flat: headline pairing only ever looks at siblings, so
//! nested structure stays opaque inside each block's `inner_html`.

use crate::config::Options;
use crate::text::escape_html;

/// Elements serialized without a closing tag
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// One top-level element of the scanned content
#[derive(Debug, Clone)]
pub struct Block {
    /// Lowercase tag name
    pub tag: String,
    /// Attributes in source order
    pub attrs: Vec<(String, String)>,
    /// Flattened text content
    pub text: String,
    /// Original inner markup
    pub inner_html: String,
}

impl Block {
    /// Create a block with no attributes
    pub fn new(tag: &str, inner_html: &str, text: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            text: text.to_string(),
            inner_html: inner_html.to_string(),
        }
    }

    /// Look up an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(entry) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value.to_string();
        } else {
            self.attrs.push((name.to_string(), value.to_string()));
        }
    }

    /// Serialize the block back to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return out;
        }
        out.push_str(&self.inner_html);
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        out
    }
}

/// The scanned content: sibling blocks in document order
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Top-level blocks under the scan root
    pub blocks: Vec<Block>,
    /// Page-level description from the host document's meta tags
    pub description: Option<String>,
}

impl Document {
    /// Create a document from a block sequence
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            description: None,
        }
    }

    /// Serialize the document content back to HTML
    pub fn to_html(&self) -> String {
        self.blocks
            .iter()
            .map(Block::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serialize with a rendered block inserted at the configured position.
    ///
    /// With `insert_after_lead` the block lands before the first headline;
    /// otherwise (or when no headline exists) it goes to the top.
    pub fn to_html_with_block(&self, block_html: &str, opts: &Options) -> String {
        let position = if opts.insert_after_lead {
            self.blocks
                .iter()
                .position(|b| opts.headline_tags().contains(&b.tag.as_str()))
                .unwrap_or(0)
        } else {
            0
        };

        let mut parts: Vec<String> = Vec::with_capacity(self.blocks.len() + 1);
        for (i, b) in self.blocks.iter().enumerate() {
            if i == position {
                parts.push(block_html.to_string());
            }
            parts.push(b.to_html());
        }
        if self.blocks.is_empty() {
            parts.push(block_html.to_string());
        }
        parts.join("\n")
    }
}
