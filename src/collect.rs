//! Headline collection and anchor-id assignment.
//!
//! Walks the document for headline blocks, pairs each with its trailing
//! content blocks and locates or derives a stable anchor id. Deriving an id
//! writes it back onto the source block, the one mutation in the whole
//! extraction path, so repeated runs over the same document see the id as
//! pre-existing and stay idempotent.

use crate::config::Options;
use crate::document::Document;
use crate::text::normalize;
use std::collections::HashSet;
use tracing::{debug, warn};

/// One matched headline with everything needed to summarize it
#[derive(Debug, Clone)]
pub struct HeadlineEntry {
    /// Headline text content
    pub title: String,
    /// Jump-target id on the headline element
    pub anchor_id: String,
    /// Author-supplied summary from the data attribute, if any
    pub explicit_summary: Option<String>,
    /// Text of each sibling block up to the next headline
    pub content_blocks: Vec<String>,
}

/// Collect headline entries in document order.
///
/// Returns `None` when the document is not applicable: fewer matches than
/// `minimum_headlines` (when the threshold is nonzero). A document with
/// enough headlines but empty content still yields entries.
pub fn collect(doc: &mut Document, opts: &Options) -> Option<Vec<HeadlineEntry>> {
    let tags = opts.headline_tags();
    let indices: Vec<usize> = doc
        .blocks
        .iter()
        .enumerate()
        .filter(|(_, block)| tags.contains(&block.tag.as_str()))
        .map(|(i, _)| i)
        .collect();

    if opts.minimum_headlines > 0 && indices.len() < opts.minimum_headlines {
        debug!(
            found = indices.len(),
            required = opts.minimum_headlines,
            "below minimum headline count"
        );
        return None;
    }

    let summary_attr = opts.summary_attribute();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut entries = Vec::with_capacity(indices.len());

    for (pos, &idx) in indices.iter().enumerate() {
        let title = normalize(&doc.blocks[idx].text);
        let anchor_id = anchor_id_for(doc, idx, &title);
        if !seen_ids.insert(anchor_id.clone()) {
            warn!(id = %anchor_id, "duplicate anchor id, jump targets will collide");
        }

        let end = indices.get(pos + 1).copied().unwrap_or(doc.blocks.len());
        let content_blocks = doc.blocks[idx + 1..end]
            .iter()
            .map(|block| block.text.clone())
            .collect();

        entries.push(HeadlineEntry {
            explicit_summary: doc.blocks[idx].attr(&summary_attr).map(str::to_string),
            title,
            anchor_id,
            content_blocks,
        });
    }

    Some(entries)
}

/// Use the block's existing id, or derive one from the title (all
/// non-letter characters removed) and assign it back.
fn anchor_id_for(doc: &mut Document, idx: usize, title: &str) -> String {
    if let Some(id) = doc.blocks[idx].attr("id") {
        if !id.is_empty() {
            return id.to_string();
        }
    }
    let derived: String = title.chars().filter(char::is_ascii_alphabetic).collect();
    doc.blocks[idx].set_attr("id", &derived);
    derived
}
