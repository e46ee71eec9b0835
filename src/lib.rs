//! # tldrify
//!
//! Generates a condensed "TL;DR" block for an HTML document: one summary
//! per headline, extracted from the text that follows it or supplied by the
//! author through a data attribute.
//!
//! ## Features
//!
//! - **Deterministic extraction**: punctuation-based sentence splitting and
//!   word-boundary truncation under a per-summary character budget
//! - **Stable anchors**: headline ids are located or derived once and
//!   written back, so re-runs are idempotent
//! - **Collapsible output**: optional click-to-expand summaries with an
//!   accordion constraint, backed by an explicit per-block state machine

pub mod collect;
pub mod config;
pub mod document;
pub mod render;
pub mod scrape;
pub mod summary;
pub mod text;
pub mod toggle;

pub use config::Options;
pub use document::Document;
pub use render::TldrBlock;
pub use summary::SummaryResult;
pub use toggle::{BlockController, Toggle};

use tracing::debug;

/// Run the whole pipeline over a document.
///
/// Returns `None` when the document is not applicable: fewer headlines than
/// `minimum_headlines`, or no headline matched at all. That outcome is
/// distinct from an applicable document whose summaries all came out empty,
/// which still yields a block.
///
/// Deriving anchor ids writes them back onto the document's headline
/// blocks; this is the only mutation performed.
pub fn build(doc: &mut Document, opts: &Options) -> Option<TldrBlock> {
    let entries = collect::collect(doc, opts)?;
    if entries.is_empty() {
        debug!("no headline matched, nothing to build");
        return None;
    }

    let results: Vec<SummaryResult> = entries
        .iter()
        .map(|entry| summary::build_summary(entry, opts))
        .collect();
    debug!(headlines = results.len(), "summaries built");

    let description = if opts.use_meta_description {
        doc.description.clone()
    } else {
        None
    };

    Some(render::assemble(results, description.as_deref(), opts))
}
