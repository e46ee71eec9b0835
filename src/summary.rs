//! Summary construction - one summary string per collected headline.

use crate::collect::HeadlineEntry;
use crate::config::Options;
use crate::text::{sentences, slice_chars, truncate_at_word};
use serde::{Deserialize, Serialize};

/// Marker prefixed to blocks after the first, signalling discontinuity
/// from the source
const CONTINUATION_PREFIX: &str = r#"<span class="prefix">[&hellip;]</span> "#;

/// A truncated tail shorter than this is dropped rather than rendered
const TRUNCATED_TAIL_MIN: usize = 35;

/// The summary derived for one headline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Jump-target id of the source headline
    pub anchor_id: String,
    /// Headline text
    pub title: String,
    /// Summary markup, empty when the headline had no usable content
    pub summary_html: String,
}

impl SummaryResult {
    /// Check whether any summary content was produced
    pub fn is_empty(&self) -> bool {
        self.summary_html.is_empty()
    }
}

/// Produce the summary for one headline entry.
///
/// An explicit author-supplied summary wins and is used verbatim, hard-cut
/// to `max_summary_length` characters when the cap is nonzero. Otherwise the
/// entry's content blocks are walked under a running character budget.
pub fn build_summary(entry: &HeadlineEntry, opts: &Options) -> SummaryResult {
    let summary_html = match &entry.explicit_summary {
        Some(text) if opts.max_summary_length > 0 => {
            slice_chars(text, opts.max_summary_length).to_string()
        }
        Some(text) => text.clone(),
        None => summarize_blocks(&entry.content_blocks, opts),
    };

    SummaryResult {
        anchor_id: entry.anchor_id.clone(),
        title: entry.title.clone(),
        summary_html,
    }
}

/// Walk up to `grafs_in_summary` content blocks (0 = all), extracting
/// sentences from each and keeping the total under the length cap.
fn summarize_blocks(blocks: &[String], opts: &Options) -> String {
    let count = if opts.grafs_in_summary > 0 {
        blocks.len().min(opts.grafs_in_summary)
    } else {
        blocks.len()
    };

    let mut paragraphs: Vec<String> = Vec::new();
    let mut consumed = 0usize;

    for (i, block) in blocks[..count].iter().enumerate() {
        let text = sentences(block, opts.sentences_per_graf);
        let prefix = if i > 0 { CONTINUATION_PREFIX } else { "" };

        if opts.max_summary_length == 0 {
            paragraphs.push(format!("<p>{}{}</p>", prefix, text));
            continue;
        }

        let len = text.chars().count();
        if consumed + len < opts.max_summary_length {
            paragraphs.push(format!("<p>{}{}</p>", prefix, text));
            consumed += len;
        } else {
            // Spend whatever budget is left on a word-truncated tail, then
            // stop: this branch ends the whole summary, not just this block.
            let remaining = opts.max_summary_length - consumed;
            let tail = truncate_at_word(slice_chars(&text, remaining));
            if tail.chars().count() > TRUNCATED_TAIL_MIN {
                paragraphs.push(format!("<p>{}{}</p>", prefix, tail));
            }
            break;
        }
    }

    paragraphs.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(explicit: Option<&str>, blocks: &[&str]) -> HeadlineEntry {
        HeadlineEntry {
            title: "Title".to_string(),
            anchor_id: "Title".to_string(),
            explicit_summary: explicit.map(str::to_string),
            content_blocks: blocks.iter().map(|b| b.to_string()).collect(),
        }
    }

    fn opts() -> Options {
        Options::default()
    }

    #[test]
    fn explicit_summary_is_hard_sliced_to_cap() {
        let o = Options {
            max_summary_length: 10,
            ..opts()
        };
        let result = build_summary(&entry(Some("exactly this text, no word awareness"), &[]), &o);
        assert_eq!(result.summary_html, "exactly th");
    }

    #[test]
    fn explicit_summary_unlimited_is_verbatim() {
        let o = Options {
            max_summary_length: 0,
            ..opts()
        };
        let text = "author supplied <em>markup</em> stays";
        let result = build_summary(&entry(Some(text), &[]), &o);
        assert_eq!(result.summary_html, text);
    }

    #[test]
    fn first_sentence_of_first_block_under_defaults() {
        let result = build_summary(
            &entry(None, &["One sentence here. Another sentence there."]),
            &opts(),
        );
        assert_eq!(result.summary_html, "<p>One sentence here.</p>");
    }

    #[test]
    fn no_content_yields_empty_summary() {
        let result = build_summary(&entry(None, &[]), &opts());
        assert!(result.is_empty());
    }

    #[test]
    fn later_blocks_carry_continuation_prefix() {
        let o = Options {
            grafs_in_summary: 0,
            max_summary_length: 0,
            ..opts()
        };
        let result = build_summary(&entry(None, &["First one.", "Second one."]), &o);
        assert_eq!(
            result.summary_html,
            r#"<p>First one.</p> <p><span class="prefix">[&hellip;]</span> Second one.</p>"#
        );
    }

    #[test]
    fn grafs_limit_bounds_block_walk() {
        let o = Options {
            grafs_in_summary: 2,
            max_summary_length: 0,
            ..opts()
        };
        let result = build_summary(&entry(None, &["A one.", "B two.", "C three."]), &o);
        assert!(result.summary_html.contains("A one."));
        assert!(result.summary_html.contains("B two."));
        assert!(!result.summary_html.contains("C three."));
    }

    #[test]
    fn cap_truncates_tail_at_word_boundary() {
        let long = "The quick brown fox jumps over the lazy dog and keeps on running far away. More.";
        let o = Options {
            max_summary_length: 60,
            sentences_per_graf: 0,
            ..opts()
        };
        let result = build_summary(&entry(None, &[long]), &o);
        assert!(result.summary_html.ends_with("&hellip;</p>"));
        // truncation never splits a word: the kept text is a prefix of the
        // source ending at a word boundary
        let inner = result
            .summary_html
            .trim_start_matches("<p>")
            .trim_end_matches("&hellip;</p>");
        assert!(long.starts_with(inner));
        assert_eq!(long.as_bytes()[inner.len()], b' ');
    }

    #[test]
    fn extracted_text_never_exceeds_cap() {
        let blocks = [
            "Alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu.",
            "Nu xi omicron pi rho sigma tau upsilon phi chi psi omega and then some more words.",
        ];
        for cap in [50, 80, 120, 200] {
            let o = Options {
                grafs_in_summary: 0,
                sentences_per_graf: 0,
                max_summary_length: cap,
                ..opts()
            };
            let result = build_summary(&entry(None, &blocks), &o);
            let text_len = extracted_len(&result.summary_html);
            assert!(text_len <= cap, "cap {} produced {} chars", cap, text_len);
        }
    }

    #[test]
    fn short_truncated_tail_is_dropped() {
        // Budget nearly exhausted by the first block: the second block's
        // remaining slice truncates to under the keep threshold and the
        // walk stops without rendering it.
        let o = Options {
            grafs_in_summary: 0,
            sentences_per_graf: 0,
            max_summary_length: 75,
            ..opts()
        };
        let blocks = [
            "This first block consumes most of the configured budget right away here.",
            "Second block barely fits.",
        ];
        let result = build_summary(&entry(None, &blocks), &o);
        assert!(result.summary_html.contains("This first block"));
        assert!(!result.summary_html.contains("Second"));
    }

    #[test]
    fn terminal_branch_stops_all_further_blocks() {
        let o = Options {
            grafs_in_summary: 0,
            sentences_per_graf: 0,
            max_summary_length: 40,
            ..opts()
        };
        let blocks = [
            "A block that is clearly longer than the budget allows in total.",
            "Tiny.",
            "Tiny again.",
        ];
        let result = build_summary(&entry(None, &blocks), &o);
        assert!(!result.summary_html.contains("Tiny"));
    }

    /// Character count of the summary with markup stripped: continuation
    /// markers removed, the ellipsis entity counted as one character
    fn extracted_len(html: &str) -> usize {
        let text = html
            .replace(CONTINUATION_PREFIX, "")
            .replace("&hellip;", "\u{2026}");
        let mut count = 0usize;
        let mut in_tag = false;
        for ch in text.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => count += 1,
                _ => {}
            }
        }
        count
    }
}
