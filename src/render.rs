//! Assembly of the rendered TL;DR block.
//!
//! Turns the ordered summary results into a single markup string: wrapper,
//! header line, list of headline/summary entries, optional page-description
//! intro and, in collapsed mode, the built-in click-handler script. Headline
//! titles are escaped; summary markup and the intro line are embedded as-is,
//! they originate from the scanned document.

use crate::config::Options;
use crate::summary::SummaryResult;
use crate::text::{escape_html, truncate_at_word};
use crate::toggle::BlockController;

/// Built-in toggle handler emitted in collapsed mode. Clicks landing on a
/// link inside the label fall through to navigation.
const TOGGLE_SCRIPT: &str = r#"<script>
(function () {
  var wrap = document.currentScript.parentElement;
  var accordion = __ACCORDION__;
  wrap.querySelectorAll('.tldr-headline').forEach(function (headline) {
    headline.addEventListener('click', function (ev) {
      if (ev.target.tagName === 'A') { return; }
      ev.preventDefault();
      var summary = headline.nextElementSibling;
      var open = summary && summary.classList.contains('tldr-open');
      if (accordion) {
        wrap.querySelectorAll('.summary').forEach(function (s) {
          s.style.display = 'none';
          s.classList.remove('tldr-open');
        });
      }
      if (!summary) { return; }
      summary.style.display = open ? 'none' : 'block';
      summary.classList.toggle('tldr-open', !open);
    });
  });
})();
</script>"#;

/// The final render artifact
#[derive(Debug)]
pub struct TldrBlock {
    /// Rendered markup, ready for insertion by the caller
    pub html: String,
    /// The summary results the block was rendered from, in list order
    pub entries: Vec<SummaryResult>,
    /// Visibility state machine, present when `collapsed` is enabled
    pub controller: Option<BlockController>,
}

/// Assemble the block from the ordered summary results plus the optional
/// page description.
pub fn assemble(
    results: Vec<SummaryResult>,
    description: Option<&str>,
    opts: &Options,
) -> TldrBlock {
    let interactive = opts.collapsed && opts.add_click_handler;
    let mut items: Vec<String> = Vec::new();

    if let Some(desc) = description {
        items.push(format!("<li>{}</li>", truncate_at_word(desc)));
    }

    for result in &results {
        let title = escape_html(&result.title);
        let tag = &opts.headline_tag;
        if interactive {
            items.push(format!(
                r##"<li><{tag} class="tldr-headline" style="cursor:pointer">{title}<a href="#{anchor}"> &rarr;</a></{tag}><div class="summary" style="display:none">{summary}</div></li>"##,
                tag = tag,
                title = title,
                anchor = result.anchor_id,
                summary = result.summary_html,
            ));
        } else {
            items.push(format!(
                r##"<li><a href="#{anchor}"><{tag} class="tldr-headline">{title}</{tag}></a><div class="summary">{summary}</div></li>"##,
                tag = tag,
                title = title,
                anchor = result.anchor_id,
                summary = result.summary_html,
            ));
        }
    }

    let list_tag = opts.list_tag();
    let mut html = String::new();
    html.push_str(&open_wrapper(&opts.wrapper));
    html.push_str(&format!(
        "<{tag}>{title}</{tag}>",
        tag = opts.header_tag,
        title = opts.header_title,
    ));
    html.push_str(&format!("<{}>", list_tag));
    html.push_str(&items.join(""));
    html.push_str(&format!("</{}>", list_tag));
    if interactive {
        html.push_str(&TOGGLE_SCRIPT.replace(
            "__ACCORDION__",
            if opts.accordion { "true" } else { "false" },
        ));
    }
    html.push_str(&close_wrapper(&opts.wrapper));

    let controller = opts.collapsed.then(|| {
        BlockController::new(
            results.iter().map(|r| r.anchor_id.clone()).collect(),
            opts.accordion,
        )
    });

    TldrBlock {
        html,
        entries: results,
        controller,
    }
}

/// Opening tag for a `tag` or `tag.class[.class...]` wrapper value
fn open_wrapper(wrapper: &str) -> String {
    let mut parts = wrapper.split('.');
    let tag = match parts.next() {
        Some(t) if !t.is_empty() => t,
        _ => "div",
    };
    let classes: Vec<&str> = parts.filter(|c| !c.is_empty()).collect();
    if classes.is_empty() {
        format!("<{}>", tag)
    } else {
        format!(r#"<{} class="{}">"#, tag, classes.join(" "))
    }
}

fn close_wrapper(wrapper: &str) -> String {
    let tag = wrapper
        .split('.')
        .next()
        .filter(|t| !t.is_empty())
        .unwrap_or("div");
    format!("</{}>", tag)
}
