//! Fetching and parsing glue around the document model.
//!
//! Uses reqwest for fetching and scraper for HTML parsing. The scan root's
//! child elements become the flat block sequence the pipeline works on.

use crate::config::Options;
use crate::document::{Block, Document};
use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// User-Agent string identifying this tool
const USER_AGENT: &str = concat!(
    "tldrify/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/cladam/tldrify)"
);

/// Default timeout for HTTP requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

lazy_static! {
    static ref BODY: Selector = Selector::parse("body").unwrap();
    static ref META_DESCRIPTION: Selector =
        Selector::parse("meta[name=description], meta[property$=description]").unwrap();
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to fetch URL: {0}")]
    Http(#[from] reqwest::Error),
}

/// Create a configured HTTP client
fn create_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// Fetch raw HTML from a URL
pub async fn fetch_html(url: &str) -> Result<String, FetchError> {
    let client = create_client()?;
    let response = client.get(url).send().await?;
    Ok(response.text().await?)
}

/// Parse HTML into the document model.
///
/// The scan root is the first match of the `target` selector when one is
/// configured, otherwise the body. An invalid or unmatched selector falls
/// back to the body with a warning rather than failing.
pub fn parse_document(html: &str, opts: &Options) -> Document {
    let parsed = Html::parse_document(html);

    let mut blocks = Vec::new();
    if let Some(root) = scan_root(&parsed, opts) {
        for child in root.child_elements() {
            blocks.push(to_block(child));
        }
    }

    let mut doc = Document::new(blocks);
    doc.description = extract_description(&parsed);
    doc
}

fn scan_root<'a>(parsed: &'a Html, opts: &Options) -> Option<ElementRef<'a>> {
    if !opts.target.is_empty() {
        match Selector::parse(&opts.target) {
            Ok(selector) => {
                if let Some(element) = parsed.select(&selector).next() {
                    return Some(element);
                }
                warn!(target = %opts.target, "target selector matched nothing, using body");
            }
            Err(_) => {
                warn!(target = %opts.target, "invalid target selector, using body");
            }
        }
    }
    parsed.select(&BODY).next()
}

fn to_block(element: ElementRef) -> Block {
    Block {
        tag: element.value().name().to_lowercase(),
        attrs: element
            .value()
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        text: element.text().collect(),
        inner_html: element.inner_html(),
    }
}

/// First non-empty `content` of a meta description tag, `name=description`
/// or any `property` ending in `description` (covers `og:description`)
fn extract_description(parsed: &Html) -> Option<String> {
    for element in parsed.select(&META_DESCRIPTION) {
        if let Some(content) = element.value().attr("content") {
            let content = content.trim();
            if !content.is_empty() {
                return Some(content.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Test Page</title>
            <meta name="description" content="A page about testing.">
        </head>
        <body>
            <h2 id="existing">First <em>section</em></h2>
            <p data-tldr="supplied">Some body text.</p>
            <h2>Second section</h2>
        </body>
        </html>
    "#;

    #[test]
    fn parses_body_children_into_blocks() {
        let doc = parse_document(PAGE, &Options::default());
        let tags: Vec<&str> = doc.blocks.iter().map(|b| b.tag.as_str()).collect();
        assert_eq!(tags, vec!["h2", "p", "h2"]);
    }

    #[test]
    fn blocks_carry_attributes_text_and_markup() {
        let doc = parse_document(PAGE, &Options::default());
        assert_eq!(doc.blocks[0].attr("id"), Some("existing"));
        assert_eq!(doc.blocks[0].text, "First section");
        assert_eq!(doc.blocks[0].inner_html, "First <em>section</em>");
        assert_eq!(doc.blocks[1].attr("data-tldr"), Some("supplied"));
    }

    #[test]
    fn meta_description_is_extracted() {
        let doc = parse_document(PAGE, &Options::default());
        assert_eq!(doc.description.as_deref(), Some("A page about testing."));
    }

    #[test]
    fn og_description_is_honored() {
        let html = r#"<html><head>
            <meta property="og:description" content="Open graph text.">
        </head><body><p>x</p></body></html>"#;
        let doc = parse_document(html, &Options::default());
        assert_eq!(doc.description.as_deref(), Some("Open graph text."));
    }

    #[test]
    fn missing_description_is_none() {
        let doc = parse_document("<html><body><p>x</p></body></html>", &Options::default());
        assert_eq!(doc.description, None);
    }

    #[test]
    fn target_selector_picks_the_scan_root() {
        let html = r#"<html><body>
            <nav><h2>Menu</h2></nav>
            <article id="main"><h2>Inside</h2><p>Body.</p></article>
        </body></html>"#;
        let opts = Options {
            target: "#main".to_string(),
            ..Options::default()
        };
        let doc = parse_document(html, &opts);
        let tags: Vec<&str> = doc.blocks.iter().map(|b| b.tag.as_str()).collect();
        assert_eq!(tags, vec!["h2", "p"]);
        assert_eq!(doc.blocks[0].text, "Inside");
    }

    #[test]
    fn bad_target_selector_falls_back_to_body() {
        let opts = Options {
            target: "[[nonsense".to_string(),
            ..Options::default()
        };
        let doc = parse_document(PAGE, &opts);
        assert_eq!(doc.blocks.len(), 3);
    }
}
