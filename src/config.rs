//! Configuration loading and management for tldrify.
//!
//! Loads options from `tldrify.toml` when present; every option has a
//! default, so the file is optional and may be partial.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Options recognized by the pipeline.
///
/// Merged once before a run (defaults, then file, then caller overrides) and
/// never mutated mid-run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Comma-separated element names treated as headlines
    pub headline_elements: String,
    /// Selector for the scan/insertion root, empty = document body
    pub target: String,
    /// Insert the rendered block before the first headline instead of at the top
    pub insert_after_lead: bool,
    /// Container for the whole block, `tag` or `tag.class` form
    pub wrapper: String,
    /// List element, `ol` or `ul`
    pub list_type: String,
    /// Tag wrapping each headline label
    pub headline_tag: String,
    /// Tag for the block's title line
    pub header_tag: String,
    /// Title text for the block
    pub header_title: String,
    /// Name of the per-headline explicit-summary data attribute
    pub data_attribute: String,
    /// Collapse summaries, expanding on headline clicks
    pub collapsed: bool,
    /// Emit the built-in toggle handler, ignored unless collapsed
    pub add_click_handler: bool,
    /// At most one expanded summary per list, ignored unless collapsed
    pub accordion: bool,
    /// Content blocks considered per headline, 0 = unlimited
    pub grafs_in_summary: usize,
    /// Sentences extracted per block, 0 = unlimited
    pub sentences_per_graf: usize,
    /// Character budget per summary, 0 = unlimited
    pub max_summary_length: usize,
    /// Minimum headline count required to produce a block, 0 = no threshold
    pub minimum_headlines: usize,
    /// Prepend a page-description intro line when available
    pub use_meta_description: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            headline_elements: "h2,h3".to_string(),
            target: String::new(),
            insert_after_lead: false,
            wrapper: "div.tldr-wrapper".to_string(),
            list_type: "ol".to_string(),
            headline_tag: "strong".to_string(),
            header_tag: "h4".to_string(),
            header_title: "TL;DR".to_string(),
            data_attribute: "tldr".to_string(),
            collapsed: false,
            add_click_handler: true,
            accordion: true,
            grafs_in_summary: 1,
            sentences_per_graf: 1,
            max_summary_length: 200,
            minimum_headlines: 3,
            use_meta_description: true,
        }
    }
}

impl Options {
    /// Load options from the default location, falling back to pure
    /// defaults when no config file exists
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load options from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let options: Options = toml::from_str(&content)?;
        Ok(options)
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from("tldrify.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config").join("tldrify").join("tldrify.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }

    /// The headline element names as a set
    pub fn headline_tags(&self) -> Vec<&str> {
        self.headline_elements
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// The list tag to render, unrecognized values fall back to `ol`
    pub fn list_tag(&self) -> &str {
        match self.list_type.as_str() {
            "ul" => "ul",
            _ => "ol",
        }
    }

    /// Full name of the explicit-summary attribute
    pub fn summary_attribute(&self) -> String {
        format!("data-{}", self.data_attribute)
    }
}
