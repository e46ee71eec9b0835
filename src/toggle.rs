//! Expand/collapse state machine for collapsed-mode blocks.
//!
//! Each rendered block owns one controller holding the visibility state of
//! its entries. A toggle is atomic relative to other toggles on the same
//! block: the state sits behind a mutex, so the accordion constraint (at
//! most one expanded entry) cannot be violated by interleaved clicks.

use std::collections::HashSet;
use std::sync::Mutex;

/// Outcome of a toggle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Expanded,
    Collapsed,
}

/// Per-block controller for summary visibility.
///
/// Entries are addressed by anchor id. Host UIs route non-link headline
/// clicks here; clicks landing on a hyperlink inside the label must not be
/// forwarded, navigation takes precedence.
#[derive(Debug)]
pub struct BlockController {
    entries: Vec<String>,
    accordion: bool,
    expanded: Mutex<HashSet<String>>,
}

impl BlockController {
    /// Create a controller with every entry collapsed
    pub fn new(entries: Vec<String>, accordion: bool) -> Self {
        Self {
            entries,
            accordion,
            expanded: Mutex::new(HashSet::new()),
        }
    }

    /// Toggle one entry, returning its new state, or `None` for an unknown
    /// id.
    ///
    /// In accordion mode expanding an entry collapses every other entry
    /// first.
    pub fn toggle(&self, entry_id: &str) -> Option<Toggle> {
        if !self.entries.iter().any(|e| e == entry_id) {
            return None;
        }
        let mut expanded = self.expanded.lock().unwrap();
        if expanded.remove(entry_id) {
            return Some(Toggle::Collapsed);
        }
        if self.accordion {
            expanded.clear();
        }
        expanded.insert(entry_id.to_string());
        Some(Toggle::Expanded)
    }

    /// Whether the entry is currently expanded
    pub fn is_expanded(&self, entry_id: &str) -> bool {
        self.expanded.lock().unwrap().contains(entry_id)
    }

    /// Ids of the currently expanded entries, in list order
    pub fn expanded_entries(&self) -> Vec<String> {
        let expanded = self.expanded.lock().unwrap();
        self.entries
            .iter()
            .filter(|e| expanded.contains(*e))
            .cloned()
            .collect()
    }

    /// Number of entries under this controller
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the controller has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
