//! Table of contents types.

use serde::{Deserialize, Serialize};

/// A navigation entry from the NCX or nav document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Display title
    pub title: String,

    /// Archive path of the target, with an optional `#fragment`
    pub href: String,

    /// Nested entries
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    /// Create a new entry without children.
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            children: Vec::new(),
        }
    }

    /// Add a child entry.
    pub fn add_child(&mut self, child: TocEntry) {
        self.children.push(child);
    }

    /// Target path with any fragment removed.
    pub fn target_path(&self) -> &str {
        match self.href.find('#') {
            Some(pos) => &self.href[..pos],
            None => &self.href,
        }
    }
}

/// Flatten entries in depth-first pre-order, which is reading order for a TOC.
pub fn flatten_toc(entries: &[TocEntry]) -> Vec<&TocEntry> {
    fn walk<'a>(entries: &'a [TocEntry], out: &mut Vec<&'a TocEntry>) {
        for entry in entries {
            out.push(entry);
            walk(&entry.children, out);
        }
    }

    let mut out = Vec::new();
    walk(entries, &mut out);
    out
}
