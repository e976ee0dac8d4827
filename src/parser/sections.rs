//! Alignment of table-of-contents entries with content documents.

use std::collections::{HashMap, HashSet};

use crate::model::{flatten_toc, TocEntry};

/// Maps document paths to the section title that starts there.
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    titles: HashMap<String, String>,
    leading: Option<String>,
    skipped: Vec<String>,
}

impl SectionIndex {
    /// Align `toc` against the archive paths of the content documents.
    ///
    /// Entries are visited in reading order. An entry whose target document
    /// is not among `document_paths` is skipped; when several entries target
    /// the same document the first one keeps it. Documents that precede the
    /// first aligned document belong to that first section.
    pub fn build<'a, I>(toc: &[TocEntry], document_paths: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let ordered: Vec<&str> = document_paths.into_iter().collect();
        let documents: HashSet<&str> = ordered.iter().copied().collect();
        let mut index = Self::default();

        for entry in flatten_toc(toc) {
            let target = entry.target_path();
            if !documents.contains(target) {
                log::debug!(
                    "TOC entry '{}' points to {}, which is not a content document; skipping",
                    entry.title,
                    target
                );
                index.skipped.push(entry.title.clone());
                continue;
            }

            if let Some(existing) = index.titles.get(target) {
                log::debug!(
                    "TOC entry '{}' shares {} with '{}'; keeping the first",
                    entry.title,
                    target,
                    existing
                );
                index.skipped.push(entry.title.clone());
                continue;
            }

            index
                .titles
                .insert(target.to_string(), entry.title.clone());
        }

        index.leading = ordered
            .iter()
            .find_map(|path| index.titles.get(*path))
            .cloned();

        index
    }

    /// Title of the section that starts at `path`, if any.
    pub fn title_for(&self, path: &str) -> Option<&str> {
        self.titles.get(path).map(String::as_str)
    }

    /// Section of the first aligned document in reading order.
    pub fn leading_title(&self) -> Option<&str> {
        self.leading.as_deref()
    }

    /// Titles of entries that did not align with any document.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Number of aligned sections.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Check if no entry aligned.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Start walking documents in spine order.
    pub fn tracker(&self) -> SectionTracker<'_> {
        SectionTracker {
            index: self,
            current: self.leading_title(),
        }
    }
}

/// Carries the current section forward across documents.
#[derive(Debug)]
pub struct SectionTracker<'a> {
    index: &'a SectionIndex,
    current: Option<&'a str>,
}

impl<'a> SectionTracker<'a> {
    /// Enter the document at `path` and return the section in effect for it.
    pub fn enter(&mut self, path: &str) -> Option<&'a str> {
        if let Some(title) = self.index.title_for(path) {
            self.current = Some(title);
        }
        self.current
    }

    /// Section in effect for the last entered document.
    pub fn current(&self) -> Option<&'a str> {
        self.current
    }
}
