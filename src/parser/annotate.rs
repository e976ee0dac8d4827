//! Metadata attachment for extracted drafts.

use crate::detect::EPUB_MIME_TYPE;
use crate::model::{Element, ElementMetadata};
use crate::source::{split_filename, Source};

use super::html::ElementDraft;
use super::options::PartitionOptions;

/// Builds the final elements of one partition run.
///
/// Holds the document-level metadata shared by every element. When metadata
/// is disabled no base exists and elements are built with empty metadata.
#[derive(Debug, Clone, Default)]
pub struct MetadataAnnotator {
    base: Option<ElementMetadata>,
}

impl MetadataAnnotator {
    /// Resolve document-level metadata for `source`.
    pub fn new(source: &Source<'_>, options: &PartitionOptions) -> Self {
        if !options.include_metadata {
            return Self::disabled();
        }

        let (filename, file_directory) = match (&options.metadata_filename, source.path()) {
            (Some(filename), _) => (Some(filename.clone()), None),
            (None, Some(path)) => split_filename(path),
            (None, None) => (None, None),
        };

        let last_modified = options
            .metadata_last_modified
            .clone()
            .or_else(|| source.last_modified(options.date_lookup.as_ref()));

        Self {
            base: Some(ElementMetadata {
                filename,
                file_directory,
                filetype: Some(EPUB_MIME_TYPE.to_string()),
                last_modified,
                ..Default::default()
            }),
        }
    }

    /// An annotator that attaches no metadata.
    pub fn disabled() -> Self {
        Self { base: None }
    }

    /// Check if elements receive metadata.
    pub fn is_enabled(&self) -> bool {
        self.base.is_some()
    }

    /// Turn a draft into an element within `section`.
    pub fn annotate(&self, draft: ElementDraft, section: Option<&str>) -> Element {
        let Some(base) = &self.base else {
            return Element::new(draft.element_type, draft.text, ElementMetadata::default());
        };

        let mut metadata = base.clone();
        metadata.section = section.map(str::to_string);
        metadata.category_depth = draft.category_depth;

        if !draft.links.is_empty() {
            let (texts, urls) = draft.links.into_iter().map(|l| (l.text, l.url)).unzip();
            metadata.link_texts = Some(texts);
            metadata.link_urls = Some(urls);
        }
        if !draft.emphasis.is_empty() {
            let (contents, tags) = draft
                .emphasis
                .into_iter()
                .map(|e| (e.text, e.tag))
                .unzip();
            metadata.emphasized_text_contents = Some(contents);
            metadata.emphasized_text_tags = Some(tags);
        }

        Element::new(draft.element_type, draft.text, metadata)
    }
}
