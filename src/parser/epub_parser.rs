//! EPUB document parser producing annotated elements.

use std::io::Cursor;
use std::path::Path;

use crate::error::Result;
use crate::model::{Element, PackageMetadata, TocEntry};
use crate::source::{InputStream, Source};

use super::annotate::MetadataAnnotator;
use super::container::EpubContainer;
use super::html::HtmlExtractor;
use super::options::PartitionOptions;
use super::sections::SectionIndex;

/// EPUB document parser.
pub struct EpubParser {
    container: EpubContainer,
    annotator: MetadataAnnotator,
}

impl EpubParser {
    /// Open an EPUB file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, &PartitionOptions::default())
    }

    /// Open an EPUB file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: &PartitionOptions) -> Result<Self> {
        Self::from_source(Source::Path(path.as_ref()), options)
    }

    /// Parse an EPUB from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_bytes_with_options(data, &PartitionOptions::default())
    }

    /// Parse an EPUB from bytes with custom options.
    pub fn from_bytes_with_options(data: Vec<u8>, options: &PartitionOptions) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        Self::from_source(Source::Stream(&mut cursor), options)
    }

    /// Parse an EPUB from a reader.
    pub fn from_reader<R: InputStream>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, &PartitionOptions::default())
    }

    /// Parse an EPUB from a reader with custom options.
    pub fn from_reader_with_options<R: InputStream>(
        mut reader: R,
        options: &PartitionOptions,
    ) -> Result<Self> {
        Self::from_source(Source::Stream(&mut reader), options)
    }

    /// Read `source` completely and open the container it holds.
    ///
    /// Metadata that depends on the source (name, modification date) is
    /// resolved here, while the source is still at hand.
    pub fn from_source(mut source: Source<'_>, options: &PartitionOptions) -> Result<Self> {
        let data = source.read_all()?;
        let annotator = MetadataAnnotator::new(&source, options);
        let container = EpubContainer::from_bytes(data)?;
        Ok(Self {
            container,
            annotator,
        })
    }

    /// Parse every content document into elements, in reading order.
    pub fn parse(&mut self) -> Result<Vec<Element>> {
        let toc = self.container.read_toc()?;
        let documents = self.container.documents();
        let index = SectionIndex::build(&toc, documents.iter().map(|d| d.path.as_str()));
        log::debug!(
            "{} content documents, {} of {} TOC entries aligned",
            documents.len(),
            index.len(),
            index.len() + index.skipped().len()
        );

        let extractor = HtmlExtractor::new();
        let mut tracker = index.tracker();
        let mut elements = Vec::new();

        for item in &documents {
            let section = tracker.enter(&item.path);
            let content = self.container.read_text(&item.path)?;
            let drafts = extractor.extract(&content);
            log::debug!("{}: {} elements", item.path, drafts.len());

            elements.extend(
                drafts
                    .into_iter()
                    .map(|draft| self.annotator.annotate(draft, section)),
            );
        }

        Ok(elements)
    }

    /// Read the table of contents without partitioning.
    pub fn toc(&mut self) -> Result<Vec<TocEntry>> {
        self.container.read_toc()
    }

    /// Dublin Core metadata from the OPF package.
    pub fn package_metadata(&self) -> &PackageMetadata {
        self.container.metadata()
    }

    /// Archive path of the OPF package document.
    pub fn opf_path(&self) -> &str {
        self.container.opf_path()
    }

    /// Number of content documents in the spine.
    pub fn document_count(&self) -> usize {
        self.container.documents().len()
    }
}
