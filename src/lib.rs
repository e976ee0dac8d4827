//! # unepub
//!
//! EPUB partitioning library for Rust.
//!
//! This library breaks an EPUB e-book into an ordered list of typed
//! elements (titles, narrative text, list items, tables) annotated with
//! metadata such as the source filename and the table-of-contents section
//! each element belongs to. Element lists serialize to JSON and back.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unepub::{elements_to_json, partition_epub_file, JsonFormat};
//!
//! fn main() -> unepub::Result<()> {
//!     let elements = partition_epub_file("winter-sports.epub")?;
//!
//!     for element in &elements {
//!         println!("{:?} [{:?}] {}", element.element_type, element.metadata.section, element.text);
//!     }
//!
//!     let json = elements_to_json(&elements, JsonFormat::Pretty)?;
//!     std::fs::write("winter-sports.json", json)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Path or stream input**: files are opened and closed internally, streams are borrowed
//! - **Section alignment**: NCX and EPUB 3 navigation documents map chapters to elements
//! - **Metadata overrides**: filename and modification date can be supplied by the caller
//! - **JSON round trip**: element lists serialize and deserialize losslessly

pub mod auto;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use auto::{partition_auto, DocumentPartitioner, PartitionerRegistry};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_epub, EpubFormat};
pub use error::{Error, Result};
pub use model::{Element, ElementMetadata, ElementType, PackageMetadata, TocEntry};
pub use parser::{EpubParser, PartitionOptions};
pub use render::{
    elements_from_json, elements_to_json, elements_to_text, JsonFormat, PartitionStats,
};
pub use source::{FileSystemDates, FixedDate, InputStream, LastModifiedLookup, Source};

use std::io::Cursor;
use std::path::Path;

/// Partition an EPUB given either a path or an open stream.
///
/// Exactly one of `filename` and `file` must be given; anything else fails
/// with [`Error::InputConflict`]. A file opened from `filename` is closed
/// before this returns. A caller-supplied `file` is read from its current
/// position and left open.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
/// use std::path::Path;
/// use unepub::{partition_epub, PartitionOptions};
///
/// let options = PartitionOptions::new().with_metadata_filename("test");
///
/// let by_path = partition_epub(Some(Path::new("book.epub")), None, &options)?;
///
/// let mut file = File::open("book.epub")?;
/// let by_stream = partition_epub(None, Some(&mut file), &options)?;
/// assert_eq!(by_path.len(), by_stream.len());
/// # Ok::<(), unepub::Error>(())
/// ```
pub fn partition_epub<'a>(
    filename: Option<&'a Path>,
    file: Option<&'a mut dyn InputStream>,
    options: &PartitionOptions,
) -> Result<Vec<Element>> {
    let source = Source::from_parts(filename, file)?;
    let mut parser = EpubParser::from_source(source, options)?;
    parser.parse()
}

/// Partition an EPUB file with default options.
///
/// # Example
///
/// ```no_run
/// use unepub::partition_epub_file;
///
/// let elements = partition_epub_file("book.epub").unwrap();
/// println!("Elements: {}", elements.len());
/// ```
pub fn partition_epub_file<P: AsRef<Path>>(path: P) -> Result<Vec<Element>> {
    partition_epub_file_with_options(path, &PartitionOptions::default())
}

/// Partition an EPUB file with custom options.
///
/// # Example
///
/// ```no_run
/// use unepub::{partition_epub_file_with_options, PartitionOptions};
///
/// let options = PartitionOptions::new()
///     .with_last_modified("2020-07-05T09:24:28")
///     .without_metadata();
/// let elements = partition_epub_file_with_options("book.epub", &options).unwrap();
/// ```
pub fn partition_epub_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &PartitionOptions,
) -> Result<Vec<Element>> {
    partition_epub(Some(path.as_ref()), None, options)
}

/// Partition an EPUB read from a stream.
///
/// # Example
///
/// ```no_run
/// use unepub::partition_epub_reader;
/// use std::fs::File;
///
/// let mut file = File::open("book.epub").unwrap();
/// let elements = partition_epub_reader(&mut file).unwrap();
/// ```
pub fn partition_epub_reader<R: InputStream>(reader: &mut R) -> Result<Vec<Element>> {
    partition_epub_reader_with_options(reader, &PartitionOptions::default())
}

/// Partition an EPUB read from a stream with custom options.
pub fn partition_epub_reader_with_options<R: InputStream>(
    reader: &mut R,
    options: &PartitionOptions,
) -> Result<Vec<Element>> {
    partition_epub(None, Some(reader), options)
}

/// Partition an EPUB held in memory.
pub fn partition_epub_bytes(data: &[u8], options: &PartitionOptions) -> Result<Vec<Element>> {
    let mut cursor = Cursor::new(data);
    partition_epub(None, Some(&mut cursor), options)
}

/// Rebuild elements from JSON produced by [`elements_to_json`].
///
/// # Example
///
/// ```no_run
/// use unepub::{elements_to_json, partition_epub_file, partition_json, JsonFormat};
///
/// let elements = partition_epub_file("book.epub")?;
/// let json = elements_to_json(&elements, JsonFormat::Compact)?;
/// assert_eq!(partition_json(&json)?, elements);
/// # Ok::<(), unepub::Error>(())
/// ```
pub fn partition_json(text: &str) -> Result<Vec<Element>> {
    elements_from_json(text)
}

/// Rebuild elements from a JSON file.
pub fn partition_json_file<P: AsRef<Path>>(path: P) -> Result<Vec<Element>> {
    render::elements_from_json_file(path)
}

/// Builder for partitioning EPUB documents.
///
/// # Example
///
/// ```no_run
/// use unepub::{JsonFormat, Unepub};
///
/// let json = Unepub::new()
///     .with_metadata_filename("winter-sports.epub")
///     .with_last_modified("2020-07-05T09:24:28")
///     .partition("downloads/book.epub")?
///     .to_json(JsonFormat::Pretty)?;
/// # Ok::<(), unepub::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Unepub {
    options: PartitionOptions,
}

impl Unepub {
    /// Create a new Unepub builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `filename` instead of the inferred one.
    pub fn with_metadata_filename(mut self, filename: impl Into<String>) -> Self {
        self.options = self.options.with_metadata_filename(filename);
        self
    }

    /// Record `timestamp` instead of the source's modification date.
    pub fn with_last_modified(mut self, timestamp: impl Into<String>) -> Self {
        self.options = self.options.with_last_modified(timestamp);
        self
    }

    /// Produce elements without metadata.
    pub fn without_metadata(mut self) -> Self {
        self.options = self.options.without_metadata();
        self
    }

    /// Replace the modification-date lookup.
    pub fn with_date_lookup(mut self, lookup: impl LastModifiedLookup + 'static) -> Self {
        self.options = self.options.with_date_lookup(lookup);
        self
    }

    /// Options the builder has collected so far.
    pub fn options(&self) -> &PartitionOptions {
        &self.options
    }

    /// Partition an EPUB file.
    pub fn partition<P: AsRef<Path>>(self, path: P) -> Result<UnepubResult> {
        self.run(Source::Path(path.as_ref()))
    }

    /// Partition an EPUB read from a stream.
    pub fn partition_reader<R: InputStream>(self, reader: &mut R) -> Result<UnepubResult> {
        self.run(Source::Stream(reader))
    }

    /// Partition an EPUB held in memory.
    pub fn partition_bytes(self, data: &[u8]) -> Result<UnepubResult> {
        let mut cursor = Cursor::new(data);
        self.run(Source::Stream(&mut cursor))
    }

    fn run(self, source: Source<'_>) -> Result<UnepubResult> {
        let mut parser = EpubParser::from_source(source, &self.options)?;
        let elements = parser.parse()?;
        Ok(UnepubResult {
            elements,
            package: parser.package_metadata().clone(),
        })
    }
}

/// Result of partitioning an EPUB document.
#[derive(Debug, Clone)]
pub struct UnepubResult {
    /// The partitioned elements
    pub elements: Vec<Element>,
    /// Dublin Core metadata from the package document
    pub package: PackageMetadata,
}

impl UnepubResult {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        elements_to_json(&self.elements, format)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        elements_to_text(&self.elements)
    }

    /// Collect statistics over the elements.
    pub fn stats(&self) -> PartitionStats {
        PartitionStats::from_elements(&self.elements)
    }

    /// Distinct section labels in reading order.
    pub fn sections(&self) -> Vec<String> {
        self.stats().sections
    }

    /// Get the elements.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Take the elements.
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}
