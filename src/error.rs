//! Error types for unepub library.

use std::io;
use thiserror::Error;

/// Result type alias for unepub operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during EPUB partitioning.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the source file or stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Both or neither of a path and a stream were supplied.
    #[error("Input conflict: {0}")]
    InputConflict(String),

    /// The input is not a ZIP container and cannot be an EPUB.
    #[error("Unknown file format: not a valid EPUB")]
    UnknownFormat,

    /// Error reading the ZIP container.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error parsing one of the package XML documents.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// The container or package document is structurally invalid.
    #[error("Invalid EPUB: {0}")]
    InvalidEpub(String),

    /// A file referenced by the package is missing from the archive.
    #[error("Missing archive entry: {0}")]
    MissingEntry(String),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No partitioner is registered for the given format.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// Whether the error stems from a malformed container or package document.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownFormat
                | Error::Archive(_)
                | Error::Xml(_)
                | Error::InvalidEpub(_)
                | Error::MissingEntry(_)
        )
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(e) => Error::Io(io::Error::new(e.kind(), e.to_string())),
            _ => Error::Xml(err.to_string()),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}
