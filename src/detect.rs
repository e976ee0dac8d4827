//! EPUB format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// EPUB container information gleaned from the leading bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpubFormat {
    /// Whether the first archive entry is an uncompressed `mimetype` file
    /// declaring `application/epub+zip`
    pub mimetype_declared: bool,
}

impl std::fmt::Display for EpubFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.mimetype_declared {
            write!(f, "EPUB")
        } else {
            write!(f, "EPUB (no mimetype entry)")
        }
    }
}

/// MIME type every EPUB declares in its `mimetype` entry.
pub const EPUB_MIME_TYPE: &str = "application/epub+zip";

/// ZIP local file header signature.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// Offset of the file name inside the first local file header.
const FIRST_NAME_OFFSET: usize = 30;
const MIMETYPE_NAME: &[u8] = b"mimetype";
const HEADER_LEN: usize = FIRST_NAME_OFFSET + 8 + 20;

/// Detect EPUB format from a file path.
///
/// # Example
/// ```no_run
/// use unepub::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("book.epub").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<EpubFormat> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut header = Vec::with_capacity(HEADER_LEN);
    reader.take(HEADER_LEN as u64).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect EPUB format from bytes.
///
/// Only the ZIP signature is mandatory. Containers whose first entry is not
/// the `mimetype` file are still accepted, with `mimetype_declared = false`.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<EpubFormat> {
    if data.len() < ZIP_MAGIC.len() || !data.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    Ok(EpubFormat {
        mimetype_declared: declares_epub_mimetype(data),
    })
}

fn declares_epub_mimetype(data: &[u8]) -> bool {
    let name_end = FIRST_NAME_OFFSET + MIMETYPE_NAME.len();
    if data.len() < name_end + EPUB_MIME_TYPE.len() {
        return false;
    }
    &data[FIRST_NAME_OFFSET..name_end] == MIMETYPE_NAME
        && &data[name_end..name_end + EPUB_MIME_TYPE.len()] == EPUB_MIME_TYPE.as_bytes()
}

/// Check if a file looks like an EPUB container.
pub fn is_epub<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}
