//! Input sources and modification-date lookup.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::error::{Error, Result};

/// Format used for `last_modified` metadata.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A readable byte stream supplied by the caller.
///
/// Implementors that know their modification time (files) report it so the
/// stream form can fill `last_modified` like the path form does.
pub trait InputStream: Read {
    /// Modification time of the underlying resource, if known.
    fn last_modified(&self) -> Option<SystemTime> {
        None
    }
}

impl InputStream for File {
    fn last_modified(&self) -> Option<SystemTime> {
        self.metadata().ok()?.modified().ok()
    }
}

impl<R: InputStream> InputStream for BufReader<R> {
    fn last_modified(&self) -> Option<SystemTime> {
        self.get_ref().last_modified()
    }
}

impl<T: AsRef<[u8]>> InputStream for Cursor<T> {}

impl InputStream for &[u8] {}

/// Where the EPUB bytes come from.
pub enum Source<'a> {
    /// A file opened and closed by the partitioner
    Path(&'a Path),
    /// A caller-owned stream, read but never closed
    Stream(&'a mut dyn InputStream),
}

impl<'a> Source<'a> {
    /// Build a source from mutually exclusive inputs.
    pub fn from_parts(
        filename: Option<&'a Path>,
        file: Option<&'a mut dyn InputStream>,
    ) -> Result<Self> {
        match (filename, file) {
            (Some(path), None) => Ok(Source::Path(path)),
            (None, Some(stream)) => Ok(Source::Stream(stream)),
            (Some(_), Some(_)) => Err(Error::InputConflict(
                "only one of filename or file may be specified".into(),
            )),
            (None, None) => Err(Error::InputConflict(
                "exactly one of filename or file must be specified".into(),
            )),
        }
    }

    /// Path of the source, if it has one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Source::Path(path) => Some(path),
            Source::Stream(_) => None,
        }
    }

    /// Read the whole source into memory.
    ///
    /// A path source's file handle lives only for the duration of this call.
    pub fn read_all(&mut self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        match self {
            Source::Path(path) => {
                let mut file = File::open(path)?;
                file.read_to_end(&mut data)?;
            }
            Source::Stream(stream) => {
                stream.read_to_end(&mut data)?;
            }
        }
        Ok(data)
    }

    /// Look up the modification date through `lookup`.
    pub fn last_modified(&self, lookup: &dyn LastModifiedLookup) -> Option<String> {
        match self {
            Source::Path(path) => lookup.from_path(path),
            Source::Stream(stream) => lookup.from_stream(&**stream),
        }
    }
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Source::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Strategy for resolving a source's modification date.
///
/// Replace the default through `PartitionOptions::with_date_lookup` to pin
/// dates in tests or to source them from somewhere other than the file system.
pub trait LastModifiedLookup: fmt::Debug + Send + Sync {
    /// Modification date of the file at `path`.
    fn from_path(&self, path: &Path) -> Option<String>;

    /// Modification date of an open stream.
    fn from_stream(&self, stream: &dyn InputStream) -> Option<String>;
}

/// Reads modification times from file system metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemDates;

impl LastModifiedLookup for FileSystemDates {
    fn from_path(&self, path: &Path) -> Option<String> {
        let modified = std::fs::metadata(path).ok()?.modified().ok()?;
        Some(format_timestamp(modified))
    }

    fn from_stream(&self, stream: &dyn InputStream) -> Option<String> {
        stream.last_modified().map(format_timestamp)
    }
}

/// Returns the same date for every source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedDate(pub String);

impl LastModifiedLookup for FixedDate {
    fn from_path(&self, _path: &Path) -> Option<String> {
        Some(self.0.clone())
    }

    fn from_stream(&self, _stream: &dyn InputStream) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Format a system time as a local `%Y-%m-%dT%H:%M:%S` timestamp.
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(TIMESTAMP_FORMAT).to_string()
}

/// Split a path into its base name and non-empty parent directory.
pub fn split_filename(path: &Path) -> (Option<String>, Option<String>) {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.to_string_lossy().into_owned());
    (name, directory)
}
