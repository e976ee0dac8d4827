//! Partitioning options and configuration.

use std::sync::Arc;

use crate::source::{FileSystemDates, LastModifiedLookup};

/// Options for partitioning EPUB documents.
#[derive(Debug, Clone)]
pub struct PartitionOptions {
    /// Filename to record instead of the one inferred from the path
    pub metadata_filename: Option<String>,

    /// Timestamp to record instead of the source's modification date
    pub metadata_last_modified: Option<String>,

    /// Whether elements carry metadata at all
    pub include_metadata: bool,

    /// How modification dates are looked up
    pub date_lookup: Arc<dyn LastModifiedLookup>,
}

impl PartitionOptions {
    /// Create new partition options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the recorded filename.
    pub fn with_metadata_filename(mut self, filename: impl Into<String>) -> Self {
        self.metadata_filename = Some(filename.into());
        self
    }

    /// Override the recorded modification date.
    pub fn with_last_modified(mut self, timestamp: impl Into<String>) -> Self {
        self.metadata_last_modified = Some(timestamp.into());
        self
    }

    /// Enable or disable metadata.
    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    /// Produce elements without any metadata.
    pub fn without_metadata(mut self) -> Self {
        self.include_metadata = false;
        self
    }

    /// Replace the modification-date lookup.
    pub fn with_date_lookup(mut self, lookup: impl LastModifiedLookup + 'static) -> Self {
        self.date_lookup = Arc::new(lookup);
        self
    }
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            metadata_filename: None,
            metadata_last_modified: None,
            include_metadata: true,
            date_lookup: Arc::new(FileSystemDates),
        }
    }
}
