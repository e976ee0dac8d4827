//! EPUB partitioner implementation.

use std::io::Cursor;
use std::path::Path;

use crate::error::Result;
use crate::model::Element;
use crate::parser::PartitionOptions;

use super::DocumentPartitioner;

/// EPUB document partitioner.
#[derive(Debug, Clone, Default)]
pub struct EpubPartitioner {
    _private: (),
}

impl EpubPartitioner {
    /// Create a new EPUB partitioner.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentPartitioner for EpubPartitioner {
    fn supported_extensions(&self) -> &[&str] {
        &["epub"]
    }

    fn name(&self) -> &str {
        "epub"
    }

    fn partition(&self, path: &Path, options: &PartitionOptions) -> Result<Vec<Element>> {
        crate::partition_epub(Some(path), None, options)
    }

    fn partition_bytes(&self, bytes: &[u8], options: &PartitionOptions) -> Result<Vec<Element>> {
        let mut cursor = Cursor::new(bytes);
        crate::partition_epub(None, Some(&mut cursor), options)
    }
}
