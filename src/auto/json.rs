//! Partitioner that reloads elements serialized as JSON.

use std::path::Path;

use crate::error::Result;
use crate::model::{Element, ElementMetadata};
use crate::parser::PartitionOptions;
use crate::render::elements_from_json;

use super::DocumentPartitioner;

/// Partitioner for JSON element arrays.
///
/// Elements keep the metadata they were serialized with, except that
/// `include_metadata = false` clears it and `metadata_filename` /
/// `metadata_last_modified` replace the stored values.
#[derive(Debug, Clone, Default)]
pub struct JsonPartitioner {
    _private: (),
}

impl JsonPartitioner {
    /// Create a new JSON partitioner.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn apply_options(&self, mut elements: Vec<Element>, options: &PartitionOptions) -> Vec<Element> {
        for element in &mut elements {
            if !options.include_metadata {
                element.metadata = ElementMetadata::default();
                continue;
            }
            if let Some(filename) = &options.metadata_filename {
                element.metadata.filename = Some(filename.clone());
            }
            if let Some(last_modified) = &options.metadata_last_modified {
                element.metadata.last_modified = Some(last_modified.clone());
            }
        }
        elements
    }
}

impl DocumentPartitioner for JsonPartitioner {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn partition(&self, path: &Path, options: &PartitionOptions) -> Result<Vec<Element>> {
        let bytes = std::fs::read(path)?;
        self.partition_bytes(&bytes, options)
    }

    fn partition_bytes(&self, bytes: &[u8], options: &PartitionOptions) -> Result<Vec<Element>> {
        let elements = elements_from_json(&String::from_utf8_lossy(bytes))?;
        Ok(self.apply_options(elements, options))
    }
}
