//! Integration tests for the partitioner registry.

mod common;

use std::path::Path;
use std::sync::Arc;

use common::{winter_sports_epub, write_fixture};
use unepub::auto::{
    partition_auto, DocumentPartitioner, EpubPartitioner, JsonPartitioner, PartitionerRegistry,
};
use unepub::error::Result;
use unepub::{elements_to_json, Element, Error, JsonFormat, PartitionOptions};

/// Mock partitioner for testing.
struct MockPartitioner {
    extensions: Vec<&'static str>,
    name: &'static str,
}

impl MockPartitioner {
    fn new(extensions: Vec<&'static str>, name: &'static str) -> Self {
        Self { extensions, name }
    }
}

impl DocumentPartitioner for MockPartitioner {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn partition(&self, _path: &Path, _options: &PartitionOptions) -> Result<Vec<Element>> {
        Ok(vec![Element::narrative(format!("Partitioned by {}", self.name))])
    }

    fn partition_bytes(&self, _bytes: &[u8], _options: &PartitionOptions) -> Result<Vec<Element>> {
        Ok(vec![Element::narrative(format!(
            "Partitioned bytes by {}",
            self.name
        ))])
    }
}

#[test]
fn test_registry_new() {
    let registry = PartitionerRegistry::new();

    // Empty registry should support nothing
    assert!(!registry.supports("epub"));
    assert!(!registry.supports("json"));
}

#[test]
fn test_registry_with_defaults() {
    let registry = PartitionerRegistry::with_defaults();

    assert!(registry.supports("epub"));
    assert!(registry.supports("EPUB")); // Case insensitive
    assert!(registry.supports("json"));
    assert!(!registry.supports("docx"));
}

#[test]
fn test_registry_register() {
    let mut registry = PartitionerRegistry::new();
    registry.register(Arc::new(MockPartitioner::new(vec!["txt", "text"], "text")));

    assert!(registry.supports("txt"));
    assert!(registry.supports("text"));
    assert!(registry.supports("TXT"));

    let elements = registry
        .partition(Path::new("notes.TXT"), &PartitionOptions::default())
        .unwrap();
    assert_eq!(elements[0].text, "Partitioned by text");

    let elements = registry
        .partition_bytes(b"", "text", &PartitionOptions::default())
        .unwrap();
    assert_eq!(elements[0].text, "Partitioned bytes by text");
}

#[test]
fn test_registry_get_by_name() {
    let registry = PartitionerRegistry::with_defaults();

    assert!(registry.get_by_name("epub").is_some());
    assert!(registry.get_by_name("EPUB").is_some());
    assert!(registry.get_by_name("unknown").is_none());
}

#[test]
fn test_registry_multiple_partitioners() {
    let mut registry = PartitionerRegistry::with_defaults();
    registry.register(Arc::new(MockPartitioner::new(vec!["doc", "docx"], "word")));

    assert!(registry.supports("epub"));
    assert!(registry.supports("docx"));

    let partitioner = registry.get_by_name("word");
    assert!(partitioner.is_some());
    assert!(partitioner.unwrap().supports_extension("DOC"));
}

#[test]
fn test_registry_unsupported_extension() {
    let registry = PartitionerRegistry::with_defaults();
    let result = registry.partition(Path::new("book.mobi"), &PartitionOptions::default());
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}

#[test]
fn test_partition_auto_epub_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let epub_path = write_fixture(dir.path(), "winter-sports.epub", &winter_sports_epub());

    let elements = partition_auto(&epub_path, &PartitionOptions::default()).unwrap();
    assert!(!elements.is_empty());
    assert_eq!(
        elements[0].metadata.filename.as_deref(),
        Some("winter-sports.epub")
    );

    let json = elements_to_json(&elements, JsonFormat::Pretty).unwrap();
    let json_path = write_fixture(dir.path(), "winter-sports.json", json.as_bytes());
    let restored = partition_auto(&json_path, &PartitionOptions::default()).unwrap();
    assert_eq!(restored, elements);
}

#[test]
fn test_epub_partitioner_bytes() {
    let partitioner = EpubPartitioner::new();
    let options = PartitionOptions::new().with_metadata_filename("test");

    let elements = partitioner
        .partition_bytes(&winter_sports_epub(), &options)
        .unwrap();
    assert!(elements
        .iter()
        .all(|e| e.metadata.filename.as_deref() == Some("test")));
}

#[test]
fn test_json_partitioner_name() {
    let partitioner = JsonPartitioner::new();
    assert_eq!(partitioner.name(), "json");
    assert_eq!(partitioner.supported_extensions(), &["json"]);
}
