//! Partitioner registry dispatching on file extensions.
//!
//! Each supported format is a [`DocumentPartitioner`]. The registry maps
//! lowercase extensions to partitioners so callers can partition a file
//! without knowing its format up front.
//!
//! # Example
//!
//! ```no_run
//! use unepub::auto::PartitionerRegistry;
//! use unepub::PartitionOptions;
//! use std::path::Path;
//!
//! fn main() -> unepub::Result<()> {
//!     let registry = PartitionerRegistry::with_defaults();
//!     let elements = registry.partition(Path::new("book.epub"), &PartitionOptions::default())?;
//!     println!("{} elements", elements.len());
//!     Ok(())
//! }
//! ```

mod epub;
mod json;

pub use epub::EpubPartitioner;
pub use json::JsonPartitioner;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::Element;
use crate::parser::PartitionOptions;

/// Trait for format-specific partitioners.
///
/// Implement this trait to add support for a new input format.
pub trait DocumentPartitioner: Send + Sync {
    /// Get the supported file extensions for this partitioner.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["epub"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this partitioner.
    fn name(&self) -> &str;

    /// Partition a file at the given path.
    fn partition(&self, path: &Path, options: &PartitionOptions) -> Result<Vec<Element>>;

    /// Partition in-memory content.
    fn partition_bytes(&self, bytes: &[u8], options: &PartitionOptions) -> Result<Vec<Element>>;

    /// Check if this partitioner supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry of partitioners keyed by extension and name.
pub struct PartitionerRegistry {
    partitioners: HashMap<String, Arc<dyn DocumentPartitioner>>,
    by_name: HashMap<String, Arc<dyn DocumentPartitioner>>,
}

impl PartitionerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            partitioners: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the EPUB and JSON partitioners.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(EpubPartitioner::new()));
        registry.register(Arc::new(JsonPartitioner::new()));
        registry
    }

    /// Register a partitioner for all its supported extensions.
    pub fn register(&mut self, partitioner: Arc<dyn DocumentPartitioner>) {
        for ext in partitioner.supported_extensions() {
            self.partitioners
                .insert(ext.to_lowercase(), partitioner.clone());
        }
        self.by_name
            .insert(partitioner.name().to_lowercase(), partitioner);
    }

    /// Get a partitioner by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentPartitioner>> {
        self.partitioners.get(&ext.to_lowercase()).cloned()
    }

    /// Get a partitioner by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentPartitioner>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.partitioners.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.partitioners.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Partition a file with the partitioner registered for its extension.
    pub fn partition(&self, path: &Path, options: &PartitionOptions) -> Result<Vec<Element>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(format!("{} has no extension", path.display())))?;

        self.lookup(ext)?.partition(path, options)
    }

    /// Partition bytes, choosing the partitioner by `ext`.
    pub fn partition_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &PartitionOptions,
    ) -> Result<Vec<Element>> {
        self.lookup(ext)?.partition_bytes(bytes, options)
    }

    fn lookup(&self, ext: &str) -> Result<Arc<dyn DocumentPartitioner>> {
        self.get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no partitioner for extension: {}", ext)))
    }
}

impl Default for PartitionerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Partition a file with the default registry.
pub fn partition_auto<P: AsRef<Path>>(path: P, options: &PartitionOptions) -> Result<Vec<Element>> {
    PartitionerRegistry::with_defaults().partition(path.as_ref(), options)
}
