//! Per-element metadata.

use serde::{Deserialize, Serialize};

/// Metadata attached to every element.
///
/// Every field is optional. A partition run with metadata disabled produces
/// the `Default` value, where all fields are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementMetadata {
    /// Base name of the source file, or the caller-supplied override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Directory of the source file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_directory: Option<String>,

    /// MIME type of the source document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filetype: Option<String>,

    /// Modification timestamp (`%Y-%m-%dT%H:%M:%S`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    /// Sheet or page name (never set for EPUB sources)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,

    /// Table-of-contents title of the enclosing chapter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Heading depth, 0 for `h1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_depth: Option<u8>,

    /// Targets of hyperlinks inside the element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_urls: Option<Vec<String>>,

    /// Texts of hyperlinks inside the element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_texts: Option<Vec<String>>,

    /// Texts wrapped in emphasis tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emphasized_text_contents: Option<Vec<String>>,

    /// Emphasis tag names, parallel to `emphasized_text_contents`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emphasized_text_tags: Option<Vec<String>>,
}

impl ElementMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
