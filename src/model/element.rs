//! Element-level types.

use super::ElementMetadata;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of the hex-encoded element id.
const ELEMENT_ID_LEN: usize = 32;

/// One unit of extracted content, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element category
    #[serde(rename = "type")]
    pub element_type: ElementType,

    /// Deterministic id derived from the text
    pub element_id: String,

    /// Cleaned text content
    pub text: String,

    /// Source and structural metadata
    #[serde(default)]
    pub metadata: ElementMetadata,
}

impl Element {
    /// Create an element, deriving its id from the text.
    pub fn new(element_type: ElementType, text: impl Into<String>, metadata: ElementMetadata) -> Self {
        let text = text.into();
        Self {
            element_type,
            element_id: element_id_for(&text),
            text,
            metadata,
        }
    }

    /// Create a narrative text element without metadata.
    pub fn narrative(text: impl Into<String>) -> Self {
        Self::new(ElementType::NarrativeText, text, ElementMetadata::default())
    }

    /// Create a title element without metadata.
    pub fn title(text: impl Into<String>) -> Self {
        Self::new(ElementType::Title, text, ElementMetadata::default())
    }

    /// Check if this is a title.
    pub fn is_title(&self) -> bool {
        self.element_type == ElementType::Title
    }

    /// Check if the element carries no text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Element category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    /// Heading or short title-like line
    Title,
    /// Running prose
    NarrativeText,
    /// Entry of a bulleted or numbered list
    ListItem,
    /// Text that fits no other category
    Text,
    /// Tabular content flattened to text
    Table,
}

impl ElementType {
    /// Name used in the serialized `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Title => "Title",
            ElementType::NarrativeText => "NarrativeText",
            ElementType::ListItem => "ListItem",
            ElementType::Text => "Text",
            ElementType::Table => "Table",
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SHA-256 of the text, truncated to 32 hex characters.
pub fn element_id_for(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(ELEMENT_ID_LEN);
    id
}
