//! Statistics over a partitioned element sequence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Element, ElementType};

/// Statistics collected from a list of elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionStats {
    /// Total number of elements
    pub element_count: usize,

    /// Number of elements per type name
    pub type_counts: BTreeMap<String, usize>,

    /// Distinct section labels, in first-seen order
    pub sections: Vec<String>,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: usize,

    /// Character count (excluding whitespace)
    pub char_count: usize,
}

impl PartitionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from `elements`.
    pub fn from_elements(elements: &[Element]) -> Self {
        let mut stats = Self::new();
        for element in elements {
            stats.add(element);
        }
        stats
    }

    /// Count one element.
    pub fn add(&mut self, element: &Element) {
        self.element_count += 1;
        *self
            .type_counts
            .entry(element.element_type.as_str().to_string())
            .or_insert(0) += 1;

        if let Some(section) = &element.metadata.section {
            if !self.sections.contains(section) {
                self.sections.push(section.clone());
            }
        }

        self.count_text(&element.text);
    }

    /// Count words and characters from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count();
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count();
    }

    /// Number of elements of `element_type`.
    pub fn count_of(&self, element_type: ElementType) -> usize {
        self.type_counts
            .get(element_type.as_str())
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementMetadata;

    fn in_section(element_type: ElementType, text: &str, section: &str) -> Element {
        let metadata = ElementMetadata {
            section: Some(section.to_string()),
            ..Default::default()
        };
        Element::new(element_type, text, metadata)
    }

    #[test]
    fn test_count_text() {
        let mut stats = PartitionStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_from_elements() {
        let elements = vec![
            Element::narrative("Before any chapter."),
            in_section(ElementType::Title, "CHAPTER I", "CHAPTER I THE SUN-SEEKER"),
            in_section(ElementType::NarrativeText, "Warm sun.", "CHAPTER I THE SUN-SEEKER"),
            in_section(ElementType::ListItem, "Skates", "CHAPTER II RINKS AND SKATERS"),
        ];

        let stats = PartitionStats::from_elements(&elements);
        assert_eq!(stats.element_count, 4);
        assert_eq!(stats.count_of(ElementType::NarrativeText), 2);
        assert_eq!(stats.count_of(ElementType::Table), 0);
        assert_eq!(
            stats.sections,
            vec!["CHAPTER I THE SUN-SEEKER", "CHAPTER II RINKS AND SKATERS"]
        );
        assert_eq!(stats.word_count, 8);
    }
}
