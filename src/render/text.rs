//! Plain text rendering for element sequences.

use crate::model::Element;

/// Join element texts with blank lines, skipping empty elements.
pub fn elements_to_text(elements: &[Element]) -> String {
    elements
        .iter()
        .filter(|element| !element.is_empty())
        .map(|element| element.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
