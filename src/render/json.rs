//! JSON serialization of element sequences.

use std::path::Path;

use crate::error::Result;
use crate::model::Element;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize elements to a JSON array, preserving order.
pub fn elements_to_json(elements: &[Element], format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(elements)?,
        JsonFormat::Compact => serde_json::to_string(elements)?,
    };
    Ok(json)
}

/// Rebuild elements from a JSON array produced by [`elements_to_json`].
pub fn elements_from_json(text: &str) -> Result<Vec<Element>> {
    Ok(serde_json::from_str(text)?)
}

/// Rebuild elements from a JSON file.
pub fn elements_from_json_file<P: AsRef<Path>>(path: P) -> Result<Vec<Element>> {
    let text = std::fs::read_to_string(path)?;
    elements_from_json(&text)
}
