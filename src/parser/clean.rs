//! Text cleaning applied to every extracted run.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleans raw text gathered from HTML nodes.
pub struct TextCleaner {
    bullet_regex: Regex,
    list_marker_regex: Regex,
    ligature_map: Vec<(&'static str, &'static str)>,
}

impl TextCleaner {
    /// Create a new cleaner.
    pub fn new() -> Self {
        Self {
            // Prose can open with an initial, a numeral or a dash, so free
            // runs only count glyph bullets.
            bullet_regex: Regex::new(r"^\s*[•●○◦▪▫■□‣⁃∙·\*\-]\s+").unwrap(),
            list_marker_regex: Regex::new(
                r"^\s*(?:[•●○◦▪▫■□‣⁃∙·\*\-–—]|\(?\d{1,3}[.)]|\(?[a-zA-Z]\))\s+",
            )
            .unwrap(),
            ligature_map: vec![
                ("\u{FB00}", "ff"),
                ("\u{FB01}", "fi"),
                ("\u{FB02}", "fl"),
                ("\u{FB03}", "ffi"),
                ("\u{FB04}", "ffl"),
            ],
        }
    }

    /// Normalize a run: NFC, ligatures, non-breaking spaces, collapsed whitespace.
    pub fn clean(&self, text: &str) -> String {
        let mut result: String = text.nfc().collect();
        for (ligature, replacement) in &self.ligature_map {
            if result.contains(ligature) {
                result = result.replace(ligature, replacement);
            }
        }
        clean_extra_whitespace(&result.replace(&['\u{00A0}', '\u{202F}'][..], " "))
    }

    /// Whether the text starts with a bullet glyph.
    pub fn is_bulleted(&self, text: &str) -> bool {
        self.bullet_regex.is_match(text)
    }

    /// Remove a leading bullet glyph.
    pub fn strip_bullet(&self, text: &str) -> String {
        self.bullet_regex.replace(text, "").trim().to_string()
    }

    /// Remove a leading bullet or enumeration marker from a list entry.
    pub fn strip_list_marker(&self, text: &str) -> String {
        self.list_marker_regex.replace(text, "").trim().to_string()
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn clean_extra_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
