//! Heuristic classification of text runs that carry no structural tag.

use crate::model::ElementType;

/// Longest run, in words, still considered a title.
pub const TITLE_MAX_WORDS: usize = 12;

/// Share of upper-case letters above which text reads as a heading.
const UPPERCASE_THRESHOLD: f32 = 0.5;

/// Classify a cleaned, non-bulleted text run.
pub fn classify_text(text: &str) -> ElementType {
    if is_possible_narrative_text(text) {
        ElementType::NarrativeText
    } else if is_possible_title(text) {
        ElementType::Title
    } else {
        ElementType::Text
    }
}

/// Prose: alphabetic, mostly lower-case, several words, and either closed
/// by sentence punctuation or too long for a title.
pub fn is_possible_narrative_text(text: &str) -> bool {
    let words = text.split_whitespace().count();
    if words < 2 {
        return false;
    }

    let (letters, upper) = letter_counts(text);
    if letters == 0 || upper as f32 / letters as f32 > UPPERCASE_THRESHOLD {
        return false;
    }

    ends_sentence(text) || words > TITLE_MAX_WORDS
}

/// Headings: short, containing letters, not ending like a sentence fragment.
pub fn is_possible_title(text: &str) -> bool {
    let words = text.split_whitespace().count();
    if words == 0 || words > TITLE_MAX_WORDS {
        return false;
    }

    let (letters, _) = letter_counts(text);
    if letters == 0 {
        return false;
    }

    !text.trim_end().ends_with(&[',', '.', ';'][..])
}

fn letter_counts(text: &str) -> (usize, usize) {
    text.chars()
        .filter(|c| c.is_alphabetic())
        .fold((0, 0), |(letters, upper), c| {
            (letters + 1, upper + usize::from(c.is_uppercase()))
        })
}

fn ends_sentence(text: &str) -> bool {
    let trimmed = text.trim_end_matches(&['"', '\'', '\u{201D}', '\u{2019}', ')', ']'][..]);
    trimmed.ends_with(&['.', '!', '?', '\u{2026}', ':', ';'][..])
}
