//! Extraction of element drafts from XHTML content documents.

use scraper::{ElementRef, Html, Node};

use crate::model::ElementType;

use super::classify::classify_text;
use super::clean::TextCleaner;

/// Elements whose content is never text.
const SKIPPED_TAGS: &[&str] = &[
    "head", "title", "script", "style", "noscript", "template", "svg", "math",
];

/// Elements that terminate the current text run.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "caption", "center", "dd",
    "details", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form",
    "header", "hgroup", "hr", "html", "main", "nav", "ol", "p", "pre", "section",
    "summary", "ul",
];

/// Inline tags recorded as emphasis.
const EMPHASIS_TAGS: &[&str] = &["b", "strong", "i", "em"];

/// A hyperlink found inside a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Visible link text
    pub text: String,
    /// Target URL as written
    pub url: String,
}

/// Emphasized text found inside a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emphasis {
    /// Emphasized text
    pub text: String,
    /// Tag that produced the emphasis
    pub tag: String,
}

/// An element before metadata is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDraft {
    /// Element category
    pub element_type: ElementType,
    /// Cleaned text
    pub text: String,
    /// Heading depth for titles from `h1`..`h6`
    pub category_depth: Option<u8>,
    /// Links in document order
    pub links: Vec<Link>,
    /// Emphasis in document order
    pub emphasis: Vec<Emphasis>,
}

impl ElementDraft {
    fn new(element_type: ElementType, text: String) -> Self {
        Self {
            element_type,
            text,
            category_depth: None,
            links: Vec::new(),
            emphasis: Vec::new(),
        }
    }
}

/// Converts one content document into a flat list of drafts.
pub struct HtmlExtractor {
    cleaner: TextCleaner,
}

impl HtmlExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self {
            cleaner: TextCleaner::new(),
        }
    }

    /// Extract drafts from an HTML or XHTML document, in document order.
    pub fn extract(&self, html: &str) -> Vec<ElementDraft> {
        let document = Html::parse_document(html);
        let root = document.root_element();
        let body = root
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "body")
            .unwrap_or(root);

        let mut walker = Walker::new(&self.cleaner);
        walker.visit_children(body);
        walker.flush();
        walker.drafts
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Heading(u8),
    ListItem,
}

#[derive(Default)]
struct InlineBuffer {
    text: String,
    links: Vec<Link>,
    emphasis: Vec<Emphasis>,
}

struct Walker<'a> {
    cleaner: &'a TextCleaner,
    drafts: Vec<ElementDraft>,
    buffer: InlineBuffer,
    context: Vec<Context>,
    /// Bumped on every flush so inline spans can tell their text was emitted.
    generation: usize,
}

impl<'a> Walker<'a> {
    fn new(cleaner: &'a TextCleaner) -> Self {
        Self {
            cleaner,
            drafts: Vec::new(),
            buffer: InlineBuffer::default(),
            context: Vec::new(),
            generation: 0,
        }
    }

    fn visit_children(&mut self, el: ElementRef<'_>) {
        for child in el.children() {
            match child.value() {
                Node::Text(text) => self.buffer.text.push_str(text),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.visit_element(child);
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_element(&mut self, el: ElementRef<'_>) {
        let name = el.value().name();
        if SKIPPED_TAGS.contains(&name) {
            return;
        }

        if let Some(level) = heading_level(name) {
            self.visit_scoped(el, Context::Heading(level));
        } else if name == "li" {
            self.visit_scoped(el, Context::ListItem);
        } else if name == "table" {
            self.flush();
            self.push_table(el);
        } else if name == "br" {
            self.buffer.text.push(' ');
        } else if BLOCK_TAGS.contains(&name) {
            self.flush();
            self.visit_children(el);
            self.flush();
        } else {
            self.visit_inline(el, name);
        }
    }

    fn visit_scoped(&mut self, el: ElementRef<'_>, context: Context) {
        self.flush();
        self.context.push(context);
        self.visit_children(el);
        self.flush();
        self.context.pop();
    }

    fn visit_inline(&mut self, el: ElementRef<'_>, name: &str) {
        let generation = self.generation;
        let start = self.buffer.text.len();
        self.visit_children(el);
        if self.generation != generation {
            return;
        }

        let text = self.cleaner.clean(&self.buffer.text[start..]);
        if text.is_empty() {
            return;
        }

        if name == "a" {
            if let Some(url) = el.value().attr("href") {
                self.buffer.links.push(Link {
                    text,
                    url: url.to_string(),
                });
            }
        } else if EMPHASIS_TAGS.contains(&name) {
            self.buffer.emphasis.push(Emphasis {
                text,
                tag: name.to_string(),
            });
        }
    }

    fn push_table(&mut self, table: ElementRef<'_>) {
        let rows: Vec<String> = table
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "tr")
            .map(|row| {
                row.children()
                    .filter_map(ElementRef::wrap)
                    .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                    .map(|cell| self.cleaner.clean(&cell.text().collect::<String>()))
                    .filter(|cell| !cell.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|row| !row.is_empty())
            .collect();

        if !rows.is_empty() {
            self.drafts
                .push(ElementDraft::new(ElementType::Table, rows.join("\n")));
        }
    }

    fn flush(&mut self) {
        let buffer = std::mem::take(&mut self.buffer);
        self.generation += 1;

        let text = self.cleaner.clean(&buffer.text);
        if text.is_empty() {
            return;
        }

        let mut draft = match self.context.last() {
            Some(Context::Heading(level)) => {
                let mut draft = ElementDraft::new(ElementType::Title, text);
                draft.category_depth = Some(level - 1);
                draft
            }
            Some(Context::ListItem) => ElementDraft::new(
                ElementType::ListItem,
                self.cleaner.strip_list_marker(&text),
            ),
            None if self.cleaner.is_bulleted(&text) => {
                ElementDraft::new(ElementType::ListItem, self.cleaner.strip_bullet(&text))
            }
            None => ElementDraft::new(classify_text(&text), text),
        };
        if draft.text.is_empty() {
            return;
        }

        draft.links = buffer.links;
        draft.emphasis = buffer.emphasis;
        self.drafts.push(draft);
    }
}

fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}
