//! Table of contents parsing (EPUB 2 NCX and EPUB 3 nav documents).

use quick_xml::events::Event;
use quick_xml::Reader;
use scraper::{ElementRef, Html};

use crate::error::Result;
use crate::model::TocEntry;

use super::clean::clean_extra_whitespace;
use super::container::{attribute, resolve_href, text_content};

struct NavPointState {
    children: Vec<TocEntry>,
    text: Option<String>,
    src: Option<String>,
}

impl NavPointState {
    fn new() -> Self {
        Self {
            children: Vec::new(),
            text: None,
            src: None,
        }
    }
}

/// Parse an NCX document. `src` attributes resolve against `ncx_dir`.
///
/// A `navPoint` without a label or target contributes its children to its
/// parent instead of being dropped with them.
pub fn parse_ncx(content: &str, ncx_dir: &str) -> Result<Vec<TocEntry>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<NavPointState> = vec![NavPointState::new()];
    let mut in_nav_map = false;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"navMap" => in_nav_map = true,
                b"navPoint" if in_nav_map => stack.push(NavPointState::new()),
                b"text" => in_text = true,
                b"content" => set_src(&mut stack, attribute(&e, b"src")?),
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"content" => {
                set_src(&mut stack, attribute(&e, b"src")?);
            }
            Event::Text(e) if in_text && in_nav_map => {
                if let Some(state) = stack.last_mut() {
                    let raw = text_content(&e);
                    match &mut state.text {
                        Some(existing) => existing.push_str(&raw),
                        None => state.text = Some(raw),
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"navMap" => in_nav_map = false,
                b"text" => in_text = false,
                b"navPoint" if stack.len() > 1 => {
                    if let Some(state) = stack.pop() {
                        close_nav_point(&mut stack, state, ncx_dir);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(stack.pop().map(|s| s.children).unwrap_or_default())
}

fn set_src(stack: &mut [NavPointState], src: Option<String>) {
    if let Some(state) = stack.last_mut() {
        if state.src.is_none() {
            state.src = src;
        }
    }
}

fn close_nav_point(stack: &mut [NavPointState], state: NavPointState, ncx_dir: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };

    let title = state
        .text
        .map(|t| clean_extra_whitespace(&t))
        .filter(|t| !t.is_empty());
    match (title, state.src) {
        (Some(title), Some(src)) => {
            let mut entry = TocEntry::new(title, resolve_href(ncx_dir, &src));
            entry.children = state.children;
            parent.children.push(entry);
        }
        _ => parent.children.extend(state.children),
    }
}

/// Parse an EPUB 3 navigation document. Hrefs resolve against `nav_dir`.
///
/// Uses the `<nav>` whose `epub:type` contains `toc`, or the first `<nav>`.
pub fn parse_nav(content: &str, nav_dir: &str) -> Vec<TocEntry> {
    let document = Html::parse_document(content);
    let navs: Vec<ElementRef<'_>> = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "nav")
        .collect();

    let toc_nav = navs
        .iter()
        .find(|nav| {
            nav.value()
                .attr("epub:type")
                .is_some_and(|t| t.split_ascii_whitespace().any(|v| v == "toc"))
        })
        .or_else(|| navs.first());

    let Some(nav) = toc_nav else {
        log::debug!("navigation document has no <nav> element");
        return Vec::new();
    };

    let entries = child_elements(*nav)
        .find(|el| matches!(el.value().name(), "ol" | "ul"))
        .map(|list| parse_nav_list(list, nav_dir))
        .unwrap_or_default();
    entries
}

fn parse_nav_list(list: ElementRef<'_>, nav_dir: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();

    for li in child_elements(list).filter(|el| el.value().name() == "li") {
        let mut title = None;
        let mut href = None;
        let mut children = Vec::new();

        for child in child_elements(li) {
            match child.value().name() {
                "a" => {
                    title = Some(clean_extra_whitespace(&child.text().collect::<String>()));
                    href = child.value().attr("href").map(str::to_string);
                }
                "span" if title.is_none() => {
                    title = Some(clean_extra_whitespace(&child.text().collect::<String>()));
                }
                "ol" | "ul" => children = parse_nav_list(child, nav_dir),
                _ => {}
            }
        }

        match (title.filter(|t| !t.is_empty()), href) {
            (Some(title), Some(href)) => {
                let mut entry = TocEntry::new(title, resolve_href(nav_dir, &href));
                entry.children = children;
                entries.push(entry);
            }
            _ => entries.extend(children),
        }
    }

    entries
}

fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NCX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head><meta name="dtb:uid" content="id"/></head>
  <docTitle><text>Winter Sports</text></docTitle>
  <navMap>
    <navPoint id="np-1" playOrder="1">
      <navLabel><text>CHAPTER I
        THE SUN-SEEKER</text></navLabel>
      <content src="text/ch01.xhtml#pgepubid00001"/>
      <navPoint id="np-2" playOrder="2">
        <navLabel><text>Rinks &amp; Skaters</text></navLabel>
        <content src="text/ch02.xhtml"/>
      </navPoint>
    </navPoint>
    <navPoint id="np-3" playOrder="3">
      <navLabel><text></text></navLabel>
      <content src="text/ch03.xhtml"/>
      <navPoint id="np-4" playOrder="4">
        <navLabel><text>Orphaned child</text></navLabel>
        <content src="text/ch04.xhtml"/>
      </navPoint>
    </navPoint>
  </navMap>
</ncx>"#;

    #[test]
    fn test_parse_ncx() {
        let toc = parse_ncx(NCX, "OEBPS").unwrap();

        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].title, "CHAPTER I THE SUN-SEEKER");
        assert_eq!(toc[0].href, "OEBPS/text/ch01.xhtml#pgepubid00001");
        assert_eq!(toc[0].children.len(), 1);
        assert_eq!(toc[0].children[0].title, "Rinks & Skaters");

        // Untitled point is dropped, its child promoted.
        assert_eq!(toc[1].title, "Orphaned child");
        assert_eq!(toc[1].href, "OEBPS/text/ch04.xhtml");
    }

    #[test]
    fn test_parse_ncx_ignores_doc_title() {
        let toc = parse_ncx(NCX, "").unwrap();
        assert!(toc.iter().all(|e| e.title != "Winter Sports"));
    }

    #[test]
    fn test_parse_nav() {
        let nav = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
<head><title>Contents</title></head>
<body>
  <nav epub:type="landmarks"><ol><li><a href="cover.xhtml">Cover</a></li></ol></nav>
  <nav epub:type="toc" id="toc">
    <h1>Contents</h1>
    <ol>
      <li><a href="text/ch01.xhtml">Chapter One</a>
        <ol><li><a href="text/ch01.xhtml#s1">Section 1.1</a></li></ol>
      </li>
      <li><span>Part Two</span>
        <ol><li><a href="../ch02.xhtml">Chapter Two</a></li></ol>
      </li>
    </ol>
  </nav>
</body>
</html>"#;

        let toc = parse_nav(nav, "OEBPS/nav");
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].title, "Chapter One");
        assert_eq!(toc[0].href, "OEBPS/nav/text/ch01.xhtml");
        assert_eq!(toc[0].children[0].href, "OEBPS/nav/text/ch01.xhtml#s1");
        assert_eq!(toc[1].title, "Chapter Two");
        assert_eq!(toc[1].href, "OEBPS/ch02.xhtml");
    }

    #[test]
    fn test_parse_nav_without_nav_element() {
        assert!(parse_nav("<html><body><p>nothing</p></body></html>", "").is_empty());
    }
}
