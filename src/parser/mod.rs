//! EPUB parsing module.

mod annotate;
mod classify;
mod clean;
mod container;
mod epub_parser;
mod html;
mod options;
mod sections;
mod toc;

pub use annotate::MetadataAnnotator;
pub use classify::{classify_text, is_possible_narrative_text, is_possible_title};
pub use clean::{clean_extra_whitespace, TextCleaner};
pub use container::{
    resolve_href, EpubContainer, ManifestItem, OpfPackage, SpineItem, CONTAINER_PATH,
};
pub use epub_parser::EpubParser;
pub use html::{ElementDraft, Emphasis, HtmlExtractor, Link};
pub use options::PartitionOptions;
pub use sections::{SectionIndex, SectionTracker};
pub use toc::{parse_nav, parse_ncx};
