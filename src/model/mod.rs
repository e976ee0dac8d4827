//! Element model types for partitioned EPUB content.
//!
//! The model is the output of partitioning and the input of rendering: a
//! flat, ordered list of [`Element`]s, each carrying [`ElementMetadata`].

mod element;
mod metadata;
mod package;
mod toc;

pub use element::{element_id_for, Element, ElementType};
pub use metadata::ElementMetadata;
pub use package::PackageMetadata;
pub use toc::{flatten_toc, TocEntry};
