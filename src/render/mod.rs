//! Rendering module for converting element sequences to output formats.

mod json;
mod result;
mod text;

pub use json::{elements_from_json, elements_from_json_file, elements_to_json, JsonFormat};
pub use result::PartitionStats;
pub use text::elements_to_text;
