//! Package-level (OPF) metadata.

use serde::{Deserialize, Serialize};

/// Dublin Core metadata declared in the OPF package document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Book title
    pub title: Option<String>,

    /// Authors and contributors declared as `dc:creator`
    pub creators: Vec<String>,

    /// Language code
    pub language: Option<String>,

    /// First `dc:identifier`
    pub identifier: Option<String>,

    /// OPF package version (e.g., "2.0", "3.0")
    pub version: Option<String>,
}
