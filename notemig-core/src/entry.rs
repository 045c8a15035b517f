use crate::properties::Properties;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One note collected from the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    /// File the note was read from.
    pub source: PathBuf,
    /// Source-root-relative path, moved into its notebook directory if it has one.
    pub path: PathBuf,
    /// Text without the metadata block.
    pub body: String,
    pub properties: Properties,
}

/// Collected notes keyed by title.
pub type Notes = BTreeMap<String, Entry>;
