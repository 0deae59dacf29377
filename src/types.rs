/*!
 * Core types and data structures for usefullm
 */

use std::collections::BTreeMap;
use std::str::FromStr;

use strum::{Display, EnumString};

use crate::error::UsefullmError;

/// Naming hierarchy of enumerated files.
///
/// Each entry maps a path segment to its children; an entry with no children
/// is a file. Entries are kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    /// Child entries keyed by segment name
    pub children: BTreeMap<String, FileTree>,
}

impl FileTree {
    /// Whether this node has no children (a file, or an empty root)
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A text file loaded for aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    /// Path relative to the enumeration root, `/`-separated
    pub path: String,
    /// Raw file content
    pub content: String,
}

/// Textual notations a [`FileTree`] can be rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TreeFormat {
    /// Nested bullet list
    #[default]
    Markdown,
    /// Nested tags
    Xml,
    /// Box-drawing tree
    Ascii,
}

impl TreeFormat {
    /// Parse a format name, failing with an unsupported-format error
    pub fn parse(name: &str) -> Result<Self, UsefullmError> {
        Self::from_str(name).map_err(|_| UsefullmError::UnsupportedFormat(name.to_string()))
    }
}
