// A single class (or instance) in a taxonomy hierarchy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One class in a taxonomy/ontology, or the entity instance that closes a lineage.
///
/// Identity is by label: two nodes with the same label describe the same
/// class within a document, whatever their weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyNode {
    pub label: String,
    /// Relevance accumulated by the upstream classifier
    #[serde(default)]
    pub weight: f32,
    /// Depth in the hierarchy, root = 0
    #[serde(default)]
    pub level: i32,
    /// Absolute sentence offset of the document section this node came from
    #[serde(default)]
    pub text_index: u32,
}

impl TaxonomyNode {
    pub fn new(label: impl Into<String>, weight: f32) -> Self {
        Self {
            label: label.into(),
            weight,
            level: 0,
            text_index: 0,
        }
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn with_text_index(mut self, text_index: u32) -> Self {
        self.text_index = text_index;
        self
    }

    /// A node without a label is treated as undefined by every core operation.
    pub fn is_defined(&self) -> bool {
        !self.label.is_empty()
    }

    pub fn same_label(&self, other: &TaxonomyNode) -> bool {
        self.label == other.label
    }
}

impl fmt::Display for TaxonomyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.label, self.weight)
    }
}
