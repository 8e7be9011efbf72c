// Taxonomy lineage: an ordered root-to-leaf chain of classes.
//
// Index 0 is the topmost class, the last index the most specific class or,
// when extended, the entity instance mentioned in the text.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::node::TaxonomyNode;
use crate::error::TopicsError;

/// Separator used by labeled taxonomy paths (`Animal/Mammal/Dog`).
pub const PATH_DELIM: char = '/';

/// A non-empty root-to-leaf chain of taxonomy nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxonomyNode>", into = "Vec<TaxonomyNode>")]
pub struct Lineage {
    nodes: Vec<TaxonomyNode>,
}

impl Lineage {
    pub fn new(nodes: Vec<TaxonomyNode>) -> Result<Self, TopicsError> {
        if nodes.is_empty() {
            return Err(TopicsError::EmptyLineage);
        }
        Ok(Self { nodes })
    }

    /// Build a lineage from bare labels, every node at weight 0 and level = depth.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, TopicsError> {
        let nodes = labels
            .iter()
            .enumerate()
            .map(|(depth, label)| TaxonomyNode::new(label.as_ref(), 0.0).with_level(depth as i32))
            .collect();
        Self::new(nodes)
    }

    /// Parse a `/`-delimited labeled path into a lineage of unweighted nodes.
    pub fn parse(path: &str) -> Result<Self, TopicsError> {
        let labels: Vec<&str> = split_path(path);
        if labels.iter().all(|l| l.is_empty()) {
            return Err(TopicsError::EmptyLineage);
        }
        Self::from_labels(&labels)
    }

    pub fn nodes(&self) -> &[TaxonomyNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [TaxonomyNode] {
        &mut self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> &TaxonomyNode {
        &self.nodes[0]
    }

    pub fn leaf(&self) -> &TaxonomyNode {
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.label.as_str())
    }

    /// Root-to-leaf labels joined with `/`, weights excluded.
    pub fn label_path(&self) -> String {
        self.labels().collect::<Vec<_>>().join("/")
    }

    /// Extend the lineage with a trailing instance node.
    ///
    /// Wikipedia and WordNet do not keep class and instance labels apart,
    /// so an instance carrying the leaf's label is not appended twice.
    pub fn with_instance(&self, instance: &TaxonomyNode) -> Lineage {
        let mut nodes = self.nodes.clone();
        if !self.leaf().same_label(instance) {
            nodes.push(instance.clone());
        }
        Lineage { nodes }
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.nodes.iter().any(|n| n.label == label)
    }
}

impl TryFrom<Vec<TaxonomyNode>> for Lineage {
    type Error = TopicsError;

    fn try_from(nodes: Vec<TaxonomyNode>) -> Result<Self, Self::Error> {
        Lineage::new(nodes)
    }
}

impl From<Lineage> for Vec<TaxonomyNode> {
    fn from(lineage: Lineage) -> Self {
        lineage.nodes
    }
}

impl fmt::Display for Lineage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label_path())
    }
}

/// Split a labeled taxonomy path into its class labels.
///
/// Trailing delimiters are ignored; an empty path yields one empty label.
pub fn split_path(path: &str) -> Vec<&str> {
    path.trim_end_matches(PATH_DELIM).split(PATH_DELIM).collect()
}
