// Sentence distribution: which sentences mention each taxonomy node.
//
// Filled during the extraction pass, one object at a time. Objects sharing
// a class merge their sentence indices under that class.

use std::collections::HashMap;

use crate::taxonomy::node::TaxonomyNode;
use crate::taxonomy::sentences::SentenceIndices;

#[derive(Debug, Clone, Default)]
pub struct SentenceDistribution {
    indices: HashMap<String, SentenceIndices>,
}

impl SentenceDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `sentences` into the set registered for `node`.
    pub fn add(&mut self, node: &TaxonomyNode, sentences: &SentenceIndices) {
        self.indices
            .entry(node.label.clone())
            .or_default()
            .merge(sentences);
    }

    pub fn get(&self, label: &str) -> Option<&SentenceIndices> {
        self.indices.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.indices.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
