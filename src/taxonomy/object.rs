// Taxonomy object: a concrete entity extracted from text.
//
// An object may sit under several classification branches at once (a
// "jaguar" is both an animal and a car maker), so it owns a list of
// lineages plus the sentences where its surface form appears.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::lineage::Lineage;
use super::node::TaxonomyNode;
use super::sentences::SentenceIndices;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyObject {
    /// The instance itself: label, weight and section offset
    pub node: TaxonomyNode,
    #[serde(default)]
    pub lineages: Vec<Lineage>,
    #[serde(default)]
    pub sentences: SentenceIndices,
}

impl TaxonomyObject {
    pub fn new(node: TaxonomyNode) -> Self {
        Self {
            node,
            lineages: Vec::new(),
            sentences: SentenceIndices::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.node.label
    }

    pub fn weight(&self) -> f32 {
        self.node.weight
    }

    pub fn add_lineage(&mut self, lineage: Lineage) {
        self.lineages.push(lineage);
    }

    pub fn add_sentence_index(&mut self, index: u32) {
        self.sentences.add(index);
    }

    pub fn lineages(&self) -> &[Lineage] {
        &self.lineages
    }

    pub fn sentences(&self) -> &SentenceIndices {
        &self.sentences
    }

    /// Order against a taxonomy node by label only.
    pub fn compare_to(&self, node: &TaxonomyNode) -> Ordering {
        self.node.label.cmp(&node.label)
    }

    /// Root class of every lineage this object belongs to, in lineage order.
    pub fn top_classes(&self) -> impl Iterator<Item = &TaxonomyNode> {
        self.lineages.iter().map(|l| l.root())
    }
}
