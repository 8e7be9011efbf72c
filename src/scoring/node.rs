// Node scoring: select the heaviest taxonomy classes of a document.
//
// The top classes act as the relevance filter for lineage scoring: only
// lineages passing through one of them are considered.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{Result, TopicsError};
use crate::taxonomy::document::Document;
use crate::taxonomy::node::TaxonomyNode;

/// Default number of top classes kept per document.
pub const DEFAULT_NUM_TOP_NODES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeScore {
    pub num_top_nodes: usize,
}

impl Default for NodeScore {
    fn default() -> Self {
        Self {
            num_top_nodes: DEFAULT_NUM_TOP_NODES,
        }
    }
}

impl NodeScore {
    pub fn new(num_top_nodes: usize) -> Self {
        Self { num_top_nodes }
    }

    /// Up to `num_top_nodes` classes of the document, heaviest first.
    ///
    /// Equal weights keep the document's class insertion order.
    pub fn score(&self, document: &Document) -> Result<Vec<TaxonomyNode>> {
        Ok(self
            .rank(document)?
            .into_iter()
            .take(self.num_top_nodes)
            .cloned()
            .collect())
    }

    /// Labels of the top classes, the lookup set used by lineage scoring.
    pub fn relevant_classes(&self, document: &Document) -> Result<HashSet<String>> {
        Ok(self
            .rank(document)?
            .into_iter()
            .take(self.num_top_nodes)
            .map(|node| node.label.clone())
            .collect())
    }

    /// Top classes keyed by label, as consumed by the topics map.
    pub fn relevant_classes_map(&self, document: &Document) -> Result<HashMap<String, TaxonomyNode>> {
        Ok(self
            .score(document)?
            .into_iter()
            .map(|node| (node.label.clone(), node))
            .collect())
    }

    fn rank<'a>(&self, document: &'a Document) -> Result<Vec<&'a TaxonomyNode>> {
        if !document.is_classified() {
            return Err(TopicsError::InvalidArgument(
                "Cannot extract top classes from a document without classified nodes".to_string(),
            ));
        }

        let mut ranked: Vec<&TaxonomyNode> = document.classes().iter().collect();
        ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));

        debug!(
            classes = ranked.len(),
            top = ranked[0].label.as_str(),
            top_weight = ranked[0].weight,
            "Ranked taxonomy classes"
        );

        Ok(ranked)
    }
}
