// Topics map: the topic structure of one document.
//
// Taxonomy paths whose root is a relevant top class are bucketed by the
// root's weight; buckets are always read heaviest first, and paths inside
// a bucket are kept heaviest leaf first. After the paths are in place,
// every node on them is mapped to the sentences that mention it.
//
// Built once per document during the extraction pass, read-only afterward
// except for the per-section index shift.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::{debug, warn};

use super::distribution::SentenceDistribution;
use crate::error::{Result, TopicsError};
use crate::taxonomy::lineage::Lineage;
use crate::taxonomy::node::TaxonomyNode;
use crate::taxonomy::object::TaxonomyObject;
use crate::taxonomy::sentences::SentenceIndices;

/// Bucket key: a float weight with a total order.
#[derive(Debug, Clone, Copy)]
struct WeightKey(f32);

impl PartialEq for WeightKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WeightKey {}

impl PartialOrd for WeightKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeightKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TopicsMap {
    paths: BTreeMap<WeightKey, Vec<Lineage>>,
    node_sentences: HashMap<String, SentenceIndices>,
}

impl TopicsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the object's sentences under every node of `classes`.
    pub fn add_object(
        object: &TaxonomyObject,
        classes: &[TaxonomyNode],
        distribution: &mut SentenceDistribution,
    ) -> Result<()> {
        ensure_defined_object(object)?;
        for class in classes {
            distribution.add(class, object.sentences());
        }
        Ok(())
    }

    /// Register the object's sentences under the object itself.
    pub fn add_object_node(
        object: &TaxonomyObject,
        distribution: &mut SentenceDistribution,
    ) -> Result<()> {
        ensure_defined_object(object)?;
        distribution.add(&object.node, object.sentences());
        Ok(())
    }

    /// Build the path buckets and the node → sentences map.
    ///
    /// Every lineage rooted in one of `relevant_classes` is extended with
    /// its instance and bucketed by root weight. The node map is then
    /// rebuilt from `distribution` walking buckets from lightest to
    /// heaviest; a node visited twice keeps its last lookup. Nodes missing
    /// from the distribution map to an empty set.
    pub fn generate(
        &mut self,
        objects: &[TaxonomyObject],
        relevant_classes: &HashMap<String, TaxonomyNode>,
        distribution: &SentenceDistribution,
    ) -> Result<()> {
        for object in objects {
            self.add_relevant_paths(object, relevant_classes)?;
        }

        let mut node_sentences: HashMap<String, SentenceIndices> = HashMap::new();
        for path in self.paths.values().flatten() {
            for node in path.nodes() {
                let sentences = distribution.get(&node.label).cloned().unwrap_or_default();
                if let Some(previous) = node_sentences.insert(node.label.clone(), sentences) {
                    if previous != node_sentences[&node.label] {
                        warn!(
                            node = node.label.as_str(),
                            "Node revisited with different sentence indices, keeping the last"
                        );
                    }
                }
            }
        }
        self.node_sentences = node_sentences;

        debug!(
            buckets = self.paths.len(),
            nodes = self.node_sentences.len(),
            "Generated topics map"
        );

        Ok(())
    }

    /// Sentences associated with `node`, if the node is on a topic path.
    pub fn sentence_indices(&self, node: &TaxonomyNode) -> Result<Option<&SentenceIndices>> {
        ensure_defined_node(node)?;
        Ok(self.node_sentences.get(&node.label))
    }

    /// Shift the node's sentence indices by its section offset (`text_index`),
    /// turning section-relative indices into document-absolute ones.
    ///
    /// Each call shifts again: call it once per node per document section.
    pub fn update_sentence_indices(&mut self, node: &TaxonomyNode) -> Result<&SentenceIndices> {
        ensure_defined_node(node)?;
        let sentences = self.node_sentences.get_mut(&node.label).ok_or_else(|| {
            TopicsError::LookupFailure(format!(
                "node {} does not have associated sentences",
                node.label
            ))
        })?;
        sentences.shift_by(node.text_index);
        Ok(&*sentences)
    }

    /// Path sets ordered by descending bucket weight.
    pub fn taxonomy_path_sets(&self) -> Vec<&[Lineage]> {
        self.paths.values().rev().map(|paths| paths.as_slice()).collect()
    }

    /// Bucket weights, heaviest first.
    pub fn bucket_weights(&self) -> Vec<f32> {
        self.paths.keys().rev().map(|key| key.0).collect()
    }

    /// Every node on every path, buckets heaviest first.
    pub fn taxonomy_nodes(&self) -> Vec<&TaxonomyNode> {
        self.paths
            .values()
            .rev()
            .flatten()
            .flat_map(|path| path.nodes())
            .collect()
    }

    pub fn node_sentences(&self) -> &HashMap<String, SentenceIndices> {
        &self.node_sentences
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn add_relevant_paths(
        &mut self,
        object: &TaxonomyObject,
        relevant_classes: &HashMap<String, TaxonomyNode>,
    ) -> Result<()> {
        ensure_defined_object(object)?;
        for lineage in object.lineages() {
            let root = lineage.root();
            if relevant_classes.contains_key(&root.label) {
                self.put(root.weight, lineage.with_instance(&object.node));
            }
        }
        Ok(())
    }

    fn put(&mut self, weight: f32, path: Lineage) {
        let bucket = self.paths.entry(WeightKey(weight)).or_default();
        let leaf_weight = path.leaf().weight;
        let position = bucket
            .iter()
            .position(|existing| existing.leaf().weight < leaf_weight)
            .unwrap_or(bucket.len());
        bucket.insert(position, path);
    }
}

impl fmt::Display for TopicsMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Taxonomy Path Distribution")?;
        writeln!(f, "--------------------------")?;
        for (weight, paths) in self.bucket_weights().iter().zip(self.taxonomy_path_sets()) {
            if let Some(first) = paths.first() {
                writeln!(f, "{} ({weight})", first.root().label)?;
            }
            for path in paths {
                writeln!(f, "  {}   {}", path.label_path(), path.leaf().weight)?;
            }
        }

        if !self.node_sentences.is_empty() {
            writeln!(f)?;
            let mut labels: Vec<&String> = self.node_sentences.keys().collect();
            labels.sort();
            for label in labels {
                writeln!(f, "{label}: {}", self.node_sentences[label])?;
            }
        }
        Ok(())
    }
}

fn ensure_defined_node(node: &TaxonomyNode) -> Result<()> {
    if !node.is_defined() {
        return Err(TopicsError::InvalidArgument(
            "Cannot access sentence indices of an undefined node".to_string(),
        ));
    }
    Ok(())
}

fn ensure_defined_object(object: &TaxonomyObject) -> Result<()> {
    if !object.node.is_defined() {
        return Err(TopicsError::InvalidArgument(
            "Cannot add an undefined taxonomy object to the topics map".to_string(),
        ));
    }
    Ok(())
}
