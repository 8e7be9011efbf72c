// Topic extraction pass for a single document.
//
// Given a classified document, this module:
// 1. Optionally propagates object weights along their lineages
// 2. Registers every object's sentences under itself and its classes
// 3. Selects the top classes and builds the topics map
// 4. Shifts section-relative sentence indices to absolute ones
// 5. Ranks the most relevant lineages
// 6. Returns a serializable TopicsReport

use std::collections::{BTreeMap, HashSet};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::scoring::lineage::RelevantLineage;
use crate::scoring::node::NodeScore;
use crate::taxonomy::document::Document;
use crate::taxonomy::node::TaxonomyNode;
use crate::topics::distribution::SentenceDistribution;
use crate::topics::map::TopicsMap;

/// One weight bucket of the topics map, rendered as label paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicBucket {
    pub weight: f32,
    pub paths: Vec<String>,
}

/// Everything the extraction pass produces for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicsReport {
    pub generated_at: DateTime<Utc>,
    /// Heaviest classes, best first
    pub top_nodes: Vec<TaxonomyNode>,
    /// Most relevant lineages, best first, one per class path
    pub lineages: Vec<RelevantLineage>,
    /// Topic path buckets, heaviest first
    pub topics: Vec<TopicBucket>,
    /// Node label → absolute sentence indices
    pub node_sentences: BTreeMap<String, Vec<u32>>,
}

/// Build the topics map of a document with absolute sentence indices.
pub fn build_topics_map(document: &Document, node_score: &NodeScore) -> crate::error::Result<TopicsMap> {
    let mut distribution = SentenceDistribution::new();
    for object in document.objects() {
        TopicsMap::add_object_node(object, &mut distribution)?;
        for lineage in object.lineages() {
            TopicsMap::add_object(object, lineage.nodes(), &mut distribution)?;
        }
    }

    let relevant_classes = node_score.relevant_classes_map(document)?;
    let mut topics_map = TopicsMap::new();
    topics_map.generate(document.objects(), &relevant_classes, &distribution)?;

    // Shift once per node label; the first occurrence carries the section offset
    let mut shifted: HashSet<String> = HashSet::new();
    let offset_nodes: Vec<TaxonomyNode> = topics_map
        .taxonomy_nodes()
        .into_iter()
        .filter(|node| shifted.insert(node.label.clone()))
        .filter(|node| node.text_index > 0)
        .cloned()
        .collect();
    for node in &offset_nodes {
        topics_map.update_sentence_indices(node)?;
    }

    Ok(topics_map)
}

/// Run the full extraction pass over one document.
pub fn run(mut document: Document, config: &Config) -> Result<TopicsReport> {
    if config.propagate_weights {
        document.apply_kirchoff();
    }

    let node_score = config.node_score();
    let top_nodes = node_score
        .score(&document)
        .context("Cannot select top classes")?;
    let topics_map =
        build_topics_map(&document, &node_score).context("Cannot build topics map")?;
    let lineages = config
        .lineage_score()
        .score(&document)
        .context("Cannot score lineages")?;

    let topics: Vec<TopicBucket> = topics_map
        .bucket_weights()
        .into_iter()
        .zip(topics_map.taxonomy_path_sets())
        .map(|(weight, paths)| TopicBucket {
            weight,
            paths: paths.iter().map(|p| p.label_path()).collect(),
        })
        .collect();

    let node_sentences: BTreeMap<String, Vec<u32>> = topics_map
        .node_sentences()
        .iter()
        .map(|(label, sentences)| (label.clone(), sentences.values().collect()))
        .collect();

    info!(
        objects = document.objects().len(),
        classes = document.classes().len(),
        top_nodes = top_nodes.len(),
        lineages = lineages.len(),
        buckets = topics.len(),
        "Extracted document topics"
    );

    Ok(TopicsReport {
        generated_at: Utc::now(),
        top_nodes,
        lineages,
        topics,
        node_sentences,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::lineage::Lineage;
    use crate::taxonomy::object::TaxonomyObject;
    use crate::taxonomy::sentences::SentenceIndices;

    fn section_object(label: &str, path: &[(&str, f32)], text_index: u32, sentences: Vec<u32>) -> TaxonomyObject {
        let nodes = path
            .iter()
            .map(|(l, w)| TaxonomyNode::new(*l, *w).with_text_index(text_index))
            .collect();
        let mut object =
            TaxonomyObject::new(TaxonomyNode::new(label, 1.0).with_text_index(text_index));
        object.add_lineage(Lineage::new(nodes).unwrap());
        object.sentences = SentenceIndices::from(sentences);
        object
    }

    #[test]
    fn test_section_offsets_become_absolute() {
        let doc = Document::from_objects(vec![section_object(
            "Rex",
            &[("Animal", 4.0), ("Dog", 2.0)],
            20,
            vec![1, 3],
        )]);
        let map = build_topics_map(&doc, &NodeScore::default()).unwrap();
        let dog = map
            .sentence_indices(&TaxonomyNode::new("Dog", 0.0))
            .unwrap()
            .unwrap();
        assert_eq!(dog.values().collect::<Vec<_>>(), vec![21, 23]);
    }

    #[test]
    fn test_report_for_unclassified_document_fails() {
        let err = run(Document::new(), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("top classes"));
    }
}
