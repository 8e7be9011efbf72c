// Unit tests for the topics map and sentence bookkeeping.
//
// Covers bucket ordering, the instance de-duplication rule, node →
// sentence lookups, the section offset shift, and the frequency array
// behind SentenceIndices.

use std::collections::HashMap;

use lineage::error::TopicsError;
use lineage::taxonomy::lineage::Lineage;
use lineage::taxonomy::node::TaxonomyNode;
use lineage::taxonomy::object::TaxonomyObject;
use lineage::taxonomy::sentences::SentenceIndices;
use lineage::topics::distribution::SentenceDistribution;
use lineage::topics::map::TopicsMap;

fn object(label: &str, path: &[(&str, f32)], sentences: Vec<u32>) -> TaxonomyObject {
    let nodes = path
        .iter()
        .map(|(l, w)| TaxonomyNode::new(*l, *w))
        .collect();
    let mut object = TaxonomyObject::new(TaxonomyNode::new(label, 1.0));
    object.add_lineage(Lineage::new(nodes).unwrap());
    object.sentences = SentenceIndices::from(sentences);
    object
}

fn relevant(labels: &[(&str, f32)]) -> HashMap<String, TaxonomyNode> {
    labels
        .iter()
        .map(|(l, w)| (l.to_string(), TaxonomyNode::new(*l, *w)))
        .collect()
}

fn distribution_of(objects: &[TaxonomyObject]) -> SentenceDistribution {
    let mut distribution = SentenceDistribution::new();
    for object in objects {
        TopicsMap::add_object_node(object, &mut distribution).unwrap();
        for lineage in object.lineages() {
            TopicsMap::add_object(object, lineage.nodes(), &mut distribution).unwrap();
        }
    }
    distribution
}

fn generated(objects: &[TaxonomyObject], classes: &[(&str, f32)]) -> TopicsMap {
    let distribution = distribution_of(objects);
    let mut map = TopicsMap::new();
    map.generate(objects, &relevant(classes), &distribution).unwrap();
    map
}

// ============================================================
// generate: buckets and paths
// ============================================================

#[test]
fn instance_equal_to_leaf_is_not_appended() {
    let objects = vec![object("Leaf", &[("Root", 10.0), ("Leaf", 3.0)], vec![0])];
    let map = generated(&objects, &[("Root", 10.0)]);

    assert_eq!(map.bucket_weights(), vec![10.0]);
    let sets = map.taxonomy_path_sets();
    assert_eq!(sets[0].len(), 1);
    assert_eq!(sets[0][0].label_path(), "Root/Leaf");
}

#[test]
fn instance_is_appended_below_its_classes() {
    let objects = vec![object("Rex", &[("Animal", 5.0), ("Dog", 2.0)], vec![4])];
    let map = generated(&objects, &[("Animal", 5.0)]);
    assert_eq!(map.taxonomy_path_sets()[0][0].label_path(), "Animal/Dog/Rex");
}

#[test]
fn buckets_are_strictly_descending() {
    let objects = vec![
        object("a", &[("Light", 1.0), ("X", 1.0)], vec![0]),
        object("b", &[("Heavy", 8.0), ("Y", 1.0)], vec![1]),
        object("c", &[("Middle", 4.0), ("Z", 1.0)], vec![2]),
        object("d", &[("Heavy", 8.0), ("W", 2.0)], vec![3]),
    ];
    let map = generated(&objects, &[("Light", 1.0), ("Heavy", 8.0), ("Middle", 4.0)]);

    let weights = map.bucket_weights();
    assert_eq!(weights, vec![8.0, 4.0, 1.0]);
    assert!(weights.windows(2).all(|w| w[0] > w[1]));
    assert_eq!(map.taxonomy_path_sets()[0].len(), 2);
}

#[test]
fn irrelevant_roots_are_left_out() {
    let objects = vec![
        object("a", &[("Kept", 3.0), ("X", 1.0)], vec![0]),
        object("b", &[("Dropped", 9.0), ("Y", 1.0)], vec![1]),
    ];
    let map = generated(&objects, &[("Kept", 3.0)]);
    assert_eq!(map.bucket_weights(), vec![3.0]);
    assert!(map
        .sentence_indices(&TaxonomyNode::new("Dropped", 0.0))
        .unwrap()
        .is_none());
}

#[test]
fn empty_relevant_set_gives_empty_map() {
    let objects = vec![object("a", &[("Root", 3.0), ("X", 1.0)], vec![0])];
    let map = generated(&objects, &[]);
    assert!(map.is_empty());
    assert!(map.node_sentences().is_empty());
}

// ============================================================
// Sentence lookups and offsets
// ============================================================

#[test]
fn shared_class_collects_sentences_of_every_object() {
    let objects = vec![
        object("Rex", &[("Animal", 5.0), ("Dog", 2.0)], vec![1, 2]),
        object("Tom", &[("Animal", 5.0), ("Cat", 2.0)], vec![7]),
    ];
    let map = generated(&objects, &[("Animal", 5.0)]);
    let animal = map
        .sentence_indices(&TaxonomyNode::new("Animal", 0.0))
        .unwrap()
        .unwrap();
    assert_eq!(animal.values().collect::<Vec<_>>(), vec![1, 2, 7]);
}

#[test]
fn update_shifts_by_text_index() {
    let objects = vec![object("Rex", &[("Animal", 5.0), ("Dog", 2.0)], vec![0, 3])];
    let mut map = generated(&objects, &[("Animal", 5.0)]);
    let dog = TaxonomyNode::new("Dog", 2.0).with_text_index(10);

    let shifted = map.update_sentence_indices(&dog).unwrap();
    assert_eq!(shifted.values().collect::<Vec<_>>(), vec![10, 13]);
}

#[test]
fn update_twice_shifts_twice() {
    let objects = vec![object("Rex", &[("Animal", 5.0), ("Dog", 2.0)], vec![0, 3])];
    let mut map = generated(&objects, &[("Animal", 5.0)]);
    let dog = TaxonomyNode::new("Dog", 2.0).with_text_index(10);

    map.update_sentence_indices(&dog).unwrap();
    let shifted = map.update_sentence_indices(&dog).unwrap();
    assert_eq!(shifted.values().collect::<Vec<_>>(), vec![20, 23]);
}

#[test]
fn update_unknown_node_is_lookup_failure() {
    let mut map = TopicsMap::new();
    let err = map
        .update_sentence_indices(&TaxonomyNode::new("Ghost", 1.0))
        .unwrap_err();
    assert!(matches!(err, TopicsError::LookupFailure(_)));
}

#[test]
fn undefined_node_is_invalid() {
    let map = TopicsMap::new();
    let err = map.sentence_indices(&TaxonomyNode::new("", 1.0)).unwrap_err();
    assert!(matches!(err, TopicsError::InvalidArgument(_)));
}

// ============================================================
// SentenceIndices: frequency array
// ============================================================

#[test]
fn sentence_indices_count_repeats() {
    let mut indices = SentenceIndices::new();
    indices.add(4);
    indices.add(4);
    indices.add(1);
    assert_eq!(indices.len(), 2);
    assert_eq!(indices.frequency(4), 2);
    assert_eq!(indices.values().collect::<Vec<_>>(), vec![1, 4]);
}

#[test]
fn sentence_indices_shift_keeps_frequencies() {
    let mut indices = SentenceIndices::from(vec![2, 2, 5]);
    indices.shift_by(100);
    assert_eq!(indices.frequency(102), 2);
    assert!(indices.contains(105));
    assert!(!indices.contains(2));
}

#[test]
fn display_lists_buckets_heaviest_first() {
    let objects = vec![
        object("a", &[("Light", 1.0), ("X", 1.0)], vec![0]),
        object("b", &[("Heavy", 8.0), ("Y", 1.0)], vec![1]),
    ];
    let map = generated(&objects, &[("Light", 1.0), ("Heavy", 8.0)]);
    let text = map.to_string();
    let heavy = text.find("Heavy/Y/b").unwrap();
    let light = text.find("Light/X/a").unwrap();
    assert!(heavy < light);
}
