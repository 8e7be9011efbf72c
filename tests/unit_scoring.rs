// Unit tests for class and lineage scoring.
//
// Tests NodeScore ranking (ordering, K limit, tie-breaks), LineageScore
// selection (dedup by class path, N limit, both score methods), and the
// error cases for unclassified documents.

use lineage::error::TopicsError;
use lineage::scoring::lineage::{LineageScore, ScoreMethod};
use lineage::scoring::node::NodeScore;
use lineage::taxonomy::document::Document;
use lineage::taxonomy::lineage::Lineage;
use lineage::taxonomy::node::TaxonomyNode;
use lineage::taxonomy::object::TaxonomyObject;

fn object(label: &str, weight: f32, paths: &[&[(&str, f32)]]) -> TaxonomyObject {
    let mut object = TaxonomyObject::new(TaxonomyNode::new(label, weight));
    for path in paths {
        let nodes = path
            .iter()
            .enumerate()
            .map(|(level, (l, w))| TaxonomyNode::new(*l, *w).with_level(level as i32))
            .collect();
        object.add_lineage(Lineage::new(nodes).unwrap());
    }
    object
}

fn classes(weights: &[(&str, f32)]) -> Document {
    let mut doc = Document::new();
    for (label, weight) in weights {
        doc.add_class(TaxonomyNode::new(*label, *weight));
    }
    doc
}

// ============================================================
// NodeScore: ranking
// ============================================================

#[test]
fn node_score_picks_heaviest_k() {
    let doc = classes(&[("A", 5.0), ("B", 9.0), ("C", 2.0)]);
    let top = NodeScore::new(2).score(&doc).unwrap();
    let labels: Vec<&str> = top.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["B", "A"]);
}

#[test]
fn node_score_is_non_increasing_and_bounded() {
    let doc = classes(&[
        ("A", 1.0),
        ("B", 7.0),
        ("C", 3.5),
        ("D", 7.0),
        ("E", 0.0),
        ("F", 12.0),
    ]);
    for k in 0..8 {
        let top = NodeScore::new(k).score(&doc).unwrap();
        assert!(top.len() <= k);
        assert!(top.windows(2).all(|w| w[0].weight >= w[1].weight));
    }
}

#[test]
fn node_score_ties_keep_insertion_order() {
    let doc = classes(&[("First", 3.0), ("Second", 3.0), ("Third", 3.0)]);
    let top = NodeScore::new(2).score(&doc).unwrap();
    assert_eq!(top[0].label, "First");
    assert_eq!(top[1].label, "Second");
}

#[test]
fn node_score_k_larger_than_classes_returns_all() {
    let doc = classes(&[("A", 1.0), ("B", 2.0)]);
    assert_eq!(NodeScore::new(10).score(&doc).unwrap().len(), 2);
}

#[test]
fn node_score_rejects_unclassified_document() {
    let err = NodeScore::default().score(&Document::new()).unwrap_err();
    assert!(matches!(err, TopicsError::InvalidArgument(_)));
}

#[test]
fn relevant_classes_match_scored_labels() {
    let doc = classes(&[("A", 5.0), ("B", 9.0), ("C", 2.0)]);
    let score = NodeScore::new(2);
    let set = score.relevant_classes(&doc).unwrap();
    assert!(set.contains("A") && set.contains("B"));
    assert!(!set.contains("C"));
    let map = score.relevant_classes_map(&doc).unwrap();
    assert_eq!(map["B"].weight, 9.0);
}

// ============================================================
// LineageScore: selection
// ============================================================

#[test]
fn lineage_score_has_no_duplicate_paths() {
    let shared: &[(&str, f32)] = &[("Animal", 4.0), ("Mammal", 2.0)];
    let doc = Document::from_objects(vec![
        object("Rex", 1.0, &[shared]),
        object("Fido", 1.0, &[shared]),
        object("Tom", 1.0, &[&[("Animal", 4.0), ("Feline", 1.0)]]),
    ]);
    let best = LineageScore::default().score(&doc).unwrap();
    let mut paths: Vec<String> = best.iter().map(|l| l.label_path()).collect();
    let before = paths.len();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), before);
    assert_eq!(before, 2);
}

#[test]
fn lineage_score_respects_limit_and_order() {
    let doc = Document::from_objects(vec![
        object("a", 1.0, &[&[("Root", 9.0), ("A", 1.0)]]),
        object("b", 1.0, &[&[("Root", 9.0), ("B", 2.0)]]),
        object("c", 1.0, &[&[("Root", 9.0), ("C", 3.0)]]),
        object("d", 1.0, &[&[("Root", 9.0), ("D", 4.0)]]),
    ]);
    let score = LineageScore::new(2, ScoreMethod::Add, NodeScore::new(10));
    let best = score.score(&doc).unwrap();
    assert_eq!(best.len(), 2);
    assert!(best[0].score >= best[1].score);
    assert_eq!(best[0].lineage.leaf().label, "D");
}

#[test]
fn lineage_score_skips_lineages_without_top_classes() {
    let doc = Document::from_objects(vec![
        object("heavy", 1.0, &[&[("Big", 10.0), ("Bigger", 8.0)]]),
        object("light", 1.0, &[&[("Small", 0.1), ("Tiny", 0.05)]]),
    ]);
    let score = LineageScore::new(6, ScoreMethod::Add, NodeScore::new(2));
    let best = score.score(&doc).unwrap();
    assert_eq!(best.len(), 1);
    assert_eq!(best[0].instance.label, "heavy");
}

#[test]
fn normalized_add_divides_by_level() {
    let node = TaxonomyNode::new("Deep", 6.0).with_level(3);
    assert_eq!(ScoreMethod::Add.apply(1.0, &node), 7.0);
    assert_eq!(ScoreMethod::NormalizedAdd.apply(1.0, &node), 3.0);

    let root = TaxonomyNode::new("Root", 6.0).with_level(0);
    assert_eq!(ScoreMethod::NormalizedAdd.apply(0.0, &root), 6.0);
}

#[test]
fn score_method_parses() {
    assert_eq!("add".parse::<ScoreMethod>().unwrap(), ScoreMethod::Add);
    assert!("multiply".parse::<ScoreMethod>().is_err());
}

#[test]
fn lineage_score_rejects_unclassified_document() {
    assert!(LineageScore::default().score(&Document::new()).is_err());
}
