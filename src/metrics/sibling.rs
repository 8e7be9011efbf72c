// Sibling/parent distance (`_SP`).
//
// Same leaf-aligned search as the path distance. Once the nearest match
// (k, j) is found, both lineages are walked up in lockstep looking for the
// first strictly matching ancestor; the match adjusts the score by
// m - k + 1, so a shared immediate parent keeps full credit and a more
// distant common ancestor costs one point per extra level.

use super::path::{max_path_len, normalize, strict_match, PathDistance};
use super::traits::LineageDistance;
use crate::taxonomy::lineage::{split_path, Lineage};

const LABEL: &str = "_SP";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SiblingParentDistance {
    path: PathDistance,
}

impl SiblingParentDistance {
    pub fn new(path: PathDistance) -> Self {
        Self { path }
    }
}

impl LineageDistance for SiblingParentDistance {
    fn compute_similarity(&self, lineage: &Lineage, labeled: &str) -> f64 {
        let labels = split_path(labeled);
        let nodes = lineage.nodes();

        let similarity = match self.path.find_leaf_match(nodes, &labels) {
            Some(leaf) => {
                let mut similarity = leaf.similarity;
                let (k, j) = (leaf.k as isize, leaf.j as isize);
                let (mut m, mut n) = (k - 1, j - 1);
                while m >= 0 && n >= 0 {
                    if strict_match(&nodes[m as usize].label, labels[n as usize]) {
                        similarity += (m - k + 1) as f64;
                        break;
                    }
                    m -= 1;
                    n -= 1;
                }
                similarity
            }
            None => 0.0,
        };

        normalize(similarity, max_path_len(nodes.len(), labels.len()))
    }

    fn label(&self) -> &'static str {
        LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::path::FUZZY_DISTANCE;

    fn lineage(path: &str) -> Lineage {
        Lineage::parse(path).unwrap()
    }

    #[test]
    fn test_shared_parent_keeps_full_credit() {
        let distance = SiblingParentDistance::default();
        let score = distance.compute_similarity(&lineage("Animal/Mammal/Dog"), "Animal/Mammal/Dog");
        assert!((score - 1.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_fuzzy_leaf_with_shared_parent() {
        let distance = SiblingParentDistance::default();
        let score = distance
            .compute_similarity(&lineage("Animal/Mammal/Dog, Hound"), "Animal/Mammal/Hound");
        assert!((score - FUZZY_DISTANCE).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_distant_common_ancestor_costs_a_level() {
        let distance = SiblingParentDistance::default();
        let score = distance
            .compute_similarity(&lineage("Animal/Mammal/Dog, Hound"), "Animal/Canine/Hound");
        // (0.93 * 4 - 1) / 4
        let expected = (FUZZY_DISTANCE * 4.0 - 1.0) / 4.0;
        assert!((score - expected).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_no_match_scores_zero() {
        let distance = SiblingParentDistance::default();
        assert_eq!(distance.compute_similarity(&lineage("Plant/Tree/Oak"), "Animal/Dog"), 0.0);
    }
}
