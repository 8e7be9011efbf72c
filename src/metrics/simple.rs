// Simple overlap distance (`_S`).
//
// Counts the intermediate classes the two lineages have in common, leaving
// out both roots and both leaves, and returns 2 * common / (lenA + lenB - 4).

use super::traits::LineageDistance;
use crate::taxonomy::lineage::{split_path, Lineage};

const LABEL: &str = "_S";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimpleDistance;

impl LineageDistance for SimpleDistance {
    fn compute_similarity(&self, lineage: &Lineage, labeled: &str) -> f64 {
        let labels = split_path(labeled);
        let nodes = lineage.nodes();

        let denominator = nodes.len() as isize + labels.len() as isize - 4;
        if denominator <= 0 {
            return 0.0;
        }

        let inner_nodes = &nodes[1..nodes.len().saturating_sub(1).max(1)];
        let inner_labels = &labels[1..labels.len().saturating_sub(1).max(1)];

        let common = inner_labels
            .iter()
            .filter(|labeled| inner_nodes.iter().any(|n| n.label == **labeled))
            .count();

        (2.0 * common as f64 / denominator as f64).clamp(0.0, 1.0)
    }

    fn label(&self) -> &'static str {
        LABEL
    }
}
