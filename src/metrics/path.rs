// Path distance between two taxonomy lineages (`_P`).
//
// Both lineages are walked from the leaf toward the root. The first pair of
// positions (k, j) whose labels match scores k + j (or FUZZY_DISTANCE of it
// for a token-level match touching a leaf), normalized by the combined path
// length. The nearest-to-leaf match wins, not the best global alignment:
// trained models downstream are calibrated against that policy.

use tracing::trace;

use super::traits::LineageDistance;
use crate::taxonomy::lineage::{split_path, Lineage};
use crate::taxonomy::node::TaxonomyNode;

/// Credit for an exact label match.
pub const STRICT_DISTANCE: f64 = 1.00;
/// Credit ratio for a loose (shared token) match at a leaf boundary.
pub const FUZZY_DISTANCE: f64 = 0.93;
/// Default delimiter between tokens of a multi-token label.
pub const DEFAULT_FIELD_DELIM: char = ',';

const LABEL: &str = "_P";

/// Position of the first nonzero match found scanning from the leaves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafMatch {
    /// Index in the extracted lineage
    pub k: usize,
    /// Index in the labeled path
    pub j: usize,
    /// Unnormalized similarity of the pair
    pub similarity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathDistance {
    fuzzy: bool,
    field_delim: char,
}

impl Default for PathDistance {
    fn default() -> Self {
        Self {
            fuzzy: true,
            field_delim: DEFAULT_FIELD_DELIM,
        }
    }
}

impl PathDistance {
    pub fn new(fuzzy: bool, field_delim: char) -> Self {
        Self { fuzzy, field_delim }
    }

    /// Exact label comparison only.
    pub fn strict() -> Self {
        Self {
            fuzzy: false,
            ..Self::default()
        }
    }

    pub fn is_fuzzy(&self) -> bool {
        self.fuzzy
    }

    pub fn field_delim(&self) -> char {
        self.field_delim
    }

    /// Similarity against a labeled path already split into class labels.
    pub fn similarity_with_labels(&self, nodes: &[TaxonomyNode], labeled: &[&str]) -> f64 {
        let similarity = self
            .find_leaf_match(nodes, labeled)
            .map(|m| m.similarity)
            .unwrap_or(0.0);
        normalize(similarity, max_path_len(nodes.len(), labeled.len()))
    }

    /// Scan k from the leaf of `nodes` and, for each k, j from the leaf of
    /// `labeled`, stopping at the first pair with nonzero similarity.
    pub fn find_leaf_match(&self, nodes: &[TaxonomyNode], labeled: &[&str]) -> Option<LeafMatch> {
        for k in (0..nodes.len()).rev() {
            for j in (0..labeled.len()).rev() {
                let similarity = self.pair_similarity(nodes, labeled, k, j);
                if similarity > 0.0 {
                    trace!(k, j, similarity, "Nearest lineage match");
                    return Some(LeafMatch { k, j, similarity });
                }
            }
        }
        None
    }

    fn pair_similarity(&self, nodes: &[TaxonomyNode], labeled: &[&str], k: usize, j: usize) -> f64 {
        let label = nodes[k].label.as_str();
        let offset = (k + j) as f64;

        if strict_match(label, labeled[j]) {
            STRICT_DISTANCE * offset
        } else if self.fuzzy
            && (k == nodes.len() - 1 || j == labeled.len() - 1)
            && loose_match(label, labeled[j], self.field_delim)
        {
            FUZZY_DISTANCE * offset
        } else {
            0.0
        }
    }
}

impl LineageDistance for PathDistance {
    fn compute_similarity(&self, lineage: &Lineage, labeled: &str) -> f64 {
        let labels = split_path(labeled);
        self.similarity_with_labels(lineage.nodes(), &labels)
    }

    fn label(&self) -> &'static str {
        LABEL
    }
}

/// Case-sensitive exact label equality.
pub fn strict_match(label: &str, labeled: &str) -> bool {
    label == labeled
}

/// Token-level match: any token of one label equals any token of the other.
///
/// Only applies when at least one side has more than one token. Tokens of
/// the lineage label are trimmed; labeled tokens are compared as given.
pub fn loose_match(label: &str, labeled: &str, field_delim: char) -> bool {
    let label_terms: Vec<&str> = label.split(field_delim).collect();
    let labeled_terms: Vec<&str> = labeled.split(field_delim).collect();

    if label_terms.len() < 2 && labeled_terms.len() < 2 {
        return false;
    }

    labeled_terms
        .iter()
        .any(|labeled_term| label_terms.iter().any(|term| term.trim() == *labeled_term))
}

/// Combined path length used to normalize path similarities.
pub(crate) fn max_path_len(lineage_len: usize, labeled_len: usize) -> isize {
    lineage_len as isize + labeled_len as isize - 2
}

/// Normalize by the path length; a non-positive length scores 0.
pub(crate) fn normalize(similarity: f64, max_path_len: isize) -> f64 {
    if max_path_len <= 0 {
        return 0.0;
    }
    (similarity / max_path_len as f64).clamp(0.0, 1.0)
}
