// Evaluation helpers: compare an extracted lineage against reference labels.
//
// Used by training/validation harnesses: a document is usually labeled with
// several acceptable lineages, the best one counts, and similarities are
// bucketed into a fixed number of classes.

use super::traits::LineageDistance;
use crate::taxonomy::lineage::Lineage;

/// Default number of similarity classes.
pub const DEFAULT_SIMILARITY_CLASSES: usize = 12;

const EPS: f64 = 1.0e-8;

/// Highest similarity between `lineage` and any of the labeled paths.
/// Returns 0 when no labeled path is given.
pub fn best_similarity<S: AsRef<str>>(
    metric: &dyn LineageDistance,
    lineage: &Lineage,
    labeled: &[S],
) -> f64 {
    labeled
        .iter()
        .map(|l| metric.compute_similarity(lineage, l.as_ref()))
        .fold(0.0, f64::max)
}

/// Bucket a similarity in [0, 1] into one of `num_classes` classes.
///
/// A perfect similarity lands in the last class, not one past it.
pub fn similarity_class(similarity: f64, num_classes: usize) -> usize {
    if num_classes == 0 {
        return 0;
    }
    let class = (similarity * num_classes as f64 - EPS).max(0.0) as usize;
    class.min(num_classes - 1)
}
