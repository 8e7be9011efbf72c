// Lineage evaluation: score extracted lineages against reference labels
// with every distance metric, the way validation runs compare a
// document's best lineages to its labeled taxonomy.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::metrics::evaluate::{best_similarity, similarity_class};
use crate::metrics::traits::DistanceKind;
use crate::scoring::lineage::RelevantLineage;
use crate::taxonomy::lineage::Lineage;

/// Similarity of one lineage under one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    pub metric: DistanceKind,
    /// Algorithm tag (`_P`, `_SP`, `_S`)
    pub tag: String,
    pub similarity: f64,
    pub class: usize,
}

/// Best similarity of one extracted lineage against the labeled set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageEvaluation {
    pub lineage: String,
    pub scores: Vec<MetricScore>,
}

/// Score `lineage` against each labeled path with the given metrics,
/// keeping the best similarity per metric.
pub fn score_lineage<S: AsRef<str>>(
    lineage: &Lineage,
    labeled: &[S],
    kinds: &[DistanceKind],
    config: &Config,
) -> Vec<MetricScore> {
    kinds
        .iter()
        .map(|&kind| {
            let metric = config.metric_of(kind);
            let similarity = best_similarity(metric.as_ref(), lineage, labeled);
            debug!(metric = metric.label(), lineage = %lineage, similarity, "Scored lineage");
            MetricScore {
                metric: kind,
                tag: metric.label().to_string(),
                similarity,
                class: similarity_class(similarity, config.similarity_classes),
            }
        })
        .collect()
}

/// Compare a `/`-delimited lineage with one labeled path.
pub fn compare(
    lineage: &str,
    labeled: &str,
    kinds: &[DistanceKind],
    config: &Config,
) -> Result<Vec<MetricScore>> {
    let lineage = Lineage::parse(lineage).with_context(|| format!("Invalid lineage {lineage:?}"))?;
    Ok(score_lineage(&lineage, &[labeled], kinds, config))
}

/// Evaluate the class path of every relevant lineage against the labels.
pub fn evaluate<S: AsRef<str>>(
    lineages: &[RelevantLineage],
    labeled: &[S],
    kinds: &[DistanceKind],
    config: &Config,
) -> Vec<LineageEvaluation> {
    lineages
        .iter()
        .map(|relevant| LineageEvaluation {
            lineage: relevant.label_path(),
            scores: score_lineage(&relevant.lineage, labeled, kinds, config),
        })
        .collect()
}
