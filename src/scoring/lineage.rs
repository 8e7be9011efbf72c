// Lineage scoring: rank the full lineages (classes + instance) of a document.
//
// 1. Take the top classes from node scoring.
// 2. For every object and every lineage it owns, fold the weights of the
//    lineage nodes that are top classes. Lineages touching no top class
//    are dropped.
// 3. Fold in the instance weight and divide by the lineage length.
// 4. Rank descending (ties keep discovery order), then emit up to N
//    lineages, skipping any whose class path was already emitted with a
//    different instance.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::node::NodeScore;
use crate::error::Result;
use crate::taxonomy::document::Document;
use crate::taxonomy::lineage::Lineage;
use crate::taxonomy::node::TaxonomyNode;

/// Default number of lineages kept per document.
pub const DEFAULT_NUM_TOP_LINEAGES: usize = 6;

/// How node weights accumulate along a lineage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreMethod {
    /// Plain sum of node weights
    #[default]
    Add,
    /// Sum of node weights divided by node level
    NormalizedAdd,
}

impl ScoreMethod {
    /// Fold one node into the accumulated weight.
    pub fn apply(&self, weight: f32, node: &TaxonomyNode) -> f32 {
        match self {
            ScoreMethod::Add => weight + node.weight,
            // Root (level 0) and instances without a level count at full weight
            ScoreMethod::NormalizedAdd => weight + node.weight / node.level.max(1) as f32,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMethod::Add => "add",
            ScoreMethod::NormalizedAdd => "normalized-add",
        }
    }
}

impl fmt::Display for ScoreMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(ScoreMethod::Add),
            "normalized-add" | "normalized_add" => Ok(ScoreMethod::NormalizedAdd),
            other => Err(format!("unknown score method '{other}'")),
        }
    }
}

/// A scored (lineage, instance) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevantLineage {
    pub lineage: Lineage,
    pub instance: TaxonomyNode,
    /// Accumulated weight divided by the lineage length
    pub score: f32,
}

impl RelevantLineage {
    /// Class path without the instance, the de-duplication key.
    pub fn label_path(&self) -> String {
        self.lineage.label_path()
    }
}

impl fmt::Display for RelevantLineage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.lineage.label_path(), self.instance.label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineageScore {
    pub num_top_lineages: usize,
    pub method: ScoreMethod,
    pub node_score: NodeScore,
}

impl Default for LineageScore {
    fn default() -> Self {
        Self {
            num_top_lineages: DEFAULT_NUM_TOP_LINEAGES,
            method: ScoreMethod::Add,
            node_score: NodeScore::default(),
        }
    }
}

impl LineageScore {
    pub fn new(num_top_lineages: usize, method: ScoreMethod, node_score: NodeScore) -> Self {
        Self {
            num_top_lineages,
            method,
            node_score,
        }
    }

    /// The most relevant lineages of the document, best first, one per class path.
    pub fn score(&self, document: &Document) -> Result<Vec<RelevantLineage>> {
        let top_classes = self.node_score.relevant_classes(document)?;

        let mut candidates: Vec<RelevantLineage> = Vec::new();
        for object in document.objects() {
            for lineage in object.lineages() {
                let weight = lineage
                    .nodes()
                    .iter()
                    .filter(|node| top_classes.contains(&node.label))
                    .fold(0.0_f32, |weight, node| self.method.apply(weight, node));

                if weight > 0.0 {
                    let weight = self.method.apply(weight, &object.node);
                    candidates.push(RelevantLineage {
                        lineage: lineage.clone(),
                        instance: object.node.clone(),
                        score: weight / lineage.len() as f32,
                    });
                } else {
                    debug!(
                        object = object.label(),
                        lineage = %lineage,
                        "Lineage has no top class, skipped"
                    );
                }
            }
        }

        // Stable sort: equal scores keep discovery order
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

        let candidate_count = candidates.len();
        let mut seen: HashSet<String> = HashSet::new();
        let best: Vec<RelevantLineage> = candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.label_path()))
            .take(self.num_top_lineages)
            .collect();

        info!(
            candidates = candidate_count,
            selected = best.len(),
            method = self.method.as_str(),
            "Scored taxonomy lineages"
        );

        Ok(best)
    }
}
