// Lineage distance trait: swap-ready abstraction over the similarity metric.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::path::PathDistance;
use super::sibling::SiblingParentDistance;
use super::simple::SimpleDistance;
use crate::taxonomy::lineage::Lineage;

/// Similarity between a taxonomy lineage and a `/`-delimited labeled path.
pub trait LineageDistance: Send + Sync {
    /// Similarity in the range [0, 1]; degenerate inputs score 0.
    fn compute_similarity(&self, lineage: &Lineage, labeled: &str) -> f64;

    /// Short algorithm tag, used to name evaluation outputs.
    fn label(&self) -> &'static str;
}

/// Which lineage distance metric to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceKind {
    /// Leaf-aligned path similarity (default)
    Path,
    /// Path similarity rewarding a shared immediate parent
    SiblingParent,
    /// Overlap of intermediate classes
    Simple,
}

impl DistanceKind {
    pub const ALL: [DistanceKind; 3] = [
        DistanceKind::Path,
        DistanceKind::SiblingParent,
        DistanceKind::Simple,
    ];

    /// Build the metric for this kind with the given matching configuration.
    pub fn build(self, fuzzy: bool, field_delim: char) -> Box<dyn LineageDistance> {
        let path = PathDistance::new(fuzzy, field_delim);
        match self {
            DistanceKind::Path => Box::new(path),
            DistanceKind::SiblingParent => Box::new(SiblingParentDistance::new(path)),
            DistanceKind::Simple => Box::new(SimpleDistance),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceKind::Path => "path",
            DistanceKind::SiblingParent => "sibling-parent",
            DistanceKind::Simple => "simple",
        }
    }
}

impl fmt::Display for DistanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "path" | "_p" => Ok(DistanceKind::Path),
            "sibling-parent" | "sibling_parent" | "_sp" => Ok(DistanceKind::SiblingParent),
            "simple" | "_s" => Ok(DistanceKind::Simple),
            other => Err(format!("unknown lineage distance '{other}'")),
        }
    }
}
