use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::metrics::evaluate::DEFAULT_SIMILARITY_CLASSES;
use crate::metrics::path::DEFAULT_FIELD_DELIM;
use crate::metrics::traits::{DistanceKind, LineageDistance};
use crate::scoring::lineage::{LineageScore, ScoreMethod, DEFAULT_NUM_TOP_LINEAGES};
use crate::scoring::node::{NodeScore, DEFAULT_NUM_TOP_NODES};

/// Central configuration loaded from environment variables.
///
/// Every setting has a default, so an empty environment is valid. The .env
/// file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Delimiter between tokens of a multi-token label (loose matching)
    pub field_delim: char,
    /// Allow token-level label matches at leaf boundaries
    pub fuzzy_match: bool,
    /// Lineage distance used for evaluation
    pub distance: DistanceKind,
    /// How many top classes NodeScore keeps
    pub num_top_nodes: usize,
    /// How many lineages LineageScore emits
    pub num_top_lineages: usize,
    pub score_method: ScoreMethod,
    /// Number of buckets similarities are classed into
    pub similarity_classes: usize,
    /// Propagate object weights along lineages before scoring
    pub propagate_weights: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_delim: DEFAULT_FIELD_DELIM,
            fuzzy_match: true,
            distance: DistanceKind::Path,
            num_top_nodes: DEFAULT_NUM_TOP_NODES,
            num_top_lineages: DEFAULT_NUM_TOP_LINEAGES,
            score_method: ScoreMethod::Add,
            similarity_classes: DEFAULT_SIMILARITY_CLASSES,
            propagate_weights: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::load_with(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let field_delim = match lookup("LINEAGE_FIELD_DELIM") {
            Some(value) => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => anyhow::bail!(
                        "LINEAGE_FIELD_DELIM must be exactly one character, got {value:?}"
                    ),
                }
            }
            None => defaults.field_delim,
        };

        let fuzzy_match = !is_enabled(lookup("LINEAGE_STRICT_MATCH"));
        let propagate_weights = is_enabled(lookup("LINEAGE_PROPAGATE_WEIGHTS"));

        Ok(Self {
            field_delim,
            fuzzy_match,
            distance: parse_var(&lookup, "LINEAGE_DISTANCE", defaults.distance)?,
            num_top_nodes: parse_var(&lookup, "LINEAGE_TOP_NODES", defaults.num_top_nodes)?,
            num_top_lineages: parse_var(&lookup, "LINEAGE_TOP_LINEAGES", defaults.num_top_lineages)?,
            score_method: parse_var(&lookup, "LINEAGE_SCORE_METHOD", defaults.score_method)?,
            similarity_classes: parse_var(
                &lookup,
                "LINEAGE_SIMILARITY_CLASSES",
                defaults.similarity_classes,
            )?,
            propagate_weights,
        })
    }

    /// The configured lineage distance metric.
    pub fn metric(&self) -> Box<dyn LineageDistance> {
        self.distance.build(self.fuzzy_match, self.field_delim)
    }

    /// A specific metric with this configuration's matching settings.
    pub fn metric_of(&self, kind: DistanceKind) -> Box<dyn LineageDistance> {
        kind.build(self.fuzzy_match, self.field_delim)
    }

    pub fn node_score(&self) -> NodeScore {
        NodeScore::new(self.num_top_nodes)
    }

    pub fn lineage_score(&self) -> LineageScore {
        LineageScore::new(self.num_top_lineages, self.score_method, self.node_score())
    }
}

fn is_enabled(value: Option<String>) -> bool {
    matches!(value.as_deref().map(str::trim), Some("1") | Some("true") | Some("yes"))
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid value for {name}: {value:?}")),
        None => Ok(default),
    }
}
