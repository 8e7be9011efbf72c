// Scoring: rank taxonomy nodes and lineages of a document by weight.

pub mod lineage;
pub mod node;
