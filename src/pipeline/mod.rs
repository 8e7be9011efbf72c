// Document pipelines: the per-document extraction pass, lineage
// evaluation against reference labels, and concurrent batch processing.

pub mod batch;
pub mod evaluate;
pub mod extract;
