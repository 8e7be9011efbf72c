// Lineage: taxonomy lineage distance and topic scoring.
//
// This is the library root. Extracted entities arrive with their taxonomy
// lineages (WordNet hypernym chains or Wikipedia categories); the crate
// ranks the relevant classes and lineages of a document, maps taxonomy
// nodes to the sentences mentioning them, and measures how close two
// lineages are.

pub mod config;
pub mod error;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod taxonomy;
pub mod topics;
