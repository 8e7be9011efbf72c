// Taxonomy data model: nodes, lineages, extracted objects and documents.
//
// Everything here is produced by an upstream extraction stage and consumed
// read-only by the scoring and topics modules.

pub mod document;
pub mod lineage;
pub mod node;
pub mod object;
pub mod sentences;
