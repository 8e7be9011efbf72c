// Typed errors for the taxonomy core.
//
// The core never retries anything: every variant is a contract violation
// surfaced straight to the caller. Application layers wrap these in anyhow.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TopicsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopicsError {
    /// Undefined document, node or taxonomy object passed to a core operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A node was queried that the topics map never registered.
    #[error("Lookup failure: {0}")]
    LookupFailure(String),

    /// A lineage must hold at least one node.
    #[error("Taxonomy lineage must contain at least one node")]
    EmptyLineage,
}
