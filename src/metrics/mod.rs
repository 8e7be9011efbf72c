// Lineage distance metrics: similarity between an extracted taxonomy
// lineage and a labeled reference path.
//
// Three interchangeable strategies share the LineageDistance trait. They
// hold only configuration fixed at construction, so one instance can be
// shared freely across documents and threads.

pub mod evaluate;
pub mod path;
pub mod sibling;
pub mod simple;
pub mod traits;
