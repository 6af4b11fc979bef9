#![forbid(unsafe_code)]

//! Weighted hierarchy construction: input records, aggregation, validation.
//!
//! The entry point is [`Hierarchy::from_node`] for owned input trees, or
//! [`HierarchyBuilder`] when assembling nodes incrementally. Both produce
//! the same validated arena tree: weights aggregated bottom-up, children
//! sorted by weight once, depths assigned, cycles and bad values rejected.

pub mod node;
pub mod tree;

pub use node::{Node, collapse_self_named};
pub use tree::{Hierarchy, HierarchyBuilder, HierarchyError, HierarchyNode, NodeId};
