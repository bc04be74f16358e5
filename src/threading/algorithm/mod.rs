//! Reply tree assembly algorithm
//!
//! Splits the work into three independent steps:
//!
//! - `grouping`: build the `parent id → children` index in one pass
//! - `cycle_detection`: guard against parent links that loop
//! - `tree_traversal`: walk the index iteratively and emit nested nodes
//!
//! ## Main Entry Point
//!
//! Use `build_forest()`; the public wrappers live in `threading::assembler`.

mod cycle_detection;
mod grouping;
mod tree_traversal;

pub use cycle_detection::VisitedSet;
pub use grouping::ChildIndex;
pub use tree_traversal::build_forest;
