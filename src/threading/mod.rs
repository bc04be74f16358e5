//! Reply tree assembly
//!
//! Messages are stored flat: every reply carries the id of its parent and
//! nothing else. This module turns such a flat set back into nested trees for
//! the API, one tree per thread.
//!
//! ## Assembly Strategy
//!
//! 1. **Group**: one pass over the descendants builds a `parent id → children`
//!    index, each group ordered oldest first
//! 2. **Order roots**: newest first for the thread listing, oldest first when
//!    the roots are the direct replies of a single thread
//! 3. **Traverse**: an explicit work-stack walks the index from every root and
//!    emits nested [`TreeNode`]s, so deep reply chains never grow the call stack
//!
//! Descendants that cannot be reached from any root are left out. A node
//! reached twice means the parent links contain a cycle and assembly fails
//! with [`ThreadingError::MalformedHierarchy`].
//!
//! ## Module Structure
//!
//! - `node`: the nested output type
//! - `algorithm`: grouping, cycle detection and traversal
//! - `assembler`: public entry points

pub mod algorithm;
pub mod assembler;
pub mod error;
pub mod node;

// Re-export main types and functions
pub use assembler::{RootOrder, assemble, assemble_replies, assemble_threads};
pub use error::ThreadingError;
pub use node::TreeNode;
