//! Message storage.
//!
//! The store owns the canonical flat records. Reads hand back a flat set for a
//! [`FetchScope`]; turning it into trees is left to [`crate::threading`].
//!
//! - **`scope`**: fetch scopes and the root/descendant split
//! - **`queries`**: SQL for fetching, existence checks and inserts

pub mod queries;
pub mod scope;

pub use queries::{fetch_roots_and_descendants, insert_message, is_missing_parent, message_exists};
pub use scope::{FetchScope, FetchedScope};
