//! Cycle detection for reply trees
//!
//! Parent links are never rewritten after a message is stored, so a well
//! formed forest has no cycles. Assembly still guards against them: should the
//! store ever return a loop, every node of the loop would be reachable from
//! itself and a naive walk would never finish.

use std::collections::HashSet;

use crate::models::MessageId;
use crate::threading::error::{ThreadingError, ThreadingResult};

/// Ids of every node emitted so far during one assembly.
///
/// ## Example
///
/// ```text
/// Links:  A → B → A   (A's parent is B, B's parent is A)
///
/// Walk from A: visit A, visit B, visit A again
/// Result: MalformedHierarchy { message_id: A }
/// ```
#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: HashSet<MessageId>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message_id`, failing if it was already recorded.
    pub fn visit(&mut self, message_id: MessageId) -> ThreadingResult<()> {
        if self.seen.insert(message_id) {
            Ok(())
        } else {
            log::error!("message {} reached twice during tree assembly", message_id);
            Err(ThreadingError::MalformedHierarchy { message_id })
        }
    }

    /// Number of distinct messages recorded so far.
    pub fn count(&self) -> usize {
        self.seen.len()
    }
}
