//! Fetch scopes and the split of a fetched flat set into roots and replies.

use crate::models::{Message, MessageId};
use crate::threading::{self, ThreadingError, TreeNode};

/// Which part of the forum a fetch covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchScope {
    /// Every thread (one page of them) with all of their replies
    AllThreads,
    /// The replies below a single thread
    Thread(MessageId),
}

/// Messages returned for a scope, split into roots and descendants.
///
/// For [`FetchScope::Thread`] the roots hold the thread's own message when it
/// exists; an empty `roots` means the thread was not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedScope {
    pub scope: FetchScope,
    pub roots: Vec<Message>,
    pub descendants: Vec<Message>,
}

impl FetchScope {
    /// Split flat rows, preserving their retrieval order on both sides.
    pub fn partition(self, rows: Vec<Message>) -> FetchedScope {
        let (roots, descendants): (Vec<Message>, Vec<Message>) = match self {
            FetchScope::AllThreads => rows.into_iter().partition(Message::is_root),
            FetchScope::Thread(root_id) => {
                rows.into_iter().partition(|message| message.id == root_id)
            }
        };

        FetchedScope {
            scope: self,
            roots,
            descendants,
        }
    }
}

impl FetchedScope {
    pub fn message_count(&self) -> usize {
        self.roots.len() + self.descendants.len()
    }

    /// Assemble the nested view matching the scope.
    ///
    /// The thread listing includes the roots themselves; the single-thread view
    /// starts at the thread's direct replies.
    pub fn into_trees(self) -> Result<Vec<TreeNode>, ThreadingError> {
        match self.scope {
            FetchScope::AllThreads => threading::assemble_threads(self.roots, self.descendants),
            FetchScope::Thread(root_id) => {
                if self.roots.is_empty() {
                    log::debug!("thread {} not found, returning no replies", root_id);
                }
                threading::assemble_replies(root_id, self.descendants)
            }
        }
    }
}
