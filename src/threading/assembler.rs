//! Public entry points for reply tree assembly
//!
//! Both views share one pipeline (group, order roots, traverse) and differ
//! only in where the roots come from and which way they are sorted. Replies
//! under any node are always oldest first.

use crate::models::{Message, MessageId};

use super::algorithm::{ChildIndex, VisitedSet, build_forest};
use super::error::ThreadingResult;
use super::node::TreeNode;

/// Order applied to the top level of an assembled forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootOrder {
    /// Most recent `created_at` first (thread listing)
    NewestFirst,
    /// Least recent `created_at` first (comments of one thread)
    OldestFirst,
}

/// Stable sort: roots with equal timestamps keep their retrieval order.
fn sort_roots(roots: &mut [Message], order: RootOrder) {
    match order {
        RootOrder::NewestFirst => roots.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        RootOrder::OldestFirst => roots.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
}

/// Assemble one tree per root from a flat set of descendants.
///
/// Roots that carry a parent reference are grouped alongside the descendants,
/// so a loop passing through a root is caught instead of silently cut.
/// Descendants that no root reaches are omitted.
pub fn assemble(
    mut roots: Vec<Message>,
    mut descendants: Vec<Message>,
    root_order: RootOrder,
) -> ThreadingResult<Vec<TreeNode>> {
    sort_roots(&mut roots, root_order);

    descendants.extend(roots.iter().filter(|root| !root.is_root()).cloned());
    let mut child_index = ChildIndex::build(descendants);

    let forest = build_forest(roots, &mut child_index, &mut VisitedSet::new())?;
    log_unreached(&child_index);

    Ok(forest)
}

/// Assemble the full timeline: every thread with its nested replies.
///
/// `roots` are the messages without a parent and `descendants` all of their
/// transitive replies. Threads come back newest first.
pub fn assemble_threads(
    roots: Vec<Message>,
    descendants: Vec<Message>,
) -> ThreadingResult<Vec<TreeNode>> {
    assemble(roots, descendants, RootOrder::NewestFirst)
}

/// Assemble the comment view of thread `root_id`.
///
/// The direct replies to `root_id` form the top level, oldest first; the
/// thread's own message is not part of the output. A thread with no replies,
/// or one that does not exist, yields an empty list.
pub fn assemble_replies(
    root_id: MessageId,
    descendants: Vec<Message>,
) -> ThreadingResult<Vec<TreeNode>> {
    let mut child_index = ChildIndex::build(descendants);
    let mut top_level = child_index.take_children(&root_id);
    sort_roots(&mut top_level, RootOrder::OldestFirst);

    // The thread root must not show up again below itself
    let mut visited = VisitedSet::new();
    visited.visit(root_id)?;

    let forest = build_forest(top_level, &mut child_index, &mut visited)?;
    log_unreached(&child_index);

    Ok(forest)
}

fn log_unreached(child_index: &ChildIndex) {
    let unreached = child_index.remaining();
    if unreached > 0 {
        log::debug!("omitted {} replies not reachable from any root", unreached);
    }
}
