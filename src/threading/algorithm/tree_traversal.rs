//! Tree traversal for reply assembly
//!
//! Walks the child index from each root and builds owned, nested nodes. The
//! walk keeps its own stack of open frames instead of recursing, so a chain of
//! thousands of replies costs heap, not call stack.

use crate::models::Message;
use crate::threading::error::ThreadingResult;
use crate::threading::node::TreeNode;

use super::cycle_detection::VisitedSet;
use super::grouping::ChildIndex;

/// A node whose children are still being built.
struct Frame {
    node: TreeNode,
    pending: std::vec::IntoIter<Message>,
}

impl Frame {
    fn open(
        message: Message,
        depth: u32,
        child_index: &mut ChildIndex,
        visited: &mut VisitedSet,
    ) -> ThreadingResult<Self> {
        visited.visit(message.id)?;
        let pending = child_index.take_children(&message.id).into_iter();

        Ok(Frame {
            node: TreeNode::new(message, depth),
            pending,
        })
    }
}

/// Build one nested tree per root, in the order the roots are given
///
/// ## Algorithm
///
/// Depth-first with an explicit stack of frames. The top frame hands out its
/// next pending child, which becomes a new frame; once a frame has no pending
/// children it is closed and attached to the frame below it (or, for a root,
/// appended to the output). Each message is touched once, so the walk is
/// linear in the number of messages.
///
/// ## Arguments
///
/// * `roots` - Messages to place at depth 0, already in output order
/// * `child_index` - Replies grouped by parent; groups are consumed as visited
/// * `visited` - Ids already accounted for; reaching one of them again is an error
///
/// ## Returns
///
/// The assembled trees, or `MalformedHierarchy` if any message is reached twice
pub fn build_forest(
    roots: Vec<Message>,
    child_index: &mut ChildIndex,
    visited: &mut VisitedSet,
) -> ThreadingResult<Vec<TreeNode>> {
    let mut forest = Vec::with_capacity(roots.len());

    for root in roots {
        let mut open_frames = vec![Frame::open(root, 0, child_index, visited)?];

        while let Some(mut frame) = open_frames.pop() {
            match frame.pending.next() {
                Some(child) => {
                    let child_depth = frame.node.depth + 1;
                    open_frames.push(frame);
                    open_frames.push(Frame::open(
                        child,
                        child_depth,
                        child_index,
                        visited,
                    )?);
                }
                None => match open_frames.last_mut() {
                    Some(parent) => parent.node.children.push(frame.node),
                    None => forest.push(frame.node),
                },
            }
        }
    }

    log::debug!(
        "built {} trees, {} messages visited",
        forest.len(),
        visited.count()
    );

    Ok(forest)
}
