//! Nested tree node produced by the assembler
//!
//! A node owns its message and its ordered children. Nodes are built fresh for
//! every request and never written back to the store.

use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::models::Message;

/// A message together with its replies, recursively.
///
/// Serializes as the message's own fields plus `depth` and `children`.
/// `children` is always present and empty for leaves.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct TreeNode {
    #[serde(flatten)]
    pub message: Message,

    /// Distance from the top of the returned tree (0 for the returned roots).
    /// Informational only; it never limits how deep the tree goes.
    pub depth: u32,

    /// Direct replies, oldest first
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf node
    pub fn new(message: Message, depth: u32) -> Self {
        TreeNode {
            message,
            depth,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, this one included.
    ///
    /// Iterative so that very deep chains can be counted safely.
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// Stack left free before serialization of a nested level moves to a fresh segment.
const STACK_RED_ZONE: usize = 100 * 1024;
/// Size of each extra stack segment.
const STACK_SEGMENT: usize = 1024 * 1024;

impl Serialize for TreeNode {
    // Every level of `children` nests one more serializer call, so the
    // recursion switches to a heap-allocated stack segment whenever the
    // current one runs low.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || {
            let message = &self.message;
            let mut state = serializer.serialize_struct("TreeNode", 7)?;
            state.serialize_field("id", &message.id)?;
            state.serialize_field("parentId", &message.parent_id)?;
            state.serialize_field("author", &message.author)?;
            state.serialize_field("content", &message.content)?;
            state.serialize_field("createdAt", &message.created_at)?;
            state.serialize_field("depth", &self.depth)?;
            state.serialize_field("children", &self.children)?;
            state.end()
        })
    }
}

impl Drop for TreeNode {
    // The derived drop recurses once per level; flatten first so that a
    // chain thousands of replies deep is released without blowing the stack.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;
    use uuid::Uuid;

    fn message(id: u128, parent: Option<u128>) -> Message {
        Message {
            id: Uuid::from_u128(id),
            parent_id: parent.map(Uuid::from_u128),
            author: "erin".to_string(),
            content: format!("reply {}", id),
            created_at: Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap()
                + Duration::seconds(id as i64),
        }
    }

    #[test]
    fn test_serializes_message_fields_inline() {
        let mut root = TreeNode::new(message(1, None), 0);
        root.children.push(TreeNode::new(message(2, Some(1)), 1));

        let value = serde_json::to_value(&root).unwrap();

        let mut expected = serde_json::to_value(&root.message).unwrap();
        expected["depth"] = json!(0);
        let mut child = serde_json::to_value(&root.children[0].message).unwrap();
        child["depth"] = json!(1);
        child["children"] = json!([]);
        expected["children"] = json!([child]);
        assert_eq!(value, expected);

        let round_trip: TreeNode = serde_json::from_value(value).unwrap();
        assert_eq!(round_trip, root);
    }

    #[test]
    fn test_deep_chain_serializes_on_small_stack() {
        const DEPTH: u128 = 20_000;

        let mut node = TreeNode::new(message(DEPTH, Some(DEPTH - 1)), DEPTH as u32);
        for id in (0..DEPTH).rev() {
            let parent_id = id.checked_sub(1);
            let mut parent = TreeNode::new(message(id, parent_id), id as u32);
            parent.children.push(node);
            node = parent;
        }

        // Same stack size as a tokio worker thread
        let json = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || serde_json::to_string(&vec![node]))
            .unwrap()
            .join()
            .unwrap()
            .unwrap();

        assert_eq!(json.matches("\"depth\":").count(), DEPTH as usize + 1);
        assert_eq!(json.matches("\"children\":[]").count(), 1);
        assert!(json.contains(&Uuid::from_u128(DEPTH).to_string()));
    }
}
