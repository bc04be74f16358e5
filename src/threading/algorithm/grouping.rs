//! Parent → children index
//!
//! Built once per assembly so that finding the replies of a node is a single
//! map lookup instead of a scan over every descendant.

use std::collections::HashMap;

use crate::models::{Message, MessageId};

/// Replies grouped by the id of the message they answer.
///
/// Each group keeps its members oldest first; messages with equal
/// `created_at` stay in the order they were handed in.
#[derive(Debug, Default)]
pub struct ChildIndex {
    groups: HashMap<MessageId, Vec<Message>>,
}

impl ChildIndex {
    /// Group `messages` by parent in a single pass.
    ///
    /// Messages without a parent have nothing to be attached to and are
    /// dropped here.
    pub fn build(messages: Vec<Message>) -> Self {
        let mut groups: HashMap<MessageId, Vec<Message>> = HashMap::new();

        for message in messages {
            if let Some(parent_id) = message.parent_id {
                groups.entry(parent_id).or_default().push(message);
            }
        }

        // Stable sort keeps retrieval order for equal timestamps
        for children in groups.values_mut() {
            children.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        }

        ChildIndex { groups }
    }

    /// Remove and return the replies to `parent_id`.
    ///
    /// Every group is handed out at most once, so a message can never be
    /// emitted under two different parents.
    pub fn take_children(&mut self, parent_id: &MessageId) -> Vec<Message> {
        self.groups.remove(parent_id).unwrap_or_default()
    }

    /// Number of messages still waiting for a parent to claim them.
    pub fn remaining(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn message(id: u128, parent: Option<u128>, minute: u32) -> Message {
        Message {
            id: Uuid::from_u128(id),
            parent_id: parent.map(Uuid::from_u128),
            author: "alice".to_string(),
            content: format!("message {}", id),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap(),
        }
    }

    #[test]
    fn test_groups_by_parent_oldest_first() {
        let mut index = ChildIndex::build(vec![
            message(3, Some(1), 30),
            message(2, Some(1), 10),
            message(4, Some(2), 20),
        ]);

        let ids: Vec<_> = index
            .take_children(&Uuid::from_u128(1))
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![Uuid::from_u128(2), Uuid::from_u128(3)]);
        assert_eq!(index.remaining(), 1);
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let mut index = ChildIndex::build(vec![
            message(7, Some(1), 5),
            message(5, Some(1), 5),
            message(6, Some(1), 5),
        ]);

        let ids: Vec<_> = index
            .take_children(&Uuid::from_u128(1))
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(
            ids,
            vec![Uuid::from_u128(7), Uuid::from_u128(5), Uuid::from_u128(6)]
        );
    }

    #[test]
    fn test_groups_are_handed_out_once() {
        let mut index = ChildIndex::build(vec![message(2, Some(1), 0)]);

        assert_eq!(index.take_children(&Uuid::from_u128(1)).len(), 1);
        assert!(index.take_children(&Uuid::from_u128(1)).is_empty());
        assert_eq!(index.remaining(), 0);
    }

    #[test]
    fn test_parentless_messages_are_not_grouped() {
        let index = ChildIndex::build(vec![message(1, None, 0)]);
        assert_eq!(index.remaining(), 0);
    }
}
