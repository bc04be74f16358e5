use chrono::{DateTime, Utc};
use rocket_db_pools::sqlx::FromRow;
use rocket_okapi::okapi::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a stored message.
pub type MessageId = Uuid;

// ===== Message Models =====

/// A single post or reply as stored in the `messages` table.
///
/// Replies point at their parent through `parent_id` only; the nested view is
/// derived per request by [`crate::threading`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub parent_id: Option<MessageId>,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// True when the message starts a thread.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Request body accepted by the creation endpoints.
///
/// `author` also accepts `user`, the field name older clients send.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, alias = "user")]
    pub author: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
}
