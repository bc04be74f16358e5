//! Shared helper functions for Rocket route handlers.

use crate::error::ApiError;
use crate::models::MessageId;
use crate::store;
use crate::validation::{ValidationError, parse_message_id};
use rocket_db_pools::sqlx::PgPool;

/// Parse a message id taken from the URL.
///
/// Returns [`ApiError::BadRequest`] when the segment is not a UUID.
pub fn resolve_message_id(raw: &str) -> Result<MessageId, ApiError> {
    parse_message_id(raw).map_err(ApiError::from)
}

/// Reject a reply whose parent is not stored.
pub async fn ensure_parent_exists(pool: &PgPool, parent_id: MessageId) -> Result<(), ApiError> {
    if store::message_exists(pool, parent_id).await? {
        Ok(())
    } else {
        Err(ValidationError::UnknownParent(parent_id).into())
    }
}
