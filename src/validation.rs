//! Validation for message creation requests.
//!
//! Field checks are pure and run before any database access; whether a parent
//! exists is checked by the caller against the store.

use thiserror::Error;
use uuid::Uuid;

use crate::config::ForumConfig;
use crate::models::{MessageId, NewMessage};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("invalid message id '{0}'")]
    InvalidId(String),
    #[error("parent message {0} does not exist")]
    UnknownParent(MessageId),
}

/// A creation request that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMessage {
    pub id: MessageId,
    pub parent_id: Option<MessageId>,
    pub author: String,
    pub content: String,
}

/// Parse a message id received from a path segment or request body.
pub fn parse_message_id(raw: &str) -> Result<MessageId, ValidationError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ValidationError::InvalidId(raw.to_string()))
}

fn required_text(
    value: Option<String>,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or(ValidationError::MissingField(field))?;

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_string())
}

impl NewMessage {
    /// Check required fields and resolve the parent reference.
    ///
    /// `path_parent` is the thread named in the URL of a reply request and
    /// takes precedence over a `parentId` in the body.
    pub fn validate(
        self,
        path_parent: Option<MessageId>,
        config: &ForumConfig,
    ) -> Result<ValidatedMessage, ValidationError> {
        let content = required_text(self.content, "content", config.max_content_length)?;
        let author = required_text(self.author, "author", config.max_author_length)?;

        let parent_id = match path_parent {
            Some(parent_id) => Some(parent_id),
            None => self
                .parent_id
                .as_deref()
                .filter(|raw| !raw.trim().is_empty())
                .map(parse_message_id)
                .transpose()?,
        };

        Ok(ValidatedMessage {
            id: Uuid::new_v4(),
            parent_id,
            author,
            content,
        })
    }
}
