use thiserror::Error;

use crate::models::MessageId;

pub type ThreadingResult<T> = Result<T, ThreadingError>;

/// Errors raised while assembling reply trees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThreadingError {
    /// The parent links loop back on themselves, or a message was reached twice.
    #[error("malformed hierarchy: message {message_id} reached more than once")]
    MalformedHierarchy { message_id: MessageId },
}
