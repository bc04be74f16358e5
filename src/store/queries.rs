//! SQL access to the `messages` table.
//!
//! Reads return flat rows ordered by `(created_at, seq)`, so the retrieval
//! order doubles as the insertion-order tie-break the assembler relies on.

use rocket_db_pools::sqlx::{self, PgPool};

use crate::models::{Message, MessageId};
use crate::validation::ValidatedMessage;

use super::scope::{FetchScope, FetchedScope};

/// One page of threads, newest first, plus every reply below them.
///
/// Roots sharing a timestamp are paged in insertion order, the same order the
/// assembler's stable newest-first sort leaves them in.
const THREAD_PAGE_QUERY: &str = r#"
    WITH RECURSIVE page_roots AS (
        SELECT id, parent_id, author, content, created_at, seq
        FROM messages
        WHERE parent_id IS NULL
        ORDER BY created_at DESC, seq ASC
        LIMIT $1 OFFSET $2
    ),
    tree AS (
        SELECT id, parent_id, author, content, created_at, seq
        FROM page_roots
        UNION ALL
        SELECT m.id, m.parent_id, m.author, m.content, m.created_at, m.seq
        FROM messages m
        JOIN tree t ON m.parent_id = t.id
    )
    SELECT id, parent_id, author, content, created_at
    FROM tree
    ORDER BY created_at ASC, seq ASC
"#;

/// A single thread's message plus every reply below it.
const THREAD_SUBTREE_QUERY: &str = r#"
    WITH RECURSIVE tree AS (
        SELECT id, parent_id, author, content, created_at, seq
        FROM messages
        WHERE id = $1
        UNION ALL
        SELECT m.id, m.parent_id, m.author, m.content, m.created_at, m.seq
        FROM messages m
        JOIN tree t ON m.parent_id = t.id
    )
    SELECT id, parent_id, author, content, created_at
    FROM tree
    ORDER BY created_at ASC, seq ASC
"#;

/// Fetch the flat message set for `scope` and split it into roots and replies.
///
/// `limit`/`offset` page the thread roots of [`FetchScope::AllThreads`] and are
/// ignored for a single thread, whose subtree is always returned whole.
pub async fn fetch_roots_and_descendants(
    pool: &PgPool,
    scope: FetchScope,
    limit: i64,
    offset: i64,
) -> Result<FetchedScope, sqlx::Error> {
    let rows: Vec<Message> = match scope {
        FetchScope::AllThreads => {
            sqlx::query_as::<_, Message>(THREAD_PAGE_QUERY)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
        FetchScope::Thread(root_id) => {
            sqlx::query_as::<_, Message>(THREAD_SUBTREE_QUERY)
                .bind(root_id)
                .fetch_all(pool)
                .await?
        }
    };

    let fetched = scope.partition(rows);
    log::debug!(
        "fetched {} roots and {} replies for {:?}",
        fetched.roots.len(),
        fetched.descendants.len(),
        scope
    );

    Ok(fetched)
}

/// Whether a message with `id` is stored.
pub async fn message_exists(pool: &PgPool, id: MessageId) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM messages WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Store a validated message and return it as persisted.
pub async fn insert_message(
    pool: &PgPool,
    message: &ValidatedMessage,
) -> Result<Message, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"INSERT INTO messages (id, parent_id, author, content)
           VALUES ($1, $2, $3, $4)
           RETURNING id, parent_id, author, content, created_at"#,
    )
    .bind(message.id)
    .bind(message.parent_id)
    .bind(&message.author)
    .bind(&message.content)
    .fetch_one(pool)
    .await
}

/// True when `err` is a foreign key violation, i.e. the parent row vanished
/// or never existed.
pub fn is_missing_parent(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err
                .code()
                .map(|code| code == "23503")
                .unwrap_or(false)
    )
}
