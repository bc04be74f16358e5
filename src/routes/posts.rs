//! Thread and comment endpoints.
//!
//! Reads fetch a flat message set for a scope and hand it to the assembler;
//! writes validate the request and insert a single row.

use rocket::State;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket_db_pools::sqlx::PgPool;
use rocket_okapi::openapi;

use crate::config::ForumConfig;
use crate::error::ApiError;
use crate::models::{Message, MessageId, NewMessage};
use crate::routes::helpers::{ensure_parent_exists, resolve_message_id};
use crate::routes::params::PaginationParams;
use crate::store::{self, FetchScope};
use crate::threading::TreeNode;
use crate::validation::ValidationError;

/// List threads newest first, each with its full reply tree
#[openapi(tag = "Posts")]
#[get("/posts?<pagination..>")]
pub async fn list_threads(
    pagination: PaginationParams,
    pool: &State<PgPool>,
    config: &State<ForumConfig>,
) -> Result<Json<Vec<TreeNode>>, ApiError> {
    let size = pagination.size(config.default_page_size);
    let offset = pagination.offset(config.default_page_size);

    let fetched =
        store::fetch_roots_and_descendants(pool.inner(), FetchScope::AllThreads, size, offset)
            .await?;
    let threads = fetched.into_trees()?;

    Ok(Json(threads))
}

/// List the replies of one thread, oldest first and nested
///
/// An unknown thread id yields an empty list.
#[openapi(tag = "Posts")]
#[get("/posts/<post_id>/comments")]
pub async fn list_comments(
    post_id: String,
    pool: &State<PgPool>,
) -> Result<Json<Vec<TreeNode>>, ApiError> {
    let thread_id = resolve_message_id(&post_id)?;

    let fetched =
        store::fetch_roots_and_descendants(pool.inner(), FetchScope::Thread(thread_id), 0, 0)
            .await?;
    let comments = fetched.into_trees()?;

    Ok(Json(comments))
}

/// Start a new thread, or reply when the body names a `parentId`
#[openapi(tag = "Posts")]
#[post("/posts", format = "json", data = "<request>")]
pub async fn create_post(
    request: Json<NewMessage>,
    pool: &State<PgPool>,
    config: &State<ForumConfig>,
) -> Result<Created<Json<Message>>, ApiError> {
    create_message(pool.inner(), config.inner(), request.into_inner(), None).await
}

/// Reply to the message `post_id`
#[openapi(tag = "Posts")]
#[post("/posts/<post_id>/comments", format = "json", data = "<request>")]
pub async fn create_comment(
    post_id: String,
    request: Json<NewMessage>,
    pool: &State<PgPool>,
    config: &State<ForumConfig>,
) -> Result<Created<Json<Message>>, ApiError> {
    let parent_id = resolve_message_id(&post_id)?;
    create_message(pool.inner(), config.inner(), request.into_inner(), Some(parent_id)).await
}

async fn create_message(
    pool: &PgPool,
    config: &ForumConfig,
    request: NewMessage,
    path_parent: Option<MessageId>,
) -> Result<Created<Json<Message>>, ApiError> {
    let validated = request.validate(path_parent, config)?;

    if let Some(parent_id) = validated.parent_id {
        ensure_parent_exists(pool, parent_id).await?;
    }

    // Foreign key violation here means the parent vanished after the check
    let message = store::insert_message(pool, &validated)
        .await
        .map_err(|err| match validated.parent_id {
            Some(parent_id) if store::is_missing_parent(&err) => {
                ApiError::from(ValidationError::UnknownParent(parent_id))
            }
            _ => ApiError::from(err),
        })?;

    log::info!(
        "created message {} ({})",
        message.id,
        match message.parent_id {
            Some(parent_id) => format!("reply to {}", parent_id),
            None => "new thread".to_string(),
        }
    );

    let location = format!("/api/v1/posts/{}/comments", message.id);
    Ok(Created::new(location).body(Json(message)))
}
