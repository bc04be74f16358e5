use rocket_db_pools::{sqlx, Database};

#[derive(Database)]
#[database("forum_db")]
pub struct ForumDb(sqlx::PgPool);
