use forum_api::models::Message;
use forum_api::routes::posts::{create_comment, create_post, list_comments, list_threads};
use forum_api::test_support::{TestDatabase, TestDatabaseError, TestRocketBuilder};
use forum_api::threading::TreeNode;
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use rocket::routes;
use rocket::serde::json::json;
use uuid::Uuid;

async fn post_json(client: &Client, uri: String, body: serde_json::Value) -> (Status, String) {
    let response = client
        .post(uri)
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch()
        .await;
    let status = response.status();
    let body = response.into_string().await.unwrap_or_default();
    (status, body)
}

async fn create(client: &Client, uri: String, author: &str, content: &str) -> Message {
    let (status, body) =
        post_json(client, uri, json!({ "author": author, "content": content })).await;
    assert_eq!(status, Status::Created, "unexpected body: {body}");
    serde_json::from_str(&body).expect("created message JSON")
}

fn ids(nodes: &[TreeNode]) -> Vec<Uuid> {
    nodes.iter().map(|node| node.message.id).collect()
}

async fn listed_thread_ids(client: &Client, uri: &str) -> Vec<Uuid> {
    let response = client.get(uri.to_string()).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let threads: Vec<TreeNode> = response.into_json().await.expect("threads JSON");
    ids(&threads)
}

#[tokio::test]
async fn threads_and_comments_round_trip() {
    let test_db = match TestDatabase::new().await {
        Ok(db) => db,
        Err(TestDatabaseError::Container(err)) => {
            eprintln!("skipping posts integration test: no container runtime ({err})");
            return;
        }
        Err(err) => panic!("failed to provision test database: {err:?}"),
    };

    let client = TestRocketBuilder::new()
        .manage_pg_pool(test_db.pool_clone())
        .mount_api_routes(routes![
            list_threads,
            create_post,
            list_comments,
            create_comment
        ])
        .async_client()
        .await;

    let first = create(&client, "/api/v1/posts".into(), "alice", "first thread").await;
    let second = create(&client, "/api/v1/posts".into(), "bob", "second thread").await;
    assert!(first.parent_id.is_none());

    let comments_of = |id: Uuid| format!("/api/v1/posts/{id}/comments");
    let reply_a = create(&client, comments_of(first.id), "bob", "reply a").await;
    let reply_b = create(&client, comments_of(reply_a.id), "carol", "reply to a").await;
    let reply_c = create(&client, comments_of(first.id), "dave", "reply c").await;
    assert_eq!(reply_b.parent_id, Some(reply_a.id));

    // Timeline: newest thread first, replies oldest first and nested
    let response = client.get("/api/v1/posts").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let threads: Vec<TreeNode> = response.into_json().await.expect("threads JSON");

    assert_eq!(ids(&threads), vec![second.id, first.id]);
    assert!(threads[0].children.is_empty());
    let first_thread = &threads[1];
    assert_eq!(ids(&first_thread.children), vec![reply_a.id, reply_c.id]);
    assert_eq!(ids(&first_thread.children[0].children), vec![reply_b.id]);
    assert_eq!(first_thread.children[0].children[0].depth, 2);

    // Pagination applies to threads only
    let response = client.get("/api/v1/posts?page=2&size=1").dispatch().await;
    let page: Vec<TreeNode> = response.into_json().await.expect("page JSON");
    assert_eq!(ids(&page), vec![first.id]);
    assert_eq!(page[0].subtree_size(), 4);

    // Comment view starts at the direct replies
    let response = client.get(comments_of(first.id)).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let comments: Vec<TreeNode> = response.into_json().await.expect("comments JSON");
    assert_eq!(ids(&comments), vec![reply_a.id, reply_c.id]);
    assert_eq!(comments[0].depth, 0);

    // Unknown thread reads as "no replies yet"
    let response = client.get(comments_of(Uuid::new_v4())).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let empty: Vec<TreeNode> = response.into_json().await.expect("empty JSON");
    assert!(empty.is_empty());

    let response = client
        .get("/api/v1/posts/not-a-uuid/comments")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    drop(response);
    drop(client);
    test_db.close().await.expect("failed to stop test database");
}

#[tokio::test]
async fn creation_rejects_invalid_requests() {
    let test_db = match TestDatabase::new().await {
        Ok(db) => db,
        Err(TestDatabaseError::Container(err)) => {
            eprintln!("skipping creation validation test: no container runtime ({err})");
            return;
        }
        Err(err) => panic!("failed to provision test database: {err:?}"),
    };

    let client = TestRocketBuilder::new()
        .manage_pg_pool(test_db.pool_clone())
        .mount_api_routes(routes![create_post, create_comment])
        .async_client()
        .await;

    let (status, _) = post_json(
        &client,
        "/api/v1/posts".into(),
        json!({ "author": "alice", "content": "   " }),
    )
    .await;
    assert_eq!(status, Status::BadRequest);

    let (status, _) = post_json(&client, "/api/v1/posts".into(), json!({ "content": "hi" })).await;
    assert_eq!(status, Status::BadRequest);

    // Older clients send `user` instead of `author`
    let (status, _) = post_json(
        &client,
        "/api/v1/posts".into(),
        json!({ "user": "alice", "content": "legacy field" }),
    )
    .await;
    assert_eq!(status, Status::Created);

    let (status, body) = post_json(
        &client,
        format!("/api/v1/posts/{}/comments", Uuid::new_v4()),
        json!({ "author": "bob", "content": "reply to nothing" }),
    )
    .await;
    assert_eq!(status, Status::BadRequest);
    assert!(body.contains("does not exist"), "unexpected body: {body}");

    let (status, _) = post_json(
        &client,
        "/api/v1/posts".into(),
        json!({ "author": "bob", "content": "bad parent", "parentId": "zzz" }),
    )
    .await;
    assert_eq!(status, Status::BadRequest);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
        .fetch_one(test_db.pool())
        .await
        .expect("count messages");
    assert_eq!(count, 1);

    drop(client);
    test_db.close().await.expect("failed to stop test database");
}

#[tokio::test]
async fn tied_threads_page_in_listing_order() {
    let test_db = match TestDatabase::new().await {
        Ok(db) => db,
        Err(TestDatabaseError::Container(err)) => {
            eprintln!("skipping tied threads test: no container runtime ({err})");
            return;
        }
        Err(err) => panic!("failed to provision test database: {err:?}"),
    };

    // Inserted one after the other with the same timestamp
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    for (id, content) in [(first, "first"), (second, "second")] {
        sqlx::query(
            "INSERT INTO messages (id, author, content, created_at)
             VALUES ($1, 'alice', $2, '2024-06-01T12:00:00Z')",
        )
        .bind(id)
        .bind(content)
        .execute(test_db.pool())
        .await
        .expect("insert tied thread");
    }

    let client = TestRocketBuilder::new()
        .manage_pg_pool(test_db.pool_clone())
        .mount_api_routes(routes![list_threads])
        .async_client()
        .await;

    let unpaged = listed_thread_ids(&client, "/api/v1/posts?size=2").await;
    assert_eq!(unpaged, vec![first, second]);

    let mut paged = listed_thread_ids(&client, "/api/v1/posts?page=1&size=1").await;
    paged.extend(listed_thread_ids(&client, "/api/v1/posts?page=2&size=1").await);
    assert_eq!(paged, unpaged);

    drop(client);
    test_db.close().await.expect("failed to stop test database");
}
