//! End-to-end tests against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL=... cargo test -- --ignored`.

mod common;

use axum::http::StatusCode;
use blog_api::auth::password::hash_password;
use blog_core::retention::{enforce_retention, RetentionPolicy};
use blog_db::repositories::{UserRepo, VisitLogRepo};
use blog_db::retention::PgVisitLogStore;
use common::{body_json, delete, get, get_auth, post_json, post_json_auth, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_category(pool: &PgPool, body: Value) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/categories", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 200);
    json["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn category_list_is_nested_by_default(pool: PgPool) {
    let root = create_category(&pool, json!({ "name": "Rust", "sort_order": 2 })).await;
    let other = create_category(&pool, json!({ "name": "Go", "sort_order": 1 })).await;
    let child = create_category(
        &pool,
        json!({ "name": "Ownership", "type": "article", "parent_id": root }),
    )
    .await;

    let json = body_json(get(common::build_test_app(pool.clone()), "/categories").await).await;
    let roots = json["data"].as_array().unwrap();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0]["id"], other);
    assert_eq!(roots[1]["id"], root);
    assert_eq!(roots[1]["children"][0]["id"], child);
    assert_eq!(roots[1]["children"][0]["type"], "article");

    let json = body_json(get(common::build_test_app(pool), "/categories?tree=false").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn category_detail_loads_whole_subtree(pool: PgPool) {
    let a = create_category(&pool, json!({ "name": "A" })).await;
    let b = create_category(&pool, json!({ "name": "B", "parent_id": a })).await;
    let c = create_category(&pool, json!({ "name": "C", "parent_id": b })).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/categories/{a}")).await).await;
    assert_eq!(json["data"]["children"][0]["id"], b);
    assert_eq!(json["data"]["children"][0]["children"][0]["id"], c);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn category_cannot_move_beneath_descendant(pool: PgPool) {
    let a = create_category(&pool, json!({ "name": "A" })).await;
    let b = create_category(&pool, json!({ "name": "B", "parent_id": a })).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &format!("/categories/{a}"), json!({ "name": "A", "parent_id": b })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/categories/{a}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn hot_tags_are_ranked_by_use(pool: PgPool) {
    create_category(&pool, json!({ "name": "A", "tags": ["rust", "web"] })).await;
    create_category(&pool, json!({ "name": "B", "tags": ["rust"] })).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/categories/hot-tags?limit=1").await).await;
    assert_eq!(json["data"], json!([{ "name": "rust", "count": 2 }]));
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn replies_nest_under_their_root(pool: PgPool) {
    let folder = create_category(&pool, json!({ "name": "Folder" })).await;
    let article =
        create_category(&pool, json!({ "name": "Post", "type": "article" })).await;
    let token = common::user_token();

    let app = common::build_test_app(pool.clone());
    let body = json!({ "article_id": folder, "nickname": "ann", "content": "hi" });
    let response = post_json_auth(app, "/comments", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let body = json!({ "article_id": article, "nickname": "ann", "content": "first" });
    let root = body_json(post_json_auth(app, "/comments", body, &token).await).await;
    let root_id = root["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = json!({
        "article_id": article,
        "parent_id": root_id,
        "nickname": "bob",
        "content": "reply",
    });
    let response = post_json_auth(app, "/comments", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let uri = format!("/comments?article_id={article}");
    let json = body_json(get_auth(app, &uri, &token).await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["page"], 1);
    assert_eq!(json["data"][0]["id"], root_id);
    assert_eq!(json["data"][0]["children"][0]["nickname"], "bob");
}

// ---------------------------------------------------------------------------
// Visits and login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn visit_log_is_trimmed_to_keep_count(pool: PgPool) {
    for i in 0..25 {
        let app = common::build_test_app(pool.clone());
        let body = json!({ "visit_time": format!("2024-05-01 10:00:{i:02}") });
        let response = post_json(app, "/visits", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // The worker is best-effort; a final synchronous pass makes the count exact.
    let store = PgVisitLogStore::new(pool.clone());
    enforce_retention(&store, RetentionPolicy::default())
        .await
        .unwrap();

    assert_eq!(VisitLogRepo::count(&pool).await.unwrap(), 20);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/visits?page_size=5").await).await;
    assert_eq!(json["total"], 20);
    assert_eq!(json["data"][0]["content"], "Regular visit");
    assert_eq!(json["data"][0]["visit_time"], "2024-05-01 10:00:24");
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn owner_login_then_verify(pool: PgPool) {
    let hash = hash_password("s3cret").unwrap();
    UserRepo::upsert_owner(&pool, "owner", &hash).await.unwrap();

    let app = common::build_test_app(pool.clone());
    let body = json!({ "account": "owner", "password": "wrong" });
    let response = post_json(app, "/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool.clone());
    let body = json!({ "account": "owner", "password": "s3cret" });
    let json = body_json(post_json(app, "/api/login", body).await).await;
    assert_eq!(json["data"]["is_owner"], true);
    let token = json["data"]["token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/auth/verify", &token).await).await;
    assert_eq!(json["data"]["account"], "owner");
    assert_eq!(json["data"]["is_owner"], true);
}
