use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

use quill_core::domain::{Caller, Post, PostId};
use quill_core::ports::{BaseRepository, PostRepository};

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;

fn model(id: &str, owner_id: &str, title: &str) -> post::Model {
    let now = chrono::Utc::now();
    post::Model {
        id: id.to_owned(),
        owner_id: owner_id.to_owned(),
        title: title.to_owned(),
        body: "Body".to_owned(),
        author: "Owner".to_owned(),
        image: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model("abc", "owner", "Test Post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(&PostId::from("abc")).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id.as_str(), "abc");
}

#[tokio::test]
async fn test_find_missing_post_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.find_by_id(&PostId::from("nope")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_is_limited_and_ordered() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model("a", "owner", "A"), model("b", "owner", "B")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo.list(Some(10)).await.unwrap();
    assert_eq!(posts.len(), 2);

    let log = repo.db.into_transaction_log();
    assert_eq!(
        log,
        [Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"SELECT "posts"."id", "posts"."owner_id", "posts"."title", "posts"."body", "posts"."author", "posts"."image", "posts"."created_at", "posts"."updated_at" FROM "posts" ORDER BY "posts"."created_at" ASC, "posts"."id" ASC LIMIT $1"#,
            [10u64.into()],
        )]
    );
}

#[tokio::test]
async fn test_find_by_owner_filters_on_owner_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model("a", "owner", "A")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo.find_by_owner("owner").await.unwrap();
    assert_eq!(posts[0].owner_id, "owner");

    let log = repo.db.into_transaction_log();
    assert_eq!(
        log,
        [Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"SELECT "posts"."id", "posts"."owner_id", "posts"."title", "posts"."body", "posts"."author", "posts"."image", "posts"."created_at", "posts"."updated_at" FROM "posts" WHERE "posts"."owner_id" = $1 ORDER BY "posts"."created_at" ASC, "posts"."id" ASC"#,
            ["owner".into()],
        )]
    );
}

#[tokio::test]
async fn test_save_issues_a_single_statement() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = Post::new(
        PostId::from("abc"),
        &Caller::new("owner", "Owner"),
        "A".into(),
        "B".into(),
        None,
    );

    let saved = repo.save(post.clone()).await.unwrap();
    assert_eq!(saved, post);

    assert_eq!(repo.db.into_transaction_log().len(), 1);
}
