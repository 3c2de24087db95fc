//! Integration tests for Users domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Queries only see users that are not soft-deleted
//! - The partial unique index on email is enforced
//! - A unique violation surfaces as a 409 envelope
//!
//! They need Docker: `cargo test -p domain_users -- --ignored`

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum_helpers::{AppError, DbErrorKind, errors::classify_db_error, with_envelopes};
use domain_users::*;
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, EntityTrait};
use serde_json::{Value, json};
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};
use tower::ServiceExt;
use uuid::Uuid;

fn new_user(builder: &TestDataBuilder, suffix: &str) -> User {
    User::new(
        CreateUser {
            first_name: builder.short_name("first"),
            last_name: builder.short_name("last"),
            email: builder.email(suffix),
            password: String::new(),
        },
        "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
    )
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_user() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let created = repo.create(new_user(&builder, "main")).await.unwrap();

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "user should exist");
    assert_uuid_eq(retrieved.id, created.id, "retrieved user id");
    assert_eq!(retrieved.email, builder.email("main"));

    let by_email = repo.get_by_email(&builder.email("main")).await.unwrap();
    assert_uuid_eq(assert_some(by_email, "lookup by email").id, created.id, "by email");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_index_rejects_active_duplicate() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("unique_index");

    repo.create(new_user(&builder, "dup")).await.unwrap();

    // Bypasses the service check, so the index is what rejects it
    let err = repo.create(new_user(&builder, "dup")).await.unwrap_err();
    let db_err = match err {
        UserError::Database(e) => e,
        other => panic!("expected a database error, got {:?}", other),
    };
    assert_eq!(classify_db_error(&db_err), DbErrorKind::UniqueViolation);

    let response = AppError::Database(db_err).into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Resource already exists");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_foreign_key_violation_is_bad_request() {
    let db = TestDatabase::new().await;
    let conn = db.connection();

    conn.execute_unprepared(
        r#"
        CREATE TABLE IF NOT EXISTS user_notes (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users (id)
        )
        "#,
    )
    .await
    .unwrap();

    let err = conn
        .execute_unprepared(&format!(
            "INSERT INTO user_notes (id, user_id) VALUES ('{}', '{}')",
            Uuid::now_v7(),
            Uuid::now_v7()
        ))
        .await
        .unwrap_err();
    assert_eq!(classify_db_error(&err), DbErrorKind::ForeignKeyViolation);

    let response = AppError::Database(err).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["statusCode"], 400);
    assert!(body["errors"].is_null());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_deleted_email_can_be_reused() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("reuse_email");
    let email = builder.email("reuse");

    let deleted_id = db.insert_user(Uuid::now_v7(), &email, true).await;

    let repo = PgUserRepository::new(db.connection());
    assert!(repo.get_by_id(deleted_id).await.unwrap().is_none());
    assert!(repo.get_by_email(&email).await.unwrap().is_none());

    let service = UserService::new(repo);
    let created = service
        .create(CreateUser {
            first_name: "Again".to_string(),
            last_name: "User".to_string(),
            email: email.clone(),
            password: "long-enough".to_string(),
        })
        .await
        .unwrap();
    assert_ne!(created.id, deleted_id);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_soft_delete_keeps_row() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("soft_delete");

    let user = service
        .create(CreateUser {
            first_name: "Soft".to_string(),
            last_name: "Delete".to_string(),
            email: builder.email("soft"),
            password: "long-enough".to_string(),
        })
        .await
        .unwrap();
    assert!(verify_password("long-enough", &user.password).unwrap());

    let removed = service.remove(user.id).await.unwrap();
    assert!(removed.is_deleted());

    assert!(matches!(
        service.find_by_id(user.id).await,
        Err(UserError::NotFound(_))
    ));
    assert!(service.find_all().await.unwrap().is_empty());

    let still_there = entity::Entity::find_by_id(user.id)
        .one(&db.connection)
        .await
        .unwrap();
    assert!(assert_some(still_there, "row persists").deleted_at.is_some());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_is_oldest_first() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_order");

    let first = repo.create(new_user(&builder, "first")).await.unwrap();
    let second = repo.create(new_user(&builder, "second")).await.unwrap();

    let ids: Vec<Uuid> = repo.list().await.unwrap().into_iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_email_collision_is_conflict_envelope() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("update_collision");
    let repo = PgUserRepository::new(db.connection());

    repo.create(new_user(&builder, "taken")).await.unwrap();
    let other = repo.create(new_user(&builder, "other")).await.unwrap();

    let app = with_envelopes(
        Router::new().nest("/api/users", handlers::router(UserService::new(repo))),
    );

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/api/users/{}", other.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({ "email": builder.email("taken") })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["statusCode"], 409);
    assert_eq!(body["message"], "Resource already exists");
}
