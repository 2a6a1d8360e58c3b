mod common;

use axum::http::StatusCode;
use common::{body_json, json_request, register_user, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_is_public_and_hides_deleted(pool: PgPool) {
    let app = setup_test_app(pool);
    let alice = register_user(&app).await;
    let bob = register_user(&app).await;

    app.clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/users/{}", bob.id),
            Some(&bob.token),
            None,
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request("GET", "/api/users", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let users = body.as_array().unwrap();
    assert!(users.iter().any(|u| u["id"] == alice.id));
    assert!(!users.iter().any(|u| u["id"] == bob.id));
    assert!(users.iter().all(|u| u.get("email").is_none()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_user(pool: PgPool) {
    let app = setup_test_app(pool);
    let user = register_user(&app).await;

    let response = app
        .clone()
        .oneshot(json_request("GET", &format!("/api/users/{}", user.id), None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "id": user.id, "username": user.username })
    );

    let response = app
        .oneshot(json_request("GET", "/api/users/999999", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_own_username(pool: PgPool) {
    let app = setup_test_app(pool);
    let user = register_user(&app).await;
    let new_name = format!("{}_x", &user.username[..10]);

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/users/{}", user.id),
            Some(&user.token),
            Some(json!({ "username": new_name })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["username"], new_name);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_unchanged_username_is_noop(pool: PgPool) {
    let app = setup_test_app(pool);
    let user = register_user(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/users/{}", user.id),
            Some(&user.token),
            Some(json!({ "username": user.username })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["username"], user.username);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_username_taken(pool: PgPool) {
    let app = setup_test_app(pool);
    let alice = register_user(&app).await;
    let bob = register_user(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/users/{}", alice.id),
            Some(&alice.token),
            Some(json!({ "username": bob.username })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_other_user_forbidden(pool: PgPool) {
    let app = setup_test_app(pool);
    let alice = register_user(&app).await;
    let bob = register_user(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/users/{}", bob.id),
            Some(&alice.token),
            Some(json!({ "username": "stolen_name" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_own_account(pool: PgPool) {
    let app = setup_test_app(pool);
    let user = register_user(&app).await;
    let uri = format!("/api/users/{}", user.id);

    let response = app
        .clone()
        .oneshot(json_request("DELETE", &uri, Some(&user.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(json_request("GET", &uri, None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The token outlives the account until it expires; deleting again is 404.
    let response = app
        .oneshot(json_request("DELETE", &uri, Some(&user.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
