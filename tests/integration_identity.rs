//! Request identity resolution through the full router. None of these
//! requests reach the database.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use common::{body_json, json_request, setup_app_without_db};
use serde_json::json;
use tower::ServiceExt;

use mytherion::mytherion_auth::Role;

fn me_request(cookie: Option<&str>, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/api/auth/me");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    if let Some(authorization) = authorization {
        builder = builder.header(header::AUTHORIZATION, authorization);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_me_without_credentials_is_unauthorized() {
    let (app, _) = setup_app_without_db();

    let response = app.oneshot(me_request(None, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn test_me_with_bearer_token() {
    let (app, state) = setup_app_without_db();
    let token = state.tokens.issue(42, "a@b.com", Role::Admin).unwrap();

    let response = app
        .oneshot(me_request(None, Some(&format!("Bearer {}", token))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "id": 42, "email": "a@b.com", "role": "ADMIN" }));
}

#[tokio::test]
async fn test_me_with_cookie_token() {
    let (app, state) = setup_app_without_db();
    let token = state.tokens.issue(5, "cookie@b.com", Role::User).unwrap();

    let response = app
        .oneshot(me_request(Some(&format!("mytherion_token={}", token)), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], 5);
    assert_eq!(body["role"], "USER");
}

#[tokio::test]
async fn test_valid_cookie_wins_over_malformed_header() {
    let (app, state) = setup_app_without_db();
    let token = state.tokens.issue(9, "c@d.com", Role::User).unwrap();

    let response = app
        .oneshot(me_request(
            Some(&format!("mytherion_token={}", token)),
            Some("Bearer definitely-not-a-jwt"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], 9);
}

#[tokio::test]
async fn test_malformed_bearer_resolves_to_anonymous() {
    let (app, _) = setup_app_without_db();

    let response = app
        .oneshot(me_request(None, Some("Bearer definitely-not-a-jwt")))
        .await
        .unwrap();

    // Anonymous, so the extractor rejects; the middleware itself never errors.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Authentication required");
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let (app, state) = setup_app_without_db();
    let issued = Utc::now() - Duration::hours(2);
    let token = state
        .tokens
        .issue_at(1, "old@b.com", Role::User, issued)
        .unwrap();

    let response = app
        .oneshot(me_request(None, Some(&format!("Bearer {}", token))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (app, state) = setup_app_without_db();
    let token = state.tokens.issue(3, "bye@b.com", Role::User).unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, format!("mytherion_token={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("logout must set a cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("mytherion_token=;"));
    assert!(set_cookie.contains("Max-Age=0"));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));

    // What the browser sends after applying the cleared cookie.
    let cleared = set_cookie.split(';').next().unwrap();
    let response = app.oneshot(me_request(Some(cleared), None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_works_anonymously() {
    let (app, _) = setup_app_without_db();

    let response = app
        .oneshot(json_request("POST", "/api/auth/logout", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn test_protected_routes_require_authentication() {
    let (app, _) = setup_app_without_db();

    for (method, uri) in [
        ("GET", "/api/projects"),
        ("GET", "/api/projects/1"),
        ("GET", "/api/projects/1/stats"),
        ("DELETE", "/api/projects/1"),
        ("GET", "/api/projects/1/entities"),
        ("GET", "/api/entities/1"),
        ("DELETE", "/api/entities/1"),
        ("DELETE", "/api/users/1"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(method, uri, None, None))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} should require authentication",
            method,
            uri
        );
    }
}

#[tokio::test]
async fn test_cannot_modify_another_users_account() {
    let (app, state) = setup_app_without_db();
    let token = state.tokens.issue(1, "me@b.com", Role::User).unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/users/2",
            Some(&token),
            Some(json!({ "username": "hijacked" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(json_request("DELETE", "/api/users/2", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_validation_runs_before_storage() {
    let (app, _) = setup_app_without_db();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "email": "not-an-email",
                "username": "ok_name",
                "password": "long-enough-password"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_whitespace_only_names_are_rejected() {
    let (app, state) = setup_app_without_db();
    let token = state.tokens.issue(1, "me@b.com", Role::User).unwrap();

    let cases = [
        (
            "POST",
            "/api/auth/register",
            None,
            json!({
                "email": "a@b.com",
                "username": "     ",
                "password": "long-enough-password"
            }),
        ),
        ("PUT", "/api/users/1", Some(token.as_str()), json!({ "username": "   " })),
        ("POST", "/api/projects", Some(token.as_str()), json!({ "name": "   " })),
        (
            "POST",
            "/api/projects/1/entities",
            Some(token.as_str()),
            json!({ "type": "ITEM", "name": " \t " }),
        ),
        ("PATCH", "/api/entities/1", Some(token.as_str()), json!({ "name": "  " })),
    ];

    for (method, uri, token, body) in cases {
        let response = app
            .clone()
            .oneshot(json_request(method, uri, token, Some(body)))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "{} {}",
            method,
            uri
        );
    }
}

#[tokio::test]
async fn test_empty_cookie_falls_back_to_bearer_header() {
    let (app, state) = setup_app_without_db();
    let token = state.tokens.issue(5, "e@f.com", Role::User).unwrap();

    let response = app
        .oneshot(me_request(
            Some("mytherion_token="),
            Some(&format!("Bearer {}", token)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], 5);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (app, _) = setup_app_without_db();

    let response = app
        .oneshot(json_request("GET", "/api-docs/openapi.json", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/api/auth/login"].is_object());
}
