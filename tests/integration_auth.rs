mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_usuario, generate_unique_email, setup_test_app};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_usuario(pool: PgPool) {
    let app = setup_test_app(pool).await;
    let email = generate_unique_email();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "nome": "Maria Souza",
                "email": email,
                "senha": "senha-segura"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["email"], email);
    assert_eq!(body["nome"], "Maria Souza");
    assert!(body.get("senha").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let email = generate_unique_email();
    create_test_usuario(&pool, &email, "senha-segura").await;

    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "nome": "Maria Souza",
                "email": email,
                "senha": "senha-segura"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_short_senha(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "nome": "Maria Souza",
                "email": generate_unique_email(),
                "senha": "curta"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_returns_token_and_usuario(pool: PgPool) {
    let email = generate_unique_email();
    create_test_usuario(&pool, &email, "testpass123").await;

    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "senha": "testpass123"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(body["access_token"].as_str().unwrap().len() > 20);
    assert_eq!(body["usuario"]["email"], email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_senha(pool: PgPool) {
    let email = generate_unique_email();
    create_test_usuario(&pool, &email, "testpass123").await;

    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "senha": "wrong-senha"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_inactive_usuario(pool: PgPool) {
    let email = generate_unique_email();
    let usuario_id = create_test_usuario(&pool, &email, "testpass123").await;

    sqlx::query("UPDATE usuarios SET ativo = FALSE WHERE id = $1")
        .bind(usuario_id)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "senha": "testpass123"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_returns_authenticated_usuario(pool: PgPool) {
    let email = generate_unique_email();
    create_test_usuario(&pool, &email, "testpass123").await;

    let app = setup_test_app(pool.clone()).await;
    let token = common::get_auth_token(app, &email, "testpass123").await;

    let app = setup_test_app(pool).await;
    let request = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["email"], email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_without_token(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
