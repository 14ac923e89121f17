mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    authenticated_token, create_test_aluno, create_test_turma, generate_unique_turma_nome,
    setup_test_app,
};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

fn matricula_request(token: &str, aluno_id: Uuid, turma_id: Uuid) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/matriculas")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "aluno_id": aluno_id,
                "turma_id": turma_id
            }))
            .unwrap(),
        ))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_matricula_sets_turma_and_status(pool: PgPool) {
    let turma_id = create_test_turma(&pool, &generate_unique_turma_nome(), 20).await;
    let aluno_id = create_test_aluno(&pool, "Bruno Costa", "inativo", None).await;

    let token = authenticated_token(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(matricula_request(&token, aluno_id, turma_id))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["novo_status"], "ativo");
    assert_eq!(body["aluno_id"], aluno_id.to_string());

    let (status, assigned): (String, Option<Uuid>) = sqlx::query_as(
        "SELECT status::text, turma_id FROM alunos WHERE id = $1",
    )
    .bind(aluno_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(status, "ativo");
    assert_eq!(assigned, Some(turma_id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_matricula_turma_full(pool: PgPool) {
    let turma_id = create_test_turma(&pool, &generate_unique_turma_nome(), 2).await;
    create_test_aluno(&pool, "Aluno Ativo Um", "ativo", Some(turma_id)).await;
    create_test_aluno(&pool, "Aluno Ativo Dois", "ativo", Some(turma_id)).await;
    let aluno_id = create_test_aluno(&pool, "Bruno Costa", "inativo", None).await;

    let token = authenticated_token(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(matricula_request(&token, aluno_id, turma_id))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // The aluno must be left untouched
    let (status, assigned): (String, Option<Uuid>) = sqlx::query_as(
        "SELECT status::text, turma_id FROM alunos WHERE id = $1",
    )
    .bind(aluno_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(status, "inativo");
    assert_eq!(assigned, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_matricula_fills_last_seat(pool: PgPool) {
    let turma_id = create_test_turma(&pool, &generate_unique_turma_nome(), 2).await;
    create_test_aluno(&pool, "Aluno Ativo Um", "ativo", Some(turma_id)).await;
    let aluno_id = create_test_aluno(&pool, "Bruno Costa", "inativo", None).await;

    let token = authenticated_token(&pool).await;
    let app = setup_test_app(pool).await;

    let response = app
        .oneshot(matricula_request(&token, aluno_id, turma_id))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_matricula_is_idempotent_for_enrolled_aluno(pool: PgPool) {
    // An aluno already ativo in the turma does not occupy a second seat
    let turma_id = create_test_turma(&pool, &generate_unique_turma_nome(), 1).await;
    let aluno_id = create_test_aluno(&pool, "Bruno Costa", "ativo", Some(turma_id)).await;

    let token = authenticated_token(&pool).await;
    let app = setup_test_app(pool).await;

    let response = app
        .oneshot(matricula_request(&token, aluno_id, turma_id))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_matricula_unknown_aluno(pool: PgPool) {
    let turma_id = create_test_turma(&pool, &generate_unique_turma_nome(), 20).await;

    let token = authenticated_token(&pool).await;
    let app = setup_test_app(pool).await;

    let response = app
        .oneshot(matricula_request(&token, Uuid::new_v4(), turma_id))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_matricula_unknown_turma(pool: PgPool) {
    let aluno_id = create_test_aluno(&pool, "Bruno Costa", "inativo", None).await;

    let token = authenticated_token(&pool).await;
    let app = setup_test_app(pool).await;

    let response = app
        .oneshot(matricula_request(&token, aluno_id, Uuid::new_v4()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_matricula_requires_auth(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/matriculas")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "aluno_id": Uuid::new_v4(),
                "turma_id": Uuid::new_v4()
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
