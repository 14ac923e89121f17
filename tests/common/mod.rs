use axum::body::Body;
use axum::http::Request;
use escola_api::router::init_router;
use escola_api::state::AppState;
use escola_config::{CorsConfig, JwtConfig};
use escola_core::hash_password;
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool.clone(),
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn generate_unique_turma_nome() -> String {
    format!("Turma {}", Uuid::new_v4())
}

/// Creates a usuario directly in the database and returns its id.
#[allow(dead_code)]
pub async fn create_test_usuario(pool: &PgPool, email: &str, senha: &str) -> Uuid {
    let hashed = hash_password(senha).unwrap();

    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO usuarios (nome, email, senha)
         VALUES ($1, $2, $3)
         RETURNING id",
    )
    .bind("Test Usuario")
    .bind(email)
    .bind(&hashed)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Logs in through the API and returns the bearer token.
#[allow(dead_code)]
pub async fn get_auth_token(app: axum::Router, email: &str, senha: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "senha": senha
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

/// Creates a usuario and returns a ready-to-use bearer token.
#[allow(dead_code)]
pub async fn authenticated_token(pool: &PgPool) -> String {
    let email = generate_unique_email();
    let senha = "testpass123";
    create_test_usuario(pool, &email, senha).await;

    let app = setup_test_app(pool.clone()).await;
    get_auth_token(app, &email, senha).await
}

/// Creates a turma directly in the database and returns its id.
#[allow(dead_code)]
pub async fn create_test_turma(pool: &PgPool, nome: &str, capacidade: i32) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO turmas (nome, capacidade)
         VALUES ($1, $2)
         RETURNING id",
    )
    .bind(nome)
    .bind(capacidade)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Creates an aluno directly in the database and returns its id.
#[allow(dead_code)]
pub async fn create_test_aluno(
    pool: &PgPool,
    nome: &str,
    status: &str,
    turma_id: Option<Uuid>,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO alunos (nome, data_nascimento, email, status, turma_id)
         VALUES ($1, '2012-05-10', $2, $3::status_aluno, $4)
         RETURNING id",
    )
    .bind(nome)
    .bind(generate_unique_email())
    .bind(status)
    .bind(turma_id)
    .fetch_one(pool)
    .await
    .unwrap()
}
