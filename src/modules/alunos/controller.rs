use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use escola_core::{AppError, PaginationMeta};

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    AlunoQueryParams, AlunoResponse, CreateAlunoDto, PaginatedAlunosResponse, UpdateAlunoDto,
};
use super::service::AlunoService;

#[utoipa::path(
    post,
    path = "/api/alunos",
    request_body = CreateAlunoDto,
    responses(
        (status = 201, description = "Aluno created successfully", body = AlunoResponse),
        (status = 400, description = "Bad request - email already exists", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Turma not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Alunos"
)]
#[instrument(skip(state, dto))]
pub async fn create_aluno(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAlunoDto>,
) -> Result<(StatusCode, Json<AlunoResponse>), AppError> {
    let aluno = AlunoService::create_aluno(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(aluno.into())))
}

#[utoipa::path(
    get,
    path = "/api/alunos",
    params(
        AlunoQueryParams
    ),
    responses(
        (status = 200, description = "List of alunos", body = PaginatedAlunosResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Alunos"
)]
#[instrument(skip(state))]
pub async fn get_alunos(
    State(state): State<AppState>,
    Query(params): Query<AlunoQueryParams>,
) -> Result<Json<PaginatedAlunosResponse>, AppError> {
    let (alunos, total) = AlunoService::get_alunos(&state.db, &params).await?;

    Ok(Json(PaginatedAlunosResponse {
        data: alunos.into_iter().map(AlunoResponse::from).collect(),
        meta: PaginationMeta::new(params.page(), params.limit(), total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/alunos/{id}",
    params(
        ("id" = Uuid, Path, description = "Aluno ID")
    ),
    responses(
        (status = 200, description = "Aluno details", body = AlunoResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Aluno not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Alunos"
)]
#[instrument(skip(state))]
pub async fn get_aluno(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AlunoResponse>, AppError> {
    let aluno = AlunoService::get_aluno(&state.db, id).await?;
    Ok(Json(aluno.into()))
}

#[utoipa::path(
    put,
    path = "/api/alunos/{id}",
    params(
        ("id" = Uuid, Path, description = "Aluno ID")
    ),
    request_body = UpdateAlunoDto,
    responses(
        (status = 200, description = "Aluno updated successfully", body = AlunoResponse),
        (status = 400, description = "Bad request - email already exists", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Aluno or turma not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Alunos"
)]
#[instrument(skip(state, dto))]
pub async fn update_aluno(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAlunoDto>,
) -> Result<Json<AlunoResponse>, AppError> {
    let aluno = AlunoService::update_aluno(&state.db, id, dto).await?;
    Ok(Json(aluno.into()))
}

#[utoipa::path(
    delete,
    path = "/api/alunos/{id}",
    params(
        ("id" = Uuid, Path, description = "Aluno ID")
    ),
    responses(
        (status = 200, description = "Aluno deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Aluno not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Alunos"
)]
#[instrument(skip(state))]
pub async fn delete_aluno(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    AlunoService::delete_aluno(&state.db, id).await?;
    Ok(Json(json!({"message": "Aluno deleted successfully"})))
}
