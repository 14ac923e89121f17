use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use escola_core::{AppError, PaginationMeta, PaginationParams};

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateTurmaDto, PaginatedTurmasResponse, Turma, TurmaComOcupacao, UpdateTurmaDto,
};
use super::service::TurmaService;

#[utoipa::path(
    post,
    path = "/api/turmas",
    request_body = CreateTurmaDto,
    responses(
        (status = 201, description = "Turma created successfully", body = Turma),
        (status = 400, description = "Bad request - nome already exists", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Turmas"
)]
#[instrument(skip(state, dto))]
pub async fn create_turma(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTurmaDto>,
) -> Result<(StatusCode, Json<Turma>), AppError> {
    let turma = TurmaService::create_turma(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(turma)))
}

#[utoipa::path(
    get,
    path = "/api/turmas",
    params(
        PaginationParams
    ),
    responses(
        (status = 200, description = "List of turmas with occupancy", body = PaginatedTurmasResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Turmas"
)]
#[instrument(skip(state))]
pub async fn get_turmas(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedTurmasResponse>, AppError> {
    let limit = params.limit();
    let offset = params.offset();
    let page = params.page();

    let (turmas, total) = TurmaService::get_turmas(&state.db, limit, offset).await?;

    Ok(Json(PaginatedTurmasResponse {
        data: turmas,
        meta: PaginationMeta::new(page, limit, total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/turmas/{id}",
    params(
        ("id" = Uuid, Path, description = "Turma ID")
    ),
    responses(
        (status = 200, description = "Turma details with occupancy", body = TurmaComOcupacao),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Turma not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Turmas"
)]
#[instrument(skip(state))]
pub async fn get_turma(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TurmaComOcupacao>, AppError> {
    let turma = TurmaService::get_turma(&state.db, id).await?;
    Ok(Json(turma))
}

#[utoipa::path(
    put,
    path = "/api/turmas/{id}",
    params(
        ("id" = Uuid, Path, description = "Turma ID")
    ),
    request_body = UpdateTurmaDto,
    responses(
        (status = 200, description = "Turma updated successfully", body = TurmaComOcupacao),
        (status = 400, description = "Bad request - nome already exists", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Turma not found", body = ErrorResponse),
        (status = 422, description = "Validation error or capacidade below occupancy", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Turmas"
)]
#[instrument(skip(state, dto))]
pub async fn update_turma(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTurmaDto>,
) -> Result<Json<TurmaComOcupacao>, AppError> {
    let turma = TurmaService::update_turma(&state.db, id, dto).await?;
    Ok(Json(turma))
}

#[utoipa::path(
    delete,
    path = "/api/turmas/{id}",
    params(
        ("id" = Uuid, Path, description = "Turma ID")
    ),
    responses(
        (status = 200, description = "Turma deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Turma not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Turmas"
)]
#[instrument(skip(state))]
pub async fn delete_turma(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    TurmaService::delete_turma(&state.db, id).await?;
    Ok(Json(json!({"message": "Turma deleted successfully"})))
}
