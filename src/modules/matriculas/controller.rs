use axum::{Json, extract::State};
use tracing::instrument;

use escola_core::AppError;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{MatriculaRequest, MatriculaResponse};
use super::service::MatriculaService;

/// Enroll an aluno into a turma
#[utoipa::path(
    post,
    path = "/api/matriculas",
    request_body = MatriculaRequest,
    responses(
        (status = 200, description = "Aluno enrolled successfully", body = MatriculaResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Aluno or turma not found", body = ErrorResponse),
        (status = 422, description = "Turma at full capacity", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Matriculas"
)]
#[instrument(skip(state))]
pub async fn matricular_aluno(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<MatriculaRequest>,
) -> Result<Json<MatriculaResponse>, AppError> {
    let response = MatriculaService::matricular(&state.db, request).await?;
    Ok(Json(response))
}
