//! CSV export of alunos.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use tracing::instrument;

use escola_core::AppError;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

use super::model::{AlunoComTurma, AlunoQueryParams};
use super::service::AlunoService;

const CSV_HEADER: [&str; 6] = ["id", "nome", "data_nascimento", "email", "status", "turma_id"];

/// Renders alunos as CSV. NULL email and turma_id become empty fields;
/// dates are formatted `YYYY-MM-DD`.
pub fn alunos_to_csv(alunos: &[AlunoComTurma]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for aluno in alunos {
        writer.write_record([
            aluno.id.to_string(),
            aluno.nome.clone(),
            aluno.data_nascimento.format("%Y-%m-%d").to_string(),
            aluno.email.clone().unwrap_or_default(),
            aluno.status.as_str().to_string(),
            aluno
                .turma_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| {
        AppError::internal(anyhow::anyhow!("Failed to finalize CSV export: {}", e))
    })?;

    Ok(bytes)
}

/// Export alunos as CSV
#[utoipa::path(
    get,
    path = "/api/alunos/export",
    params(
        AlunoQueryParams
    ),
    responses(
        (status = 200, description = "CSV file with the filtered alunos", content_type = "text/csv"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Alunos"
)]
#[instrument(skip(state))]
pub async fn export_alunos(
    State(state): State<AppState>,
    Query(params): Query<AlunoQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let alunos = AlunoService::get_alunos_unpaginated(&state.db, &params).await?;
    let csv = alunos_to_csv(&alunos)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"alunos.csv\"",
            ),
        ],
        csv,
    ))
}
