use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use escola_core::AppError;
use escola_models::alunos::StatusAluno;

use super::model::{MatriculaRequest, MatriculaResponse};

pub struct MatriculaService;

impl MatriculaService {
    /// Enrolls an aluno into a turma.
    ///
    /// The whole operation runs inside one transaction: the turma row is
    /// locked before the active occupancy is counted, so two concurrent
    /// matrículas cannot both squeeze into the last remaining seat.
    #[instrument(skip(db))]
    pub async fn matricular(
        db: &PgPool,
        request: MatriculaRequest,
    ) -> Result<MatriculaResponse, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        #[derive(sqlx::FromRow)]
        struct TurmaRow {
            nome: String,
            capacidade: i32,
        }

        let turma = sqlx::query_as::<_, TurmaRow>(
            "SELECT nome, capacidade FROM turmas WHERE id = $1 FOR UPDATE",
        )
        .bind(request.turma_id)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to lock turma for matricula")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Turma not found")))?;

        let aluno_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM alunos WHERE id = $1)",
        )
        .bind(request.aluno_id)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to check aluno existence")
        .map_err(AppError::database)?;

        if !aluno_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Aluno not found")));
        }

        let ocupacao = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM alunos
             WHERE turma_id = $1 AND status = 'ativo' AND id <> $2",
        )
        .bind(request.turma_id)
        .bind(request.aluno_id)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to count turma occupancy")
        .map_err(AppError::database)?;

        if ocupacao >= i64::from(turma.capacidade) {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "Turma '{}' has reached its maximum capacity of {} alunos",
                turma.nome,
                turma.capacidade
            )));
        }

        sqlx::query(
            "UPDATE alunos SET turma_id = $1, status = 'ativo', updated_at = NOW()
             WHERE id = $2",
        )
        .bind(request.turma_id)
        .bind(request.aluno_id)
        .execute(&mut *tx)
        .await
        .context("Failed to enroll aluno")
        .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(MatriculaResponse {
            message: format!("Aluno enrolled in turma '{}'", turma.nome),
            aluno_id: request.aluno_id,
            turma_id: request.turma_id,
            novo_status: StatusAluno::Ativo,
        })
    }
}
