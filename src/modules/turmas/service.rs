use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use escola_core::AppError;

use super::model::{CreateTurmaDto, Turma, TurmaComOcupacao, UpdateTurmaDto};

/// Occupancy is the number of alunos in the turma with status `ativo`.
/// It is always computed from the alunos table, never stored.
const OCUPACAO_SELECT: &str = r#"
    SELECT t.id, t.nome, t.capacidade,
           COUNT(a.id) FILTER (WHERE a.status = 'ativo') AS ocupacao,
           t.created_at, t.updated_at
    FROM turmas t
    LEFT JOIN alunos a ON a.turma_id = t.id
"#;

pub struct TurmaService;

impl TurmaService {
    #[instrument(skip(db, dto))]
    pub async fn create_turma(db: &PgPool, dto: CreateTurmaDto) -> Result<Turma, AppError> {
        let turma = sqlx::query_as::<_, Turma>(
            "INSERT INTO turmas (nome, capacidade)
             VALUES ($1, $2)
             RETURNING id, nome, capacidade, created_at, updated_at",
        )
        .bind(&dto.nome)
        .bind(dto.capacidade)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Turma with nome '{}' already exists",
                        dto.nome
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(turma)
    }

    #[instrument(skip(db))]
    pub async fn get_turmas(
        db: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TurmaComOcupacao>, i64), AppError> {
        let query = format!(
            "{OCUPACAO_SELECT}
             GROUP BY t.id
             ORDER BY t.nome
             LIMIT $1 OFFSET $2"
        );

        let turmas = sqlx::query_as::<_, TurmaComOcupacao>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
            .await
            .context("Failed to fetch turmas")
            .map_err(AppError::database)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM turmas")
            .fetch_one(db)
            .await
            .context("Failed to count turmas")
            .map_err(AppError::database)?;

        Ok((turmas, total))
    }

    #[instrument(skip(db))]
    pub async fn get_turma(db: &PgPool, id: Uuid) -> Result<TurmaComOcupacao, AppError> {
        let query = format!(
            "{OCUPACAO_SELECT}
             WHERE t.id = $1
             GROUP BY t.id"
        );

        let turma = sqlx::query_as::<_, TurmaComOcupacao>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch turma")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Turma not found")))?;

        Ok(turma)
    }

    /// Updates a turma. Shrinking capacidade below the current active
    /// occupancy is rejected, so the turma row is locked while the
    /// occupancy is counted.
    #[instrument(skip(db, dto))]
    pub async fn update_turma(
        db: &PgPool,
        id: Uuid,
        dto: UpdateTurmaDto,
    ) -> Result<TurmaComOcupacao, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let existing = sqlx::query_as::<_, Turma>(
            "SELECT id, nome, capacidade, created_at, updated_at
             FROM turmas WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to lock turma for update")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Turma not found")))?;

        let nome = dto.nome.unwrap_or(existing.nome);
        let capacidade = dto.capacidade.unwrap_or(existing.capacidade);

        let ocupacao = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM alunos WHERE turma_id = $1 AND status = 'ativo'",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to count turma occupancy")
        .map_err(AppError::database)?;

        if i64::from(capacidade) < ocupacao {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "Cannot reduce capacidade to {} while {} alunos ativos are enrolled",
                capacidade,
                ocupacao
            )));
        }

        let updated = sqlx::query_as::<_, Turma>(
            "UPDATE turmas
             SET nome = $1, capacidade = $2, updated_at = NOW()
             WHERE id = $3
             RETURNING id, nome, capacidade, created_at, updated_at",
        )
        .bind(&nome)
        .bind(capacidade)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Turma with nome '{}' already exists",
                        nome
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(TurmaComOcupacao {
            id: updated.id,
            nome: updated.nome,
            capacidade: updated.capacidade,
            ocupacao,
            created_at: updated.created_at,
            updated_at: updated.updated_at,
        })
    }

    /// Deletes a turma. Alunos assigned to it keep their status but lose
    /// the assignment (`turma_id` is set to NULL by the foreign key).
    #[instrument(skip(db))]
    pub async fn delete_turma(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM turmas WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete turma")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Turma not found")));
        }

        Ok(())
    }
}
