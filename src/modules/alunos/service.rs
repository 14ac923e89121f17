use anyhow::Context;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use escola_core::AppError;

use super::model::{AlunoComTurma, AlunoQueryParams, CreateAlunoDto, StatusAluno, UpdateAlunoDto};

const ALUNO_SELECT: &str = r#"
    SELECT a.id, a.nome, a.data_nascimento, a.email, a.status, a.turma_id,
           t.nome AS turma_nome, a.created_at, a.updated_at
    FROM alunos a
    LEFT JOIN turmas t ON t.id = a.turma_id
    WHERE TRUE
"#;

fn apply_filters(builder: &mut QueryBuilder<'_, Postgres>, params: &AlunoQueryParams) {
    if let Some(search) = &params.search {
        builder.push(" AND a.nome ILIKE ");
        builder.push_bind(format!("%{}%", search));
    }
    if let Some(turma_id) = params.turma_id {
        builder.push(" AND a.turma_id = ");
        builder.push_bind(turma_id);
    }
    if let Some(status) = params.status {
        builder.push(" AND a.status = ");
        builder.push_bind(status);
    }
}

async fn ensure_turma_exists(
    db: &PgPool,
    turma_id: Uuid,
) -> Result<(), AppError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM turmas WHERE id = $1)")
        .bind(turma_id)
        .fetch_one(db)
        .await
        .context("Failed to check turma existence")
        .map_err(AppError::database)?;

    if !exists {
        return Err(AppError::not_found(anyhow::anyhow!("Turma not found")));
    }

    Ok(())
}

pub struct AlunoService;

impl AlunoService {
    #[instrument(skip(db, dto))]
    pub async fn create_aluno(db: &PgPool, dto: CreateAlunoDto) -> Result<AlunoComTurma, AppError> {
        if let Some(turma_id) = dto.turma_id {
            ensure_turma_exists(db, turma_id).await?;
        }

        let status = dto.status.unwrap_or(StatusAluno::Inativo);

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO alunos (nome, data_nascimento, email, status, turma_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&dto.nome)
        .bind(dto.data_nascimento)
        .bind(&dto.email)
        .bind(status)
        .bind(dto.turma_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Aluno with email {} already exists",
                        dto.email.as_deref().unwrap_or_default()
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Self::get_aluno(db, id).await
    }

    #[instrument(skip(db, params))]
    pub async fn get_alunos(
        db: &PgPool,
        params: &AlunoQueryParams,
    ) -> Result<(Vec<AlunoComTurma>, i64), AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(ALUNO_SELECT);
        apply_filters(&mut builder, params);
        builder.push(" ORDER BY a.nome LIMIT ");
        builder.push_bind(params.limit());
        builder.push(" OFFSET ");
        builder.push_bind(params.offset());

        let alunos = builder
            .build_query_as::<AlunoComTurma>()
            .fetch_all(db)
            .await
            .context("Failed to fetch alunos")
            .map_err(AppError::database)?;

        let mut count_builder =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM alunos a WHERE TRUE");
        apply_filters(&mut count_builder, params);

        let total = count_builder
            .build_query_scalar::<i64>()
            .fetch_one(db)
            .await
            .context("Failed to count alunos")
            .map_err(AppError::database)?;

        Ok((alunos, total))
    }

    /// Fetches all alunos matching the filters, without pagination. Used by
    /// the CSV export.
    #[instrument(skip(db, params))]
    pub async fn get_alunos_unpaginated(
        db: &PgPool,
        params: &AlunoQueryParams,
    ) -> Result<Vec<AlunoComTurma>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(ALUNO_SELECT);
        apply_filters(&mut builder, params);
        builder.push(" ORDER BY a.nome");

        let alunos = builder
            .build_query_as::<AlunoComTurma>()
            .fetch_all(db)
            .await
            .context("Failed to fetch alunos for export")
            .map_err(AppError::database)?;

        Ok(alunos)
    }

    #[instrument(skip(db))]
    pub async fn get_aluno(db: &PgPool, id: Uuid) -> Result<AlunoComTurma, AppError> {
        let query = format!("{ALUNO_SELECT} AND a.id = $1");

        let aluno = sqlx::query_as::<_, AlunoComTurma>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch aluno")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Aluno not found")))?;

        Ok(aluno)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_aluno(
        db: &PgPool,
        id: Uuid,
        dto: UpdateAlunoDto,
    ) -> Result<AlunoComTurma, AppError> {
        let existing = Self::get_aluno(db, id).await?;

        if let Some(turma_id) = dto.turma_id {
            ensure_turma_exists(db, turma_id).await?;
        }

        let nome = dto.nome.unwrap_or(existing.nome);
        let data_nascimento = dto.data_nascimento.unwrap_or(existing.data_nascimento);
        let email = dto.email.or(existing.email);
        let status = dto.status.unwrap_or(existing.status);
        let turma_id = dto.turma_id.or(existing.turma_id);

        sqlx::query(
            "UPDATE alunos
             SET nome = $1, data_nascimento = $2, email = $3, status = $4,
                 turma_id = $5, updated_at = NOW()
             WHERE id = $6",
        )
        .bind(&nome)
        .bind(data_nascimento)
        .bind(&email)
        .bind(status)
        .bind(turma_id)
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Aluno with email {} already exists",
                        email.as_deref().unwrap_or_default()
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Self::get_aluno(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_aluno(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM alunos WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete aluno")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Aluno not found")));
        }

        Ok(())
    }
}
