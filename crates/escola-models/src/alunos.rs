//! Aluno domain models and DTOs.
//!
//! An aluno is a student with a name, birth date, optional unique email,
//! an `ativo`/`inativo` status and an optional turma assignment. The API
//! exposes the derived `idade` (full years) and the joined `turma_nome`.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use escola_core::PaginationMeta;

/// Minimum age (in full years) an aluno must have.
pub const IDADE_MINIMA: i32 = 5;

/// Enrollment status of an aluno.
///
/// Stored as the Postgres enum `status_aluno`. New alunos default to
/// `inativo`; a matrícula flips the status to `ativo`.
#[derive(
    Serialize, Deserialize, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "status_aluno", rename_all = "lowercase")]
pub enum StatusAluno {
    Ativo,
    Inativo,
}

impl StatusAluno {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusAluno::Ativo => "ativo",
            StatusAluno::Inativo => "inativo",
        }
    }
}

/// An aluno as stored in the database.
#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct Aluno {
    pub id: Uuid,
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub email: Option<String>,
    pub status: StatusAluno,
    pub turma_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aluno row joined with the nome of its turma.
#[derive(FromRow, Debug)]
pub struct AlunoComTurma {
    pub id: Uuid,
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub email: Option<String>,
    pub status: StatusAluno,
    pub turma_id: Option<Uuid>,
    pub turma_nome: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aluno representation returned by the API, with derived fields.
#[derive(Serialize, Debug, ToSchema)]
pub struct AlunoResponse {
    pub id: Uuid,
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub email: Option<String>,
    pub status: StatusAluno,
    pub turma_id: Option<Uuid>,
    /// Age in full years as of today.
    pub idade: i32,
    /// Nome of the assigned turma, when any.
    pub turma_nome: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AlunoComTurma> for AlunoResponse {
    fn from(row: AlunoComTurma) -> Self {
        let idade = idade(row.data_nascimento);
        Self {
            id: row.id,
            nome: row.nome,
            data_nascimento: row.data_nascimento,
            email: row.email,
            status: row.status,
            turma_id: row.turma_id,
            idade,
            turma_nome: row.turma_nome,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new aluno.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateAlunoDto {
    #[validate(length(min = 3, max = 80))]
    pub nome: String,
    #[validate(custom(function = validar_data_nascimento))]
    pub data_nascimento: NaiveDate,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    /// Defaults to `inativo` when omitted.
    pub status: Option<StatusAluno>,
    pub turma_id: Option<Uuid>,
}

/// DTO for updating an existing aluno.
///
/// All fields are optional; only provided fields are updated.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateAlunoDto {
    #[validate(length(min = 3, max = 80))]
    pub nome: Option<String>,
    #[validate(custom(function = validar_data_nascimento))]
    pub data_nascimento: Option<NaiveDate>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    pub status: Option<StatusAluno>,
    pub turma_id: Option<Uuid>,
}

/// Query parameters for filtering and paginating alunos.
#[derive(Deserialize, Debug, Default, IntoParams)]
pub struct AlunoQueryParams {
    /// Case-insensitive substring match on nome
    pub search: Option<String>,
    /// Filter by turma assignment
    pub turma_id: Option<Uuid>,
    /// Filter by status (`ativo` or `inativo`)
    pub status: Option<StatusAluno>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl AlunoQueryParams {
    /// Returns the page number, defaulting to 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Returns the limit, defaulting to 10 and clamping between 1 and 100.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    /// Calculates the offset based on page and limit.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

/// Paginated response containing alunos.
#[derive(Serialize, ToSchema)]
pub struct PaginatedAlunosResponse {
    pub data: Vec<AlunoResponse>,
    pub meta: PaginationMeta,
}

/// Age in full years at the reference date.
///
/// The year difference is decremented when the birthday has not yet
/// occurred in the reference year.
pub fn idade_em(data_nascimento: NaiveDate, hoje: NaiveDate) -> i32 {
    let mut idade = hoje.year() - data_nascimento.year();
    if (hoje.month(), hoje.day()) < (data_nascimento.month(), data_nascimento.day()) {
        idade -= 1;
    }
    idade
}

/// Age in full years as of today (UTC).
pub fn idade(data_nascimento: NaiveDate) -> i32 {
    idade_em(data_nascimento, Utc::now().date_naive())
}

/// Rejects future birth dates and alunos younger than [`IDADE_MINIMA`].
pub fn validar_data_nascimento(data_nascimento: &NaiveDate) -> Result<(), ValidationError> {
    let hoje = Utc::now().date_naive();

    if *data_nascimento > hoje {
        let mut err = ValidationError::new("data_nascimento_futura");
        err.message = Some("data_nascimento cannot be in the future".into());
        return Err(err);
    }

    if idade_em(*data_nascimento, hoje) < IDADE_MINIMA {
        let mut err = ValidationError::new("idade_minima");
        err.message = Some(
            format!("aluno must be at least {} years old", IDADE_MINIMA).into(),
        );
        return Err(err);
    }

    Ok(())
}
