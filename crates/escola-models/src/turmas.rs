//! Turma domain models and DTOs.
//!
//! A turma is a class/cohort with a unique name and a bounded capacity.
//! Its occupancy (`ocupacao`) is the number of alunos assigned to it with
//! status `ativo`, computed per request and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use escola_core::PaginationMeta;

/// Maximum alunos a single turma may be configured to hold.
pub const CAPACIDADE_MAXIMA: i32 = 50;

/// A turma as stored in the database.
#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct Turma {
    pub id: Uuid,
    pub nome: String,
    pub capacidade: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A turma together with its current active occupancy.
#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct TurmaComOcupacao {
    pub id: Uuid,
    pub nome: String,
    pub capacidade: i32,
    /// Number of alunos assigned to this turma with status `ativo`.
    pub ocupacao: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new turma.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateTurmaDto {
    #[validate(length(min = 1, max = 100))]
    pub nome: String,
    #[validate(range(min = 1, max = 50))]
    pub capacidade: i32,
}

/// DTO for updating an existing turma.
///
/// All fields are optional; only provided fields are updated.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateTurmaDto {
    #[validate(length(min = 1, max = 100))]
    pub nome: Option<String>,
    #[validate(range(min = 1, max = 50))]
    pub capacidade: Option<i32>,
}

/// Paginated response containing turmas with their occupancy.
#[derive(Serialize, ToSchema)]
pub struct PaginatedTurmasResponse {
    pub data: Vec<TurmaComOcupacao>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_turma_dto_valid() {
        let dto = CreateTurmaDto {
            nome: "1º Ano A - Manhã".to_string(),
            capacidade: 25,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_turma_dto_empty_nome() {
        let dto = CreateTurmaDto {
            nome: "".to_string(),
            capacidade: 25,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_turma_dto_capacidade_bounds() {
        let zero = CreateTurmaDto {
            nome: "Turma".to_string(),
            capacidade: 0,
        };
        assert!(zero.validate().is_err());

        let too_big = CreateTurmaDto {
            nome: "Turma".to_string(),
            capacidade: CAPACIDADE_MAXIMA + 1,
        };
        assert!(too_big.validate().is_err());

        let at_max = CreateTurmaDto {
            nome: "Turma".to_string(),
            capacidade: CAPACIDADE_MAXIMA,
        };
        assert!(at_max.validate().is_ok());
    }

    #[test]
    fn test_update_turma_dto_empty_is_valid() {
        let dto = UpdateTurmaDto {
            nome: None,
            capacidade: None,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_turma_dto_invalid_capacidade() {
        let dto = UpdateTurmaDto {
            nome: None,
            capacidade: Some(-3),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_turma_dto_long_nome() {
        let dto = CreateTurmaDto {
            nome: "x".repeat(101),
            capacidade: 10,
        };
        assert!(dto.validate().is_err());
    }
}
