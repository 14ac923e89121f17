//! Matrícula (enrollment) DTOs.
//!
//! A matrícula assigns an aluno to a turma, subject to remaining capacity,
//! and flips the aluno's status to `ativo`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::alunos::StatusAluno;

/// Request body for enrolling an aluno into a turma.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct MatriculaRequest {
    pub aluno_id: Uuid,
    pub turma_id: Uuid,
}

/// Result of a successful matrícula.
#[derive(Serialize, Debug, ToSchema)]
pub struct MatriculaResponse {
    pub message: String,
    pub aluno_id: Uuid,
    pub turma_id: Uuid,
    pub novo_status: StatusAluno,
}
