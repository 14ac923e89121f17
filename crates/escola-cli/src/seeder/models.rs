//! Data models for database seeding.

use chrono::NaiveDate;
use uuid::Uuid;

/// Seed data for creating a turma.
pub struct TurmaSeed {
    pub nome: String,
    pub capacidade: i32,
}

/// An inserted turma with its capacity, used to distribute alunos.
#[derive(Debug, Clone, Copy)]
pub struct TurmaSlot {
    pub id: Uuid,
    pub capacidade: i32,
}

/// Seed data for creating an aluno.
pub struct AlunoSeed {
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub email: String,
    /// `ativo` when assigned to a turma, `inativo` otherwise.
    pub status: &'static str,
    pub turma_id: Option<Uuid>,
}
