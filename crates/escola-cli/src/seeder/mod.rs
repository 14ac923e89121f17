//! Database seeding for development and testing.
//!
//! Generates fake turmas and alunos, with aluno distribution that never
//! exceeds a turma's capacidade.

pub mod alunos;
pub mod models;
pub mod turmas;

pub use alunos::{clear_alunos, seed_alunos};
pub use models::{AlunoSeed, TurmaSeed, TurmaSlot};
pub use turmas::{clear_turmas, seed_turmas};

use sqlx::PgPool;

/// Seeds turmas then alunos in one go.
pub async fn seed_all(
    db: &PgPool,
    num_turmas: usize,
    num_alunos: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let turmas = seed_turmas(db, num_turmas).await?;
    seed_alunos(db, &turmas, num_alunos).await?;
    println!("🌱 Seeding complete");
    Ok(())
}

/// Clears all seeded data. Alunos go first so the turma FK never blocks.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    clear_alunos(db).await?;
    clear_turmas(db).await?;
    Ok(())
}
