//! Aluno seeding functionality.

use chrono::NaiveDate;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::{AlunoSeed, TurmaSlot};

/// Generates aluno data in parallel using Rayon.
///
/// Alunos are distributed across the turmas in order, never exceeding a
/// turma's capacidade; alunos assigned to a turma are `ativo`, the
/// overflow stays unassigned and `inativo`.
pub fn generate_alunos(count: usize, turmas: &[TurmaSlot]) -> Vec<AlunoSeed> {
    let mut assignments: Vec<Option<Uuid>> = Vec::with_capacity(count);
    'outer: for turma in turmas {
        for _ in 0..turma.capacidade {
            if assignments.len() == count {
                break 'outer;
            }
            assignments.push(Some(turma.id));
        }
    }
    assignments.resize(count, None);

    assignments
        .into_par_iter()
        .enumerate()
        .map(|(i, turma_id)| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            let email = format!(
                "{}.{}+{}@example.com",
                first_name.to_lowercase(),
                last_name.to_lowercase(),
                i
            );

            let mut rng = rand::thread_rng();
            let data_nascimento = NaiveDate::from_ymd_opt(
                rng.gen_range(2010..=2018),
                rng.gen_range(1..=12),
                rng.gen_range(1..=28),
            )
            .unwrap();

            AlunoSeed {
                nome: format!("{} {}", first_name, last_name),
                data_nascimento,
                email,
                status: if turma_id.is_some() {
                    "ativo"
                } else {
                    "inativo"
                },
                turma_id,
            }
        })
        .collect()
}

/// Seeds alunos into the database, spread across the given turmas.
pub async fn seed_alunos(
    db: &PgPool,
    turmas: &[TurmaSlot],
    count: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🎒 Seeding {} alunos...", count);

    let alunos = generate_alunos(count, turmas);
    let inserted = insert_alunos_batch(db, &alunos).await?;

    println!(
        "   ✓ Inserted {} alunos in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(())
}

/// Inserts alunos in batches using multi-value INSERT statements.
pub async fn insert_alunos_batch(
    db: &PgPool,
    alunos: &[AlunoSeed],
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 500;
    let mut inserted = 0;

    for chunk in alunos.chunks(BATCH_SIZE) {
        inserted += insert_alunos_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;
    Ok(inserted)
}

async fn insert_alunos_chunk(
    tx: &mut Transaction<'_, Postgres>,
    alunos: &[AlunoSeed],
) -> Result<usize, Box<dyn std::error::Error>> {
    if alunos.is_empty() {
        return Ok(0);
    }

    let mut query =
        String::from("INSERT INTO alunos (nome, data_nascimento, email, status, turma_id) VALUES ");

    for (i, _) in alunos.iter().enumerate() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 5;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}::status_aluno, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5
        ));
    }

    let mut q = sqlx::query(&query);
    for aluno in alunos {
        q = q
            .bind(&aluno.nome)
            .bind(aluno.data_nascimento)
            .bind(&aluno.email)
            .bind(aluno.status)
            .bind(aluno.turma_id);
    }

    let result = q.execute(&mut **tx).await?;
    Ok(result.rows_affected() as usize)
}

/// Clears all alunos from the database.
pub async fn clear_alunos(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing alunos...");

    let result = sqlx::query("DELETE FROM alunos")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} alunos in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
