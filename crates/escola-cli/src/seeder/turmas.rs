//! Turma seeding functionality.

use rand::Rng;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::{TurmaSeed, TurmaSlot};

const LETRAS: [char; 4] = ['A', 'B', 'C', 'D'];
const TURNOS: [&str; 2] = ["Manhã", "Tarde"];

/// Generates turma data in parallel using Rayon.
///
/// Names follow the "1º Ano A - Manhã" pattern and are unique for up to
/// 72 turmas; beyond that a numeric suffix keeps them distinct.
pub fn generate_turmas(count: usize) -> Vec<TurmaSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let ano = i % 9 + 1;
            let letra = LETRAS[(i / 9) % LETRAS.len()];
            let turno = TURNOS[(i / 36) % TURNOS.len()];

            let nome = if i < 72 {
                format!("{}º Ano {} - {}", ano, letra, turno)
            } else {
                format!("{}º Ano {} - {} #{}", ano, letra, turno, i)
            };

            TurmaSeed {
                nome,
                capacidade: rand::thread_rng().gen_range(20..=30),
            }
        })
        .collect()
}

/// Seeds turmas into the database.
pub async fn seed_turmas(
    db: &PgPool,
    count: usize,
) -> Result<Vec<TurmaSlot>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🏫 Seeding {} turmas...", count);

    let turmas = generate_turmas(count);
    let slots = insert_turmas_batch(db, &turmas).await?;

    println!(
        "   ✓ Inserted {} turmas in {:?}",
        slots.len(),
        start_time.elapsed()
    );

    Ok(slots)
}

/// Inserts turmas in batches using multi-value INSERT statements.
pub async fn insert_turmas_batch(
    db: &PgPool,
    turmas: &[TurmaSeed],
) -> Result<Vec<TurmaSlot>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 500;
    let mut all_slots = Vec::with_capacity(turmas.len());

    for chunk in turmas.chunks(BATCH_SIZE) {
        let slots = insert_turmas_chunk(&mut tx, chunk).await?;
        all_slots.extend(slots);
    }

    tx.commit().await?;
    Ok(all_slots)
}

async fn insert_turmas_chunk(
    tx: &mut Transaction<'_, Postgres>,
    turmas: &[TurmaSeed],
) -> Result<Vec<TurmaSlot>, Box<dyn std::error::Error>> {
    if turmas.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO turmas (nome, capacidade) VALUES ");

    for (i, _) in turmas.iter().enumerate() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 2;
        query.push_str(&format!("(${}, ${})", param_idx + 1, param_idx + 2));
    }

    query.push_str(" RETURNING id, capacidade");

    let mut q = sqlx::query_as::<_, (uuid::Uuid, i32)>(&query);
    for turma in turmas {
        q = q.bind(&turma.nome).bind(turma.capacidade);
    }

    let rows = q.fetch_all(&mut **tx).await?;
    Ok(rows
        .into_iter()
        .map(|(id, capacidade)| TurmaSlot { id, capacidade })
        .collect())
}

/// Clears all turmas from the database.
pub async fn clear_turmas(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing turmas...");

    let result = sqlx::query("DELETE FROM turmas")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} turmas in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
