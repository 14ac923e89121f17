//! Admin bootstrap reachable from the server binary
//! (`escola-api create-admin <nome> <email> <senha>`).

use sqlx::PgPool;

use escola_core::{AppError, hash_password};

/// Creates an admin usuario. Fails when the email is already taken.
pub async fn create_admin(
    db: &PgPool,
    nome: &str,
    email: &str,
    senha: &str,
) -> Result<(), AppError> {
    let senha_hash = hash_password(senha)?;

    let result = sqlx::query(
        "INSERT INTO usuarios (nome, email, senha)
         VALUES ($1, $2, $3)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(nome)
    .bind(email)
    .bind(&senha_hash)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "Usuario with email {} already exists",
            email
        )));
    }

    Ok(())
}
