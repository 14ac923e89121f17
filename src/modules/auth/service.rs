use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use chrono::{DateTime, Utc};
use escola_auth::create_access_token;
use escola_config::JwtConfig;
use escola_core::{AppError, hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RegisterRequestDto, Usuario};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto))]
    pub async fn register_usuario(
        db: &PgPool,
        dto: RegisterRequestDto,
    ) -> Result<Usuario, AppError> {
        let senha_hash = hash_password(&dto.senha)?;

        let usuario = sqlx::query_as::<_, Usuario>(
            "INSERT INTO usuarios (nome, email, senha)
             VALUES ($1, $2, $3)
             RETURNING id, nome, email, ativo, created_at",
        )
        .bind(&dto.nome)
        .bind(&dto.email)
        .bind(&senha_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Usuario with email {} already exists",
                        dto.email
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(usuario)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_usuario(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UsuarioWithSenha {
            id: Uuid,
            nome: String,
            email: String,
            senha: String,
            ativo: bool,
            created_at: DateTime<Utc>,
        }

        let usuario_with_senha = sqlx::query_as::<_, UsuarioWithSenha>(
            "SELECT id, nome, email, senha, ativo, created_at FROM usuarios WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or senha"))?;

        let is_valid = verify_password(&dto.senha, &usuario_with_senha.senha)?;

        if !is_valid {
            return Err(AppError::unauthorized("Invalid email or senha"));
        }

        if !usuario_with_senha.ativo {
            return Err(AppError::unauthorized("Usuario account is inactive"));
        }

        let access_token =
            create_access_token(usuario_with_senha.id, &usuario_with_senha.email, jwt_config)?;

        let usuario = Usuario {
            id: usuario_with_senha.id,
            nome: usuario_with_senha.nome,
            email: usuario_with_senha.email,
            ativo: usuario_with_senha.ativo,
            created_at: usuario_with_senha.created_at,
        };

        Ok(LoginResponse {
            access_token,
            usuario,
        })
    }

    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, usuario_id: Uuid) -> Result<Usuario, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "SELECT id, nome, email, ativo, created_at FROM usuarios WHERE id = $1",
        )
        .bind(usuario_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Usuario not found"))?;

        if !usuario.ativo {
            return Err(AppError::unauthorized("Usuario account is inactive"));
        }

        Ok(usuario)
    }
}
