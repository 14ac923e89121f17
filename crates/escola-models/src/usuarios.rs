//! Usuario (API operator account) models and auth DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// An operator account, as returned by the API.
///
/// The senha hash is never selected into this struct.
#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct Usuario {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
}

/// DTO for registering a new usuario.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct RegisterRequestDto {
    #[validate(length(min = 1, max = 100))]
    pub nome: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub senha: String,
}

/// Login request.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub senha: String,
}

/// Login response carrying the bearer token.
#[derive(Serialize, Debug, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub usuario: Usuario,
}

/// Generic confirmation message.
#[derive(Serialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
