//! JWT creation and verification.
//!
//! Access tokens are HS256-signed with the secret from [`JwtConfig`] and
//! expire after `access_token_expiry` seconds (default 8 hours).

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use escola_config::JwtConfig;
use escola_core::AppError;

use crate::claims::Claims;

/// Creates an access token for an authenticated usuario.
///
/// # Errors
///
/// Returns an error if token encoding fails (e.g. invalid secret key).
pub fn create_access_token(
    usuario_id: Uuid,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: usuario_id.to_string(),
        email: email.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error when the signature is invalid, the token is
/// expired, or the token is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_create_access_token_success() {
        let config = get_test_jwt_config();
        let result = create_access_token(Uuid::new_v4(), "test@example.com", &config);

        assert!(result.is_ok());
        assert!(!result.unwrap().is_empty());
    }

    #[test]
    fn test_verify_token_success() {
        let config = get_test_jwt_config();
        let usuario_id = Uuid::new_v4();

        let token = create_access_token(usuario_id, "test@example.com", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, usuario_id.to_string());
        assert_eq!(claims.email, "test@example.com");
    }

    #[test]
    fn test_verify_token_invalid() {
        let config = get_test_jwt_config();
        assert!(verify_token("invalid-token", &config).is_err());
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), "test@example.com", &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            access_token_expiry: 3600,
        };

        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_verify_token_malformed() {
        let config = get_test_jwt_config();
        let malformed_tokens = vec![
            "",
            "not.enough.parts",
            "too.many.parts.here.extra",
            "!!!.invalid.chars",
            "header.payload.",
        ];

        for token in malformed_tokens {
            assert!(verify_token(token, &config).is_err());
        }
    }

    #[test]
    fn test_token_expiry_is_set() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), "test@example.com", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert!(claims.exp > claims.iat);
        assert_eq!(
            claims.exp - claims.iat,
            config.access_token_expiry as usize
        );
    }

    #[test]
    fn test_different_users_different_tokens() {
        let config = get_test_jwt_config();
        let token1 = create_access_token(Uuid::new_v4(), "user1@example.com", &config).unwrap();
        let token2 = create_access_token(Uuid::new_v4(), "user2@example.com", &config).unwrap();

        assert_ne!(token1, token2);
    }
}
