use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use escola_auth::{Claims, verify_token};
use escola_core::AppError;

use crate::state::AppState;

/// Extractor that validates the bearer token and exposes the authenticated
/// usuario's claims to handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the usuario ID as UUID
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid usuario ID in token"))
    }

    /// Get the usuario's email
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = claims_from_parts(parts, state)?;
        Ok(AuthUser(claims))
    }
}

/// Route-layer middleware that rejects requests without a valid bearer token.
///
/// Successful verification stores the claims in request extensions so the
/// [`AuthUser`] extractor does not re-verify the token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let claims = claims_from_parts(&mut parts, &state)?;
    req = Request::from_parts(parts, body);
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn claims_from_parts(parts: &mut Parts, state: &AppState) -> Result<Claims, AppError> {
    if let Some(claims) = parts.extensions.get::<Claims>() {
        return Ok(claims.clone());
    }

    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

    verify_token(token, &state.jwt_config)
}
