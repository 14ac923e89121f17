//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};

/// JWT claims for access tokens.
///
/// # Fields
///
/// - `sub`: Usuario ID (subject)
/// - `email`: Usuario's email address
/// - `exp`: Token expiration timestamp (Unix timestamp)
/// - `iat`: Token issued-at timestamp (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}
