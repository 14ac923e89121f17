//! # Escola Auth
//!
//! Authentication types and JWT utilities for the Escola API.
//!
//! The API issues a single short-lived HS256 access token at login. The token
//! carries the usuario id and email, so bearer-protected handlers can resolve
//! the caller without an extra database lookup.
//!
//! # Example
//!
//! ```ignore
//! use escola_auth::{create_access_token, verify_token};
//! use escola_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//!
//! let token = create_access_token(usuario_id, "admin@escola.com", &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
