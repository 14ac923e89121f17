#![feature(int_roundings)]
//! # Escola Core
//!
//! Core types, errors, and utilities for the Escola API.
//!
//! This crate provides the foundational pieces used throughout the
//! application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Pagination utilities for list endpoints
//! - [`password`]: Secure password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use escola_core::errors::AppError;
//! use escola_core::pagination::PaginationParams;
//! use escola_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Turma not found"));
//!
//! let hash = hash_password("senha_segura")?;
//! assert!(verify_password("senha_segura", &hash)?);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
