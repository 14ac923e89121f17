//! # Escola CLI
//!
//! Database seeding utilities for Escola testing and development.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use escola_cli::seeder;
//!
//! let turma_ids = seeder::seed_turmas(&pool, 5).await?;
//! seeder::seed_alunos(&pool, &turma_ids, 25).await?;
//! ```

pub mod seeder;
