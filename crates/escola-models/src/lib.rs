//! # Escola Models
//!
//! Domain models and DTOs for the Escola API.
//!
//! Each module covers one entity of the school-records domain:
//!
//! - [`turmas`]: classes/cohorts with a bounded capacity
//! - [`alunos`]: students, their status and turma assignment
//! - [`matriculas`]: the enrollment operation linking an aluno to a turma
//! - [`usuarios`]: operator accounts used to authenticate against the API

pub mod alunos;
pub mod matriculas;
pub mod turmas;
pub mod usuarios;
