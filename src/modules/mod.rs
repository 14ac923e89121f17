pub mod alunos;
pub mod auth;
pub mod matriculas;
pub mod turmas;
