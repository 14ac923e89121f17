pub use escola_models::alunos::*;
