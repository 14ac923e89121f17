pub use escola_models::turmas::*;
