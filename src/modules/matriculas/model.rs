pub use escola_models::matriculas::*;
