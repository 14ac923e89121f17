use axum::{Router, routing::post};

use crate::modules::matriculas::controller::matricular_aluno;
use crate::state::AppState;

pub fn init_matriculas_router() -> Router<AppState> {
    Router::new().route("/", post(matricular_aluno))
}
