use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::alunos::controller::{
    create_aluno, delete_aluno, get_aluno, get_alunos, update_aluno,
};
use crate::modules::alunos::export::export_alunos;
use crate::state::AppState;

pub fn init_alunos_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_aluno).get(get_alunos))
        .route("/export", get(export_alunos))
        .route(
            "/{id}",
            get(get_aluno).put(update_aluno).delete(delete_aluno),
        )
}
