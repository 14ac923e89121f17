use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::turmas::controller::{
    create_turma, delete_turma, get_turma, get_turmas, update_turma,
};
use crate::state::AppState;

pub fn init_turmas_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_turma).get(get_turmas))
        .route(
            "/{id}",
            get(get_turma).put(update_turma).delete(delete_turma),
        )
}
