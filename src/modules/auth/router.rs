use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::auth::controller::{get_profile, login_usuario, register_usuario};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_usuario))
        .route("/login", post(login_usuario))
        .route("/me", get(get_profile))
}
