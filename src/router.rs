use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    controller::counting::{get_status, reset_count},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/counting/status", get(get_status))
        .route("/api/counting/reset", post(reset_count))
}
