use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/barbers", post(handlers::barbers::create_barber))
        .route("/api/barbers", get(handlers::barbers::list_barbers))
        .route("/api/barbers/:id", get(handlers::barbers::get_barber))
        .route("/api/barbers/:id", put(handlers::barbers::update_barber))
}
