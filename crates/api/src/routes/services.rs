use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/services", post(handlers::services::create_service))
        .route("/api/services", get(handlers::services::list_services))
        .route("/api/services/:id", get(handlers::services::get_service))
        .route("/api/services/:id", put(handlers::services::update_service))
        .route(
            "/api/services/:id",
            delete(handlers::services::delete_service),
        )
}
