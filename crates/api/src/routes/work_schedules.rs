use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/barbers/:id/schedule",
            get(handlers::work_schedules::get_work_schedule),
        )
        .route(
            "/api/barbers/:id/schedule",
            put(handlers::work_schedules::update_work_schedule),
        )
}
