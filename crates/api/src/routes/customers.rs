use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/customers", post(handlers::customers::create_customer))
        .route("/api/customers/login", post(handlers::customers::login))
        .route("/api/customers/:id", get(handlers::customers::get_customer))
        .route(
            "/api/customers/:id/appointments",
            get(handlers::appointments::list_customer_appointments),
        )
}
