use axum::{
    extract::{Path, State},
    Json,
};
use barbershop_core::{
    errors::BookingError,
    models::service::{CreateServiceRequest, Service, UpdateServiceRequest},
};
use barbershop_db::models::DbService;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

fn to_service(db: DbService) -> Service {
    Service {
        id: db.id,
        name: db.name,
        price: db.price,
        duration_minutes: db.duration_minutes,
        created_at: db.created_at,
    }
}

fn validate_service_fields(
    name: Option<&str>,
    price: Option<Decimal>,
    duration_minutes: Option<i32>,
) -> Result<(), AppError> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(AppError(BookingError::Validation(
                "Service name must not be empty".to_string(),
            )));
        }
    }
    if let Some(price) = price {
        if price < Decimal::ZERO {
            return Err(AppError(BookingError::Validation(
                "Service price must not be negative".to_string(),
            )));
        }
    }
    if let Some(duration) = duration_minutes {
        if duration <= 0 {
            return Err(AppError(BookingError::Validation(
                "Service duration must be positive".to_string(),
            )));
        }
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<Json<Service>, AppError> {
    validate_service_fields(
        Some(&payload.name),
        Some(payload.price),
        Some(payload.duration_minutes),
    )?;

    let service = barbershop_db::repositories::service::create_service(
        &state.db_pool,
        &payload.name,
        payload.price,
        payload.duration_minutes,
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(to_service(service)))
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = barbershop_db::repositories::service::list_services(&state.db_pool)
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(services.into_iter().map(to_service).collect()))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Service>, AppError> {
    let service = barbershop_db::repositories::service::get_service_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Service with ID {} not found", id)))?;

    Ok(Json(to_service(service)))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<Json<Service>, AppError> {
    validate_service_fields(
        payload.name.as_deref(),
        payload.price,
        payload.duration_minutes,
    )?;

    // Existence check first so an unknown id is a 404, not a 500
    barbershop_db::repositories::service::get_service_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Service with ID {} not found", id)))?;

    let service = barbershop_db::repositories::service::update_service(
        &state.db_pool,
        id,
        payload.name.as_deref(),
        payload.price,
        payload.duration_minutes,
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(to_service(service)))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = barbershop_db::repositories::service::delete_service(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?;

    if !deleted {
        return Err(AppError(BookingError::NotFound(format!(
            "Service with ID {} not found",
            id
        ))));
    }

    Ok(Json(serde_json::json!({ "deleted": id })))
}
