use axum::{
    extract::{Path, State},
    Json,
};
use barbershop_core::{
    errors::BookingError,
    models::barber::{Barber, CreateBarberRequest, UpdateBarberRequest},
};
use barbershop_db::models::DbBarber;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

fn to_barber(db: DbBarber) -> Barber {
    Barber {
        id: db.id,
        name: db.name,
        email: db.email,
        bio: db.bio,
        created_at: db.created_at,
    }
}

#[axum::debug_handler]
pub async fn create_barber(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBarberRequest>,
) -> Result<Json<Barber>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(BookingError::Validation(
            "Barber name must not be empty".to_string(),
        )));
    }
    if !payload.email.contains('@') {
        return Err(AppError(BookingError::Validation(
            "Barber email is not a valid address".to_string(),
        )));
    }

    let barber = barbershop_db::repositories::barber::create_barber(
        &state.db_pool,
        &payload.name,
        &payload.email,
        payload.bio.as_deref(),
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(to_barber(barber)))
}

#[axum::debug_handler]
pub async fn list_barbers(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Barber>>, AppError> {
    let barbers = barbershop_db::repositories::barber::list_barbers(&state.db_pool)
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(barbers.into_iter().map(to_barber).collect()))
}

#[axum::debug_handler]
pub async fn get_barber(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<Barber>, AppError> {
    let barber = barbershop_db::repositories::barber::get_barber_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Barber with ID {} not found", id)))?;

    Ok(Json(to_barber(barber)))
}

#[axum::debug_handler]
pub async fn update_barber(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBarberRequest>,
) -> Result<Json<Barber>, AppError> {
    if let Some(email) = &payload.email {
        if !email.contains('@') {
            return Err(AppError(BookingError::Validation(
                "Barber email is not a valid address".to_string(),
            )));
        }
    }

    barbershop_db::repositories::barber::get_barber_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Barber with ID {} not found", id)))?;

    let barber = barbershop_db::repositories::barber::update_barber(
        &state.db_pool,
        id,
        payload.name.as_deref(),
        payload.email.as_deref(),
        payload.bio.as_deref(),
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(to_barber(barber)))
}
