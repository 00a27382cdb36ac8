use axum::{
    extract::{Path, State},
    Json,
};
use barbershop_core::{
    errors::BookingError,
    models::customer::{CreateCustomerRequest, CustomerResponse, LoginRequest},
};
use barbershop_db::models::DbCustomer;
use std::sync::Arc;

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

fn to_response(db: DbCustomer) -> CustomerResponse {
    CustomerResponse {
        id: db.id,
        email: db.email,
        name: db.name,
        created_at: db.created_at,
    }
}

/// Registers a new customer account. The password is argon2-hashed before
/// it reaches the database; a duplicate email is a validation failure.
#[axum::debug_handler]
pub async fn create_customer(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    if !payload.email.contains('@') {
        return Err(AppError(BookingError::Validation(
            "Email is not a valid address".to_string(),
        )));
    }
    if payload.password.len() < 8 {
        return Err(AppError(BookingError::Validation(
            "Password must be at least 8 characters".to_string(),
        )));
    }

    let existing =
        barbershop_db::repositories::customer::get_customer_by_email(&state.db_pool, &payload.email)
            .await
            .map_err(BookingError::Database)?;
    if existing.is_some() {
        return Err(AppError(BookingError::Validation(
            "Email is already registered".to_string(),
        )));
    }

    let password_hash = auth::hash_password(&payload.password).map_err(BookingError::Database)?;

    let customer = barbershop_db::repositories::customer::create_customer(
        &state.db_pool,
        &payload.email,
        &payload.name,
        &password_hash,
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(to_response(customer)))
}

/// Verifies a customer's credentials. Unknown email and wrong password are
/// indistinguishable in the response.
#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer =
        auth::verify_customer_credentials(&state.db_pool, &payload.email, &payload.password)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| {
                BookingError::Authentication("Invalid email or password".to_string())
            })?;

    Ok(Json(to_response(customer)))
}

#[axum::debug_handler]
pub async fn get_customer(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer = barbershop_db::repositories::customer::get_customer_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Customer with ID {} not found", id)))?;

    Ok(Json(to_response(customer)))
}
