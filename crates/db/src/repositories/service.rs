use crate::models::DbService;
use eyre::{eyre, Result};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

pub async fn create_service(
    pool: &Pool<Postgres>,
    name: &str,
    price: Decimal,
    duration_minutes: i32,
) -> Result<DbService> {
    tracing::debug!(
        "Creating service: name={}, price={}, duration_minutes={}",
        name,
        price,
        duration_minutes
    );

    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (name, price, duration_minutes)
        VALUES ($1, $2, $3)
        RETURNING id, name, price, duration_minutes, created_at
        "#,
    )
    .bind(name)
    .bind(price)
    .bind(duration_minutes)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, price, duration_minutes, created_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

/// Resolves a set of service ids in one query. The result may be shorter
/// than the input when some ids do not exist; callers decide whether that
/// is a validation failure.
pub async fn get_services_by_ids(pool: &Pool<Postgres>, ids: &[i64]) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, price, duration_minutes, created_at
        FROM services
        WHERE id = ANY($1)
        ORDER BY id ASC
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn list_services(pool: &Pool<Postgres>) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, price, duration_minutes, created_at
        FROM services
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn update_service(
    pool: &Pool<Postgres>,
    id: i64,
    name: Option<&str>,
    price: Option<Decimal>,
    duration_minutes: Option<i32>,
) -> Result<DbService> {
    let service = get_service_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("Service not found"))?;

    let name = name.unwrap_or(&service.name);
    let price = price.unwrap_or(service.price);
    let duration_minutes = duration_minutes.unwrap_or(service.duration_minutes);

    let updated_service = sqlx::query_as::<_, DbService>(
        r#"
        UPDATE services
        SET name = $2, price = $3, duration_minutes = $4
        WHERE id = $1
        RETURNING id, name, price, duration_minutes, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(price)
    .bind(duration_minutes)
    .fetch_one(pool)
    .await?;

    Ok(updated_service)
}

pub async fn delete_service(pool: &Pool<Postgres>, id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
