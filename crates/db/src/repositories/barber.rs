use crate::models::DbBarber;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};

pub async fn create_barber(
    pool: &Pool<Postgres>,
    name: &str,
    email: &str,
    bio: Option<&str>,
) -> Result<DbBarber> {
    tracing::debug!("Creating barber: name={}, email={}", name, email);

    let barber = sqlx::query_as::<_, DbBarber>(
        r#"
        INSERT INTO barbers (name, email, bio)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, bio, created_at
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(bio)
    .fetch_one(pool)
    .await?;

    Ok(barber)
}

pub async fn get_barber_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbBarber>> {
    let barber = sqlx::query_as::<_, DbBarber>(
        r#"
        SELECT id, name, email, bio, created_at
        FROM barbers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(barber)
}

pub async fn list_barbers(pool: &Pool<Postgres>) -> Result<Vec<DbBarber>> {
    let barbers = sqlx::query_as::<_, DbBarber>(
        r#"
        SELECT id, name, email, bio, created_at
        FROM barbers
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(barbers)
}

pub async fn update_barber(
    pool: &Pool<Postgres>,
    id: i64,
    name: Option<&str>,
    email: Option<&str>,
    bio: Option<&str>,
) -> Result<DbBarber> {
    let barber = get_barber_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("Barber not found"))?;

    let name = name.unwrap_or(&barber.name);
    let email = email.unwrap_or(&barber.email);
    let bio = bio.or(barber.bio.as_deref());

    let updated_barber = sqlx::query_as::<_, DbBarber>(
        r#"
        UPDATE barbers
        SET name = $2, email = $3, bio = $4
        WHERE id = $1
        RETURNING id, name, email, bio, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(bio)
    .fetch_one(pool)
    .await?;

    Ok(updated_barber)
}
